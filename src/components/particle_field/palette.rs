//! Theme-derived particle colors.
//!
//! The active theme exposes its particle colors through CSS custom properties
//! on the document root. [`ThemePalette::resolve`] keeps each value as written,
//! so dots are filled with exactly what the stylesheet declares. Links need the
//! same color at a computed opacity; that is only possible for forms [`Color`]
//! understands, and other forms are drawn unchanged.

use log::{debug, warn};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with the alpha channel replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// Parses a CSS color string.
	///
	/// Supports hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) and `rgb()`/`rgba()`
	/// in both the comma form and the space form with an optional `/ alpha`.
	/// Channels and alpha may be percentages.
	pub fn parse(color_str: &str) -> Option<Color> {
		let s = color_str.trim();
		if let Some(hex) = s.strip_prefix('#') {
			return Self::parse_hex(hex);
		}
		let lower = s.to_ascii_lowercase();
		let inner = lower
			.strip_prefix("rgba(")
			.or_else(|| lower.strip_prefix("rgb("))?
			.strip_suffix(')')?;

		let (channels, slash_alpha) = match inner.split_once('/') {
			Some((channels, alpha)) => (channels, Some(alpha.trim())),
			None => (inner, None),
		};
		let parts: Vec<&str> = if channels.contains(',') {
			channels.split(',').map(str::trim).collect()
		} else {
			channels.split_whitespace().collect()
		};
		let (r, g, b, alpha) = match (parts.as_slice(), slash_alpha) {
			([r, g, b], alpha) => (*r, *g, *b, alpha),
			([r, g, b, a], None) => (*r, *g, *b, Some(*a)),
			_ => return None,
		};
		let a = match alpha {
			Some(a) => parse_alpha(a)?,
			None => 1.0,
		};
		Some(Color::rgba(
			parse_channel(r)?,
			parse_channel(g)?,
			parse_channel(b)?,
			a,
		))
	}

	fn parse_hex(hex: &str) -> Option<Color> {
		if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
			return None;
		}
		let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
		let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
		match hex.len() {
			3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
			4 => Some(Color::rgba(
				nibble(0)?,
				nibble(1)?,
				nibble(2)?,
				f64::from(nibble(3)?) / 255.0,
			)),
			6 => Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
			8 => Some(Color::rgba(
				pair(0)?,
				pair(2)?,
				pair(4)?,
				f64::from(pair(6)?) / 255.0,
			)),
			_ => None,
		}
	}
}

fn parse_channel(s: &str) -> Option<u8> {
	let value = match s.strip_suffix('%') {
		Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0 * 255.0,
		None => s.parse::<f64>().ok()?,
	};
	value.is_finite().then(|| value.clamp(0.0, 255.0).round() as u8)
}

fn parse_alpha(s: &str) -> Option<f64> {
	let value = match s.strip_suffix('%') {
		Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
		None => s.parse::<f64>().ok()?,
	};
	value.is_finite().then(|| value.clamp(0.0, 1.0))
}

/// A theme color as declared in CSS, plus its RGBA value when recognised.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteColor {
	css: String,
	rgba: Option<Color>,
}

impl PaletteColor {
	/// Wraps a declared CSS color. Any syntax the browser accepts is kept.
	pub fn new(css: &str) -> Self {
		let css = css.trim();
		Self {
			css: css.to_string(),
			rgba: Color::parse(css),
		}
	}

	/// The declaration as written; used to fill particles.
	pub fn css(&self) -> &str {
		&self.css
	}

	/// The parsed value, if the declaration uses a recognised form.
	pub fn rgba(&self) -> Option<Color> {
		self.rgba
	}

	/// CSS for this color at `alpha`. Unrecognised forms come back unchanged.
	pub fn at_alpha(&self, alpha: f64) -> String {
		match self.rgba {
			Some(color) => color.with_alpha(alpha).to_css(),
			None => self.css.clone(),
		}
	}
}

impl From<Color> for PaletteColor {
	fn from(color: Color) -> Self {
		Self {
			css: color.to_css(),
			rgba: Some(color),
		}
	}
}

/// CSS custom properties holding the three particle colors.
pub const COLOR_VARS: [&str; 3] = [
	"--particle-color-1",
	"--particle-color-2",
	"--particle-color-3",
];

/// CSS custom property holding the link opacity scale.
pub const LINE_OPACITY_VAR: &str = "--particle-line-opacity";

const DEFAULT_COLORS: [Color; 3] = [
	Color::rgba(20, 184, 166, 0.6), // Teal
	Color::rgba(6, 182, 212, 0.6),  // Cyan
	Color::rgba(59, 130, 246, 0.6), // Blue
];

const DEFAULT_LINE_OPACITY: f64 = 0.12;

/// Three particle colors plus the link opacity scale of the active theme.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemePalette {
	/// Particle colors, indexed by [`Particle::color_index`](super::Particle::color_index).
	pub colors: [PaletteColor; 3],
	/// Opacity of a link between two coincident particles.
	pub line_opacity: f64,
}

impl Default for ThemePalette {
	fn default() -> Self {
		Self {
			colors: DEFAULT_COLORS.map(PaletteColor::from),
			line_opacity: DEFAULT_LINE_OPACITY,
		}
	}
}

impl ThemePalette {
	/// Number of colors; every particle color index is below this.
	pub const LEN: usize = 3;

	/// Color for a particle's `color_index`.
	pub fn color(&self, index: usize) -> &PaletteColor {
		&self.colors[index % Self::LEN]
	}

	/// Builds a palette from a CSS variable lookup.
	///
	/// Only missing or blank colors fall back to the defaults. A missing,
	/// unparsable, or zero opacity falls back to the default scale.
	pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut palette = Self::default();
		for (slot, var) in palette.colors.iter_mut().zip(COLOR_VARS) {
			let Some(raw) = lookup(var) else { continue };
			if raw.trim().is_empty() {
				continue;
			}
			let color = PaletteColor::new(&raw);
			if color.rgba().is_none() {
				debug!(
					"kornerflag: {} = {:?} kept as written, links drawn without fading",
					var,
					color.css()
				);
			}
			*slot = color;
		}
		if let Some(opacity) = lookup(LINE_OPACITY_VAR)
			.and_then(|raw| raw.trim().parse::<f64>().ok())
			.filter(|v| v.is_finite() && *v != 0.0)
		{
			palette.line_opacity = opacity;
		}
		palette
	}

	/// Reads the palette from the computed style of `<html>`.
	/// Falls back to defaults when the style cannot be read.
	pub fn from_document() -> Self {
		let style = web_sys::window().and_then(|window| {
			let root = window.document()?.document_element()?;
			window.get_computed_style(&root).ok().flatten()
		});
		match style {
			Some(style) => Self::resolve(|var| style.get_property_value(var).ok()),
			None => {
				warn!("kornerflag: computed style unavailable, using default particle palette");
				Self::default()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-3
	}

	#[test]
	fn parses_hex_and_functional_notation() {
		assert_eq!(Color::parse("#14b8a6"), Some(Color::rgb(20, 184, 166)));
		assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
		assert_eq!(
			Color::parse(" rgba(6, 182, 212, 0.35) "),
			Some(Color::rgba(6, 182, 212, 0.35))
		);
		assert_eq!(Color::parse("rgb(1,2,3)"), Some(Color::rgb(1, 2, 3)));
		assert_eq!(Color::parse("teal"), None);
		assert_eq!(Color::parse("rgba(1, 2)"), None);
		assert_eq!(Color::parse("#12345"), None);
		assert_eq!(Color::parse("#+fffff"), None);
	}

	#[test]
	fn parses_space_separated_rgb_with_slash_alpha() {
		assert_eq!(
			Color::parse("rgb(45 212 191 / 0.7)"),
			Some(Color::rgba(45, 212, 191, 0.7))
		);
		assert_eq!(
			Color::parse("rgba(45 212 191 / 70%)"),
			Some(Color::rgba(45, 212, 191, 0.7))
		);
		assert_eq!(Color::parse("rgb(45 212 191)"), Some(Color::rgb(45, 212, 191)));
		assert_eq!(Color::parse("RGB(100%, 0%, 50%)"), Some(Color::rgb(255, 0, 128)));
		assert_eq!(Color::parse("rgb(45 212 / 0.7)"), None);
	}

	#[test]
	fn parses_hex_with_alpha() {
		let eight = Color::parse("#2dd4bfb3").unwrap();
		assert_eq!((eight.r, eight.g, eight.b), (45, 212, 191));
		assert!(close(eight.a, 179.0 / 255.0));

		let four = Color::parse("#0f08").unwrap();
		assert_eq!((four.r, four.g, four.b), (0, 255, 0));
		assert!(close(four.a, 136.0 / 255.0));
	}

	#[test]
	fn css_output_keeps_alpha_only_when_translucent() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(
			Color::rgb(1, 2, 3).with_alpha(0.5).to_css(),
			"rgba(1, 2, 3, 0.5)"
		);
	}

	#[test]
	fn palette_color_rewrites_alpha_only_for_known_forms() {
		let spaced = PaletteColor::new("rgb(45 212 191 / 0.7)");
		assert_eq!(spaced.css(), "rgb(45 212 191 / 0.7)");
		assert_eq!(spaced.at_alpha(0.25), "rgba(45, 212, 191, 0.25)");

		let hsl = PaletteColor::new(" hsl(170, 64%, 50%) ");
		assert_eq!(hsl.rgba(), None);
		assert_eq!(hsl.css(), "hsl(170, 64%, 50%)");
		assert_eq!(hsl.at_alpha(0.25), "hsl(170, 64%, 50%)");

		assert_eq!(PaletteColor::new("teal").at_alpha(0.1), "teal");
	}

	#[test]
	fn missing_variables_fall_back_to_defaults() {
		let palette = ThemePalette::resolve(|_| None);
		assert_eq!(palette, ThemePalette::default());

		let palette = ThemePalette::resolve(|_| Some("   ".to_string()));
		assert_eq!(palette, ThemePalette::default());
	}

	#[test]
	fn present_variables_are_kept_in_any_css_syntax() {
		let vars: HashMap<&str, &str> = [
			("--particle-color-1", "rgb(45 212 191 / 0.7)"),
			("--particle-color-2", "rgba(10, 20, 30, 0.4)"),
			("--particle-color-3", "hsl(170, 64%, 50%)"),
			("--particle-line-opacity", " 0.25 "),
		]
		.into_iter()
		.collect();
		let palette = ThemePalette::resolve(|var| vars.get(var).map(|v| v.to_string()));

		assert_eq!(palette.color(0).css(), "rgb(45 212 191 / 0.7)");
		assert_eq!(palette.color(0).rgba(), Some(Color::rgba(45, 212, 191, 0.7)));
		assert_eq!(palette.color(1).rgba(), Some(Color::rgba(10, 20, 30, 0.4)));
		assert_eq!(palette.color(2).css(), "hsl(170, 64%, 50%)");
		assert_ne!(palette.colors[2], ThemePalette::default().colors[2]);
		assert!((palette.line_opacity - 0.25).abs() < 1e-12);
	}

	#[test]
	fn zero_opacity_is_treated_as_missing() {
		let palette = ThemePalette::resolve(|var| {
			(var == LINE_OPACITY_VAR).then(|| "0".to_string())
		});
		assert_eq!(palette.line_opacity, DEFAULT_LINE_OPACITY);
	}
}
