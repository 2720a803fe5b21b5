//! Particle field simulation state.
//!
//! [`ParticleField`] owns everything the animation loop mutates: the particle
//! store, the resolved palette, the canvas size, and the last cursor position.
//! Each concern has one update entry point (`resize`, `set_mouse`, `recolor`),
//! and [`ParticleField::frame`] advances exactly one frame, returning a
//! [`Scene`] that the canvas painter draws. Nothing here touches the DOM.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::config::ParticleConfig;
use super::links::{Link, collect_links};
use super::palette::ThemePalette;
use super::particles::{Particle, ParticleStore};

/// A particle as it should be drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// Radius including the pulse.
	pub radius: f64,
	/// Palette slot to fill with.
	pub color_index: usize,
}

/// Everything drawn for one frame: particles first, then links on top.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	/// One dot per particle, in store order.
	pub dots: Vec<Dot>,
	/// Links to stroke; indices refer to `dots`.
	pub links: Vec<Link>,
}

/// Stop flag shared between the animation loop and whoever owns its lifetime.
///
/// Clones observe the same flag. It is `Send + Sync` so it can be captured by
/// component cleanup hooks.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	/// Token that has not been cancelled.
	pub fn new() -> Self {
		Self::default()
	}

	/// Signals every clone to stop.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	/// Whether [`cancel`](Self::cancel) has been called on any clone.
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// Simulation state for the background particle network.
pub struct ParticleField<R = StdRng> {
	/// Simulation tuning.
	pub config: ParticleConfig,
	/// Colors of the active theme.
	pub palette: ThemePalette,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	store: ParticleStore,
	mouse: Option<(f64, f64)>,
	rng: R,
}

impl ParticleField<StdRng> {
	/// Field with a reproducible particle layout.
	pub fn seeded(
		config: ParticleConfig,
		palette: ThemePalette,
		width: f64,
		height: f64,
		seed: u64,
	) -> Self {
		Self::new(config, palette, width, height, StdRng::seed_from_u64(seed))
	}

	/// Field seeded from the platform entropy source.
	pub fn from_entropy(
		config: ParticleConfig,
		palette: ThemePalette,
		width: f64,
		height: f64,
	) -> Self {
		Self::new(config, palette, width, height, StdRng::from_entropy())
	}
}

impl<R: rand::Rng> ParticleField<R> {
	/// Field with `config.count` particles drawn from `rng`.
	pub fn new(
		config: ParticleConfig,
		palette: ThemePalette,
		width: f64,
		height: f64,
		rng: R,
	) -> Self {
		let mut field = Self {
			config,
			palette,
			width,
			height,
			store: ParticleStore::default(),
			mouse: None,
			rng,
		};
		field.create_particles();
		field
	}

	/// Replaces the store with `config.count` fresh particles.
	pub fn create_particles(&mut self) {
		self.store = ParticleStore::create(
			self.config.count,
			&self.palette,
			&self.config,
			self.width,
			self.height,
			&mut self.rng,
		);
		info!(
			"kornerflag: created {} particles for {}x{} canvas",
			self.store.len(),
			self.width,
			self.height
		);
	}

	/// New canvas size. Particles are regenerated, not reflowed.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.create_particles();
	}

	/// Cursor position in canvas coordinates.
	pub fn set_mouse(&mut self, x: f64, y: f64) {
		self.mouse = Some((x, y));
	}

	/// Last cursor position, if the cursor has moved yet.
	pub fn mouse(&self) -> Option<(f64, f64)> {
		self.mouse
	}

	/// Swaps in the palette of a new theme. Color indices are kept.
	pub fn recolor(&mut self, palette: ThemePalette) {
		self.palette = palette;
	}

	/// Current particles.
	pub fn particles(&self) -> &[Particle] {
		self.store.as_slice()
	}

	/// Steps every particle once and lays out the frame drawn at `time` (ms).
	pub fn frame(&mut self, time: f64) -> Scene {
		let (mouse, width, height) = (self.mouse, self.width, self.height);
		let mut dots = Vec::with_capacity(self.store.len());
		for p in self.store.iter_mut() {
			p.step(mouse, &self.config, width, height, &mut self.rng);
			dots.push(Dot {
				x: p.x,
				y: p.y,
				radius: p.pulse_radius(time, &self.config),
				color_index: p.color_index,
			});
		}

		let links = collect_links(
			self.store.as_slice(),
			self.config.line_distance,
			self.palette.line_opacity,
			self.config.grid_threshold,
		);

		Scene { dots, links }
	}
}
