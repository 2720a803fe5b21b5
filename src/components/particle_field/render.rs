//! Canvas painting for the particle network.
//!
//! Draws a [`Scene`] in two passes: filled particle circles, then gradient
//! links on top.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::palette::ThemePalette;
use super::state::{Dot, Scene};

/// Clears the canvas and paints the scene.
pub fn render(
	scene: &Scene,
	ctx: &CanvasRenderingContext2d,
	palette: &ThemePalette,
	width: f64,
	height: f64,
) {
	ctx.clear_rect(0.0, 0.0, width, height);

	for dot in &scene.dots {
		draw_dot(ctx, palette, dot);
	}

	ctx.set_line_width(1.0);
	for link in &scene.links {
		let (Some(a), Some(b)) = (scene.dots.get(link.a), scene.dots.get(link.b)) else {
			continue;
		};
		draw_link(ctx, palette, a, b, link.opacity);
	}
}

fn draw_dot(ctx: &CanvasRenderingContext2d, palette: &ThemePalette, dot: &Dot) {
	ctx.begin_path();
	let _ = ctx.arc(dot.x, dot.y, dot.radius.max(0.0), 0.0, PI * 2.0);
	ctx.set_fill_style_str(palette.color(dot.color_index).css());
	ctx.fill();
}

fn draw_link(
	ctx: &CanvasRenderingContext2d,
	palette: &ThemePalette,
	a: &Dot,
	b: &Dot,
	opacity: f64,
) {
	let gradient = ctx.create_linear_gradient(a.x, a.y, b.x, b.y);
	let from = palette.color(a.color_index).at_alpha(opacity);
	let to = palette.color(b.color_index).at_alpha(opacity);
	if gradient.add_color_stop(0.0, &from).is_err() || gradient.add_color_stop(1.0, &to).is_err()
	{
		return;
	}

	ctx.begin_path();
	ctx.move_to(a.x, a.y);
	ctx.line_to(b.x, b.y);
	ctx.set_stroke_style_canvas_gradient(&gradient);
	ctx.stroke();
}
