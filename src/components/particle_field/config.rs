//! Tunable parameters for the particle network.
//!
//! All distances are in canvas pixels and all speeds in pixels per frame. The
//! stepper advances particles once per display refresh, not per second, so
//! the values below assume roughly 60 frames per second.

use serde::Deserialize;

/// Parameters shared by particle creation, stepping, and link drawing.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
	/// Number of particles in the store.
	pub count: usize,
	/// Upper bound of the random part of a particle's radius (radius is `rand * size + 1`).
	pub particle_size: f64,
	/// Links are drawn between particles strictly closer than this.
	pub line_distance: f64,
	/// Base speed. Initial velocity components lie in `[-speed/2, speed/2)`.
	pub speed: f64,
	/// Radius around the cursor inside which particles are pushed away.
	pub mouse_radius: f64,
	/// Peak repulsion added to velocity when a particle sits on the cursor.
	pub mouse_force: f64,
	/// Multiplicative velocity decay applied every frame.
	pub damping: f64,
	/// Hard cap on speed after a step.
	pub max_speed: f64,
	/// Magnitude of the random nudge given to a stalling particle.
	pub stall_impulse: f64,
	/// How far outside the canvas a particle travels before wrapping.
	pub wrap_margin: f64,
	/// Relative amplitude of the radius pulse (0.2 = ±20%).
	pub pulse_amplitude: f64,
	/// Pulse angular rate per millisecond of frame time.
	pub pulse_rate: f64,
	/// Above this many particles, link candidates come from a uniform grid.
	pub grid_threshold: usize,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			count: 100,
			particle_size: 2.5,
			line_distance: 180.0,
			speed: 0.4,
			mouse_radius: 150.0,
			mouse_force: 0.03,
			damping: 0.99,
			max_speed: 1.5,
			stall_impulse: 0.01,
			wrap_margin: 10.0,
			pulse_amplitude: 0.2,
			pulse_rate: 0.002,
			grid_threshold: 250,
		}
	}
}

impl ParticleConfig {
	/// Speed below which a particle counts as stalled.
	pub fn min_speed(&self) -> f64 {
		self.speed * 0.5
	}
}
