//! Particle state and the per-frame stepper.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::ParticleConfig;
use super::palette::ThemePalette;

/// A single drifting particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Horizontal position in canvas pixels.
	pub x: f64,
	/// Vertical position in canvas pixels.
	pub y: f64,
	/// Horizontal velocity in pixels per frame.
	pub vx: f64,
	/// Vertical velocity in pixels per frame.
	pub vy: f64,
	/// Base radius before the pulse.
	pub size: f64,
	/// Index into the theme palette. Stable across theme changes.
	pub color_index: usize,
	/// Phase of the radius pulse.
	pub pulse_offset: f64,
}

/// Uniform sample in `[0, 1)`.
fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
	rng.gen_range(0.0..1.0)
}

impl Particle {
	/// Random particle somewhere on a `width` x `height` canvas.
	pub fn random<R: Rng + ?Sized>(
		config: &ParticleConfig,
		palette_len: usize,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let color_index = rng.gen_range(0..palette_len.max(1));
		Self {
			x: unit(rng) * width,
			y: unit(rng) * height,
			vx: (unit(rng) - 0.5) * config.speed,
			vy: (unit(rng) - 0.5) * config.speed,
			size: unit(rng) * config.particle_size + 1.0,
			color_index,
			pulse_offset: unit(rng) * TAU,
		}
	}

	/// Velocity magnitude.
	pub fn speed(&self) -> f64 {
		(self.vx * self.vx + self.vy * self.vy).sqrt()
	}

	/// Advances one frame: cursor repulsion, damping, speed limits, motion, wraparound.
	pub fn step<R: Rng + ?Sized>(
		&mut self,
		mouse: Option<(f64, f64)>,
		config: &ParticleConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) {
		if let Some((mx, my)) = mouse {
			let (dx, dy) = (self.x - mx, self.y - my);
			let distance = (dx * dx + dy * dy).sqrt();
			if distance < config.mouse_radius && distance > 0.0 {
				let force = (config.mouse_radius - distance) / config.mouse_radius;
				self.vx += dx / distance * force * config.mouse_force;
				self.vy += dy / distance * force * config.mouse_force;
			}
		}

		self.vx *= config.damping;
		self.vy *= config.damping;

		let min_speed = config.min_speed();
		if self.speed() < min_speed {
			let angle = rng.gen_range(0.0..TAU);
			self.vx += angle.cos() * config.stall_impulse;
			self.vy += angle.sin() * config.stall_impulse;

			// The nudge alone may not be enough to leave the stall band.
			let speed = self.speed();
			if speed < min_speed {
				if speed > 0.0 {
					let scale = min_speed / speed;
					self.vx *= scale;
					self.vy *= scale;
				} else {
					self.vx = angle.cos() * min_speed;
					self.vy = angle.sin() * min_speed;
				}
			}
		}

		let speed = self.speed();
		if speed > config.max_speed {
			self.vx = self.vx / speed * config.max_speed;
			self.vy = self.vy / speed * config.max_speed;
		}

		self.x += self.vx;
		self.y += self.vy;

		self.wrap(width, height, config.wrap_margin);
	}

	/// Moves a particle that left the canvas by more than `margin` to the opposite edge.
	pub fn wrap(&mut self, width: f64, height: f64, margin: f64) {
		if self.x < -margin {
			self.x = width + margin;
		} else if self.x > width + margin {
			self.x = -margin;
		}
		if self.y < -margin {
			self.y = height + margin;
		} else if self.y > height + margin {
			self.y = -margin;
		}
	}

	/// Radius at `time` (milliseconds) including the pulse.
	pub fn pulse_radius(&self, time: f64, config: &ParticleConfig) -> f64 {
		self.size * (1.0 + config.pulse_amplitude * (time * config.pulse_rate + self.pulse_offset).sin())
	}
}

/// Fixed-size collection of particles, regenerated wholesale.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
	particles: Vec<Particle>,
}

impl ParticleStore {
	/// Fills a new store with `count` random particles colored from `palette`.
	pub fn create<R: Rng + ?Sized>(
		count: usize,
		palette: &ThemePalette,
		config: &ParticleConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let particles = (0..count)
			.map(|_| Particle::random(config, palette.colors.len(), width, height, rng))
			.collect();
		Self { particles }
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Whether the store holds no particles.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Particles in creation order.
	pub fn as_slice(&self) -> &[Particle] {
		&self.particles
	}

	/// Mutable iteration for the stepper.
	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
		self.particles.iter_mut()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn still(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
		Particle {
			x,
			y,
			vx,
			vy,
			size: 2.0,
			color_index: 0,
			pulse_offset: 0.0,
		}
	}

	#[test]
	fn create_fills_store_with_valid_color_indices() {
		let mut rng = StdRng::seed_from_u64(7);
		let config = ParticleConfig::default();
		let store =
			ParticleStore::create(100, &ThemePalette::default(), &config, 800.0, 600.0, &mut rng);

		assert_eq!(store.len(), 100);
		for p in store.as_slice() {
			assert!(p.color_index < ThemePalette::LEN);
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!((1.0..3.5).contains(&p.size));
			assert!(p.vx.abs() <= config.speed / 2.0);
			assert!((0.0..TAU).contains(&p.pulse_offset));
		}
	}

	#[test]
	fn same_seed_gives_same_particles() {
		let config = ParticleConfig::default();
		let palette = ThemePalette::default();
		let a = ParticleStore::create(
			20,
			&palette,
			&config,
			640.0,
			480.0,
			&mut StdRng::seed_from_u64(3),
		);
		let b = ParticleStore::create(
			20,
			&palette,
			&config,
			640.0,
			480.0,
			&mut StdRng::seed_from_u64(3),
		);
		assert_eq!(a.as_slice(), b.as_slice());
	}

	#[test]
	fn speed_stays_within_limits_across_many_frames() {
		let config = ParticleConfig::default();
		let mut rng = StdRng::seed_from_u64(11);
		let mut store =
			ParticleStore::create(100, &ThemePalette::default(), &config, 500.0, 400.0, &mut rng);
		let eps = 1e-9;

		for frame in 0..300 {
			// Sweep the cursor across the canvas to exercise repulsion.
			let mouse = Some(((frame as f64 * 7.0) % 500.0, (frame as f64 * 3.0) % 400.0));
			for p in store.iter_mut() {
				p.step(mouse, &config, 500.0, 400.0, &mut rng);
				let speed = p.speed();
				assert!(speed >= config.min_speed() - eps, "stalled at {}", speed);
				assert!(speed <= config.max_speed + eps, "too fast at {}", speed);
			}
		}
	}

	#[test]
	fn motionless_particle_is_kicked_to_min_speed() {
		let config = ParticleConfig::default();
		let mut rng = StdRng::seed_from_u64(1);
		let mut p = still(100.0, 100.0, 0.0, 0.0);
		p.step(None, &config, 400.0, 400.0, &mut rng);
		assert!((p.speed() - config.min_speed()).abs() < 1e-9);
	}

	#[test]
	fn fast_particle_is_capped() {
		let config = ParticleConfig::default();
		let mut rng = StdRng::seed_from_u64(1);
		let mut p = still(100.0, 100.0, 10.0, 0.0);
		p.step(None, &config, 400.0, 400.0, &mut rng);
		assert!((p.speed() - config.max_speed).abs() < 1e-9);
		assert!((p.x - 101.5).abs() < 1e-9);
	}

	#[test]
	fn cursor_pushes_particles_away() {
		let config = ParticleConfig::default();
		let mut rng = StdRng::seed_from_u64(1);
		let mut p = still(110.0, 100.0, 0.3, 0.0);
		p.step(Some((100.0, 100.0)), &config, 400.0, 400.0, &mut rng);
		// Repulsion along +x: (150 - 10) / 150 * 0.03 added before damping.
		let expected_vx = (0.3 + 140.0 / 150.0 * 0.03) * 0.99;
		assert!((p.vx - expected_vx).abs() < 1e-12);
		assert_eq!(p.vy, 0.0);
	}

	#[test]
	fn cursor_outside_radius_has_no_effect() {
		let config = ParticleConfig::default();
		let mut rng = StdRng::seed_from_u64(1);
		let mut p = still(300.0, 100.0, 0.3, 0.0);
		p.step(Some((100.0, 100.0)), &config, 400.0, 400.0, &mut rng);
		assert!((p.vx - 0.3 * 0.99).abs() < 1e-12);
	}

	#[test]
	fn stepping_past_each_edge_wraps_to_the_other_side() {
		let config = ParticleConfig::default();
		let mut rng = StdRng::seed_from_u64(1);
		let (w, h) = (300.0, 200.0);

		let mut left = still(-11.0, 50.0, -0.3, 0.0);
		left.step(None, &config, w, h, &mut rng);
		assert_eq!(left.x, w + 10.0);

		let mut right = still(w + 11.0, 50.0, 0.3, 0.0);
		right.step(None, &config, w, h, &mut rng);
		assert_eq!(right.x, -10.0);

		let mut top = still(50.0, -11.0, 0.0, -0.3);
		top.step(None, &config, w, h, &mut rng);
		assert_eq!(top.y, h + 10.0);

		let mut bottom = still(50.0, h + 11.0, 0.0, 0.3);
		bottom.step(None, &config, w, h, &mut rng);
		assert_eq!(bottom.y, -10.0);
	}

	#[test]
	fn wrap_leaves_particles_inside_the_margin_alone() {
		let mut p = still(-9.0, 205.0, 0.0, 0.0);
		p.wrap(300.0, 200.0, 10.0);
		assert_eq!((p.x, p.y), (-9.0, 205.0));
	}

	#[test]
	fn pulse_radius_swings_twenty_percent() {
		let config = ParticleConfig::default();
		let mut p = still(0.0, 0.0, 0.0, 0.0);
		p.size = 2.0;
		assert!((p.pulse_radius(0.0, &config) - 2.0).abs() < 1e-12);
		p.pulse_offset = std::f64::consts::FRAC_PI_2;
		assert!((p.pulse_radius(0.0, &config) - 2.4).abs() < 1e-12);
	}
}
