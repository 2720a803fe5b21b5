//! Proximity links between particles.
//!
//! Every unordered pair closer than the link distance gets a line whose
//! opacity fades linearly to zero at the threshold. Small stores are scanned
//! pairwise; larger ones bucket particles into a uniform grid whose cell size
//! equals the threshold, so only neighbouring cells are compared.

use std::collections::HashMap;

use super::particles::Particle;

/// A line to draw between two particles of the store.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	/// Index of the first particle (always less than `b`).
	pub a: usize,
	/// Index of the second particle.
	pub b: usize,
	/// Distance between the two particles.
	pub distance: f64,
	/// Stroke opacity after fading.
	pub opacity: f64,
}

/// Linear fade: `line_opacity` at distance zero, zero at `threshold` and beyond.
pub fn fade(distance: f64, threshold: f64, line_opacity: f64) -> f64 {
	(1.0 - distance / threshold).max(0.0) * line_opacity
}

/// Opacity of the link between two particles `distance` apart, if one is drawn at all.
pub fn link_opacity(distance: f64, threshold: f64, line_opacity: f64) -> Option<f64> {
	(distance < threshold).then(|| fade(distance, threshold, line_opacity))
}

fn distance(p: &Particle, q: &Particle) -> f64 {
	let (dx, dy) = (p.x - q.x, p.y - q.y);
	(dx * dx + dy * dy).sqrt()
}

fn push_if_linked(
	links: &mut Vec<Link>,
	particles: &[Particle],
	a: usize,
	b: usize,
	threshold: f64,
	line_opacity: f64,
) {
	let d = distance(&particles[a], &particles[b]);
	if let Some(opacity) = link_opacity(d, threshold, line_opacity) {
		links.push(Link {
			a,
			b,
			distance: d,
			opacity,
		});
	}
}

/// All links, comparing every unordered pair. O(n²).
pub fn pairwise_links(particles: &[Particle], threshold: f64, line_opacity: f64) -> Vec<Link> {
	let mut links = Vec::new();
	for a in 0..particles.len() {
		for b in a + 1..particles.len() {
			push_if_linked(&mut links, particles, a, b, threshold, line_opacity);
		}
	}
	links
}

/// Uniform grid of particle indices keyed by cell coordinates.
struct UniformGrid {
	cell: f64,
	cells: HashMap<(i64, i64), Vec<usize>>,
}

impl UniformGrid {
	fn build(particles: &[Particle], cell: f64) -> Self {
		let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
		for (i, p) in particles.iter().enumerate() {
			cells
				.entry(Self::key(p.x, p.y, cell))
				.or_default()
				.push(i);
		}
		Self { cell, cells }
	}

	fn key(x: f64, y: f64, cell: f64) -> (i64, i64) {
		((x / cell).floor() as i64, (y / cell).floor() as i64)
	}

	/// Indices sharing or bordering the cell of particle `p`.
	fn neighbours(&self, p: &Particle) -> impl Iterator<Item = usize> + '_ {
		let (cx, cy) = Self::key(p.x, p.y, self.cell);
		(-1..=1)
			.flat_map(move |dx| (-1..=1).map(move |dy| (cx + dx, cy + dy)))
			.filter_map(|key| self.cells.get(&key))
			.flatten()
			.copied()
	}
}

/// Same links as [`pairwise_links`], found through a uniform grid.
pub fn grid_links(particles: &[Particle], threshold: f64, line_opacity: f64) -> Vec<Link> {
	if threshold <= 0.0 {
		return Vec::new();
	}
	let grid = UniformGrid::build(particles, threshold);
	let mut links = Vec::new();
	for (a, p) in particles.iter().enumerate() {
		for b in grid.neighbours(p) {
			if b > a {
				push_if_linked(&mut links, particles, a, b, threshold, line_opacity);
			}
		}
	}
	links
}

/// Picks pairwise or grid search depending on the store size.
pub fn collect_links(
	particles: &[Particle],
	threshold: f64,
	line_opacity: f64,
	grid_threshold: usize,
) -> Vec<Link> {
	if particles.len() > grid_threshold {
		grid_links(particles, threshold, line_opacity)
	} else {
		pairwise_links(particles, threshold, line_opacity)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::config::ParticleConfig;
	use crate::components::particle_field::palette::ThemePalette;
	use crate::components::particle_field::particles::ParticleStore;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn at(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			size: 1.0,
			color_index: 0,
			pulse_offset: 0.0,
		}
	}

	#[test]
	fn link_only_below_threshold() {
		assert!(link_opacity(179.999, 180.0, 0.12).is_some());
		assert_eq!(link_opacity(180.0, 180.0, 0.12), None);
		assert_eq!(link_opacity(250.0, 180.0, 0.12), None);
	}

	#[test]
	fn opacity_fades_linearly_from_palette_scale_to_zero() {
		assert_eq!(fade(0.0, 180.0, 0.12), 0.12);
		assert_eq!(fade(180.0, 180.0, 0.12), 0.0);
		assert!((fade(90.0, 180.0, 0.12) - 0.06).abs() < 1e-12);
		assert_eq!(link_opacity(0.0, 180.0, 0.3), Some(0.3));
	}

	#[test]
	fn pairwise_finds_each_close_pair_once() {
		let particles = [at(0.0, 0.0), at(100.0, 0.0), at(400.0, 0.0), at(100.0, 179.0)];
		let links = pairwise_links(&particles, 180.0, 0.12);
		let pairs: Vec<(usize, usize)> = links.iter().map(|l| (l.a, l.b)).collect();
		assert_eq!(pairs, vec![(0, 1), (1, 3)]);
		assert!((links[0].distance - 100.0).abs() < 1e-12);
	}

	#[test]
	fn grid_search_matches_pairwise_search() {
		let config = ParticleConfig::default();
		let mut rng = StdRng::seed_from_u64(99);
		let store =
			ParticleStore::create(400, &ThemePalette::default(), &config, 1920.0, 1080.0, &mut rng);
		let mut particles = store.as_slice().to_vec();
		// Include particles in the wrap margin, where cell keys go negative.
		particles.push(at(-9.0, -9.0));
		particles.push(at(5.0, 5.0));

		let key = |l: &Link| (l.a, l.b);
		let mut brute = pairwise_links(&particles, 180.0, 0.12);
		let mut grid = grid_links(&particles, 180.0, 0.12);
		brute.sort_by_key(key);
		grid.sort_by_key(key);
		assert!(!brute.is_empty());
		assert_eq!(brute, grid);
	}

	#[test]
	fn collect_switches_strategy_above_grid_threshold() {
		let particles = [at(0.0, 0.0), at(10.0, 0.0), at(20.0, 0.0)];
		let small = collect_links(&particles, 180.0, 0.12, 250);
		let mut forced = collect_links(&particles, 180.0, 0.12, 1);
		forced.sort_by_key(|l| (l.a, l.b));
		assert_eq!(small, forced);
		assert_eq!(small.len(), 3);
	}
}
