//! Particle simulation: bouncing points, pointer repulsion and proximity lines.

use rand::distributions::Standard;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::ParticleConfig;

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
}

/// Current pointer (mouse or first touch) position in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

/// Which pass a [`Segment`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
	/// Between two particles.
	Pair,
	/// From a particle to the pointer.
	Pointer,
}

/// A connecting line to draw this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
	pub kind: SegmentKind,
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub opacity: f64,
}

/// Opacity of a proximity line, fading linearly from `max` at distance 0 to
/// nothing at `threshold`. Returns `None` when no line should be drawn.
pub fn line_opacity(dist: f64, threshold: f64, max: f64) -> Option<f64> {
	if threshold <= 0.0 || dist.is_nan() || dist >= threshold {
		return None;
	}
	Some((1.0 - dist / threshold) * max)
}

fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
	let (dx, dy) = (ax - bx, ay - by);
	(dx * dx + dy * dy).sqrt()
}

fn unit(rng: &mut StdRng) -> f64 {
	rng.sample(Standard)
}

/// Owns every particle plus the pointer and viewport state they react to.
///
/// Event handlers call [`set_pointer`](Self::set_pointer),
/// [`clear_pointer`](Self::clear_pointer) and [`resize`](Self::resize); the
/// animation loop calls [`update`](Self::update) then renders once per frame.
pub struct ParticleField {
	pub particles: Vec<Particle>,
	config: ParticleConfig,
	pointer: Option<Pointer>,
	width: f64,
	height: f64,
	rng: StdRng,
}

impl ParticleField {
	/// Create a field seeded from the platform's entropy source.
	pub fn from_entropy(config: ParticleConfig, width: f64, height: f64) -> Self {
		Self::new(config, width, height, StdRng::from_entropy())
	}

	pub fn new(config: ParticleConfig, width: f64, height: f64, rng: StdRng) -> Self {
		let mut field = Self {
			particles: Vec::with_capacity(config.particle_count),
			config,
			pointer: None,
			width: width.max(0.0),
			height: height.max(0.0),
			rng,
		};
		field.reset();
		field
	}

	/// Discard every particle and spawn a fresh set inside the current bounds.
	fn reset(&mut self) {
		let count = self.config.particle_count;
		let (speed, size, size_min) = (
			self.config.speed,
			self.config.particle_size,
			self.config.particle_size_min,
		);

		self.particles.clear();
		for _ in 0..count {
			let x = unit(&mut self.rng) * self.width;
			let y = unit(&mut self.rng) * self.height;
			let vx = (unit(&mut self.rng) - 0.5) * speed;
			let vy = (unit(&mut self.rng) - 0.5) * speed;
			let size = unit(&mut self.rng) * size + size_min;
			self.particles.push(Particle { x, y, vx, vy, size });
		}
	}

	/// Adopt new viewport bounds and respawn every particle. Existing
	/// positions are not rescaled.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width.max(0.0);
		self.height = height.max(0.0);
		self.reset();
	}

	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = Some(Pointer { x, y });
	}

	pub fn clear_pointer(&mut self) {
		self.pointer = None;
	}

	pub fn pointer(&self) -> Option<Pointer> {
		self.pointer
	}

	pub fn config(&self) -> &ParticleConfig {
		&self.config
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	/// Advance every particle by one frame.
	///
	/// Velocity flips whenever a particle sits outside an edge, regardless of
	/// which way it is travelling. Pointer repulsion moves the particle
	/// directly and never touches its velocity.
	pub fn update(&mut self) {
		let (width, height) = (self.width, self.height);
		let reach = self.config.pointer_distance;
		let strength = self.config.repulsion_strength;

		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;

			if p.x < 0.0 || p.x > width {
				p.vx = -p.vx;
			}
			if p.y < 0.0 || p.y > height {
				p.vy = -p.vy;
			}

			if let Some(pointer) = self.pointer {
				let (dx, dy) = (p.x - pointer.x, p.y - pointer.y);
				let dist = (dx * dx + dy * dy).sqrt();
				if dist < reach && dist > 0.0 {
					let force = (reach - dist) / reach;
					p.x += dx / dist * force * strength;
					p.y += dy / dist * force * strength;
				}
			}

			p.x = p.x.clamp(0.0, width);
			p.y = p.y.clamp(0.0, height);
		}
	}

	/// Every line to draw this frame: particle pairs first, then pointer links.
	pub fn segments(&self) -> Vec<Segment> {
		let mut segments = Vec::new();
		let config = &self.config;

		for (i, a) in self.particles.iter().enumerate() {
			for b in &self.particles[i + 1..] {
				let dist = distance(a.x, a.y, b.x, b.y);
				if let Some(opacity) = line_opacity(dist, config.line_distance, config.line_opacity)
				{
					segments.push(Segment {
						kind: SegmentKind::Pair,
						x1: a.x,
						y1: a.y,
						x2: b.x,
						y2: b.y,
						opacity,
					});
				}
			}
		}

		if let Some(pointer) = self.pointer {
			for p in &self.particles {
				let dist = distance(p.x, p.y, pointer.x, pointer.y);
				if let Some(opacity) = line_opacity(
					dist,
					config.pointer_distance,
					config.pointer_line_opacity,
				) {
					segments.push(Segment {
						kind: SegmentKind::Pointer,
						x1: p.x,
						y1: p.y,
						x2: pointer.x,
						y2: pointer.y,
						opacity,
					});
				}
			}
		}

		segments
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const EPS: f64 = 1e-9;

	fn field(config: ParticleConfig, width: f64, height: f64) -> ParticleField {
		ParticleField::new(config, width, height, StdRng::seed_from_u64(7))
	}

	fn place(field: &mut ParticleField, particles: Vec<Particle>) {
		field.particles = particles;
	}

	fn still(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			size: 1.0,
		}
	}

	#[test]
	fn spawns_configured_count_within_bounds() {
		let f = field(ParticleConfig::default(), 800.0, 600.0);
		assert_eq!(f.particles.len(), 50);
		let speed = f.config().speed;
		for p in &f.particles {
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
			assert!(p.vx.abs() <= speed / 2.0);
			assert!(p.vy.abs() <= speed / 2.0);
			assert!(p.size >= 0.5 && p.size < 2.5);
		}
	}

	#[test]
	fn same_seed_gives_same_field() {
		let a = field(ParticleConfig::default(), 640.0, 480.0);
		let b = field(ParticleConfig::default(), 640.0, 480.0);
		assert_eq!(a.particles, b.particles);
	}

	#[test]
	fn positions_stay_in_bounds_over_many_frames() {
		let config = ParticleConfig {
			speed: 40.0,
			..ParticleConfig::default()
		};
		let mut f = field(config, 300.0, 200.0);
		f.set_pointer(150.0, 100.0);
		for _ in 0..2_000 {
			f.update();
			for p in &f.particles {
				assert!((0.0..=300.0).contains(&p.x), "x out of bounds: {}", p.x);
				assert!((0.0..=200.0).contains(&p.y), "y out of bounds: {}", p.y);
			}
		}
	}

	#[test]
	fn crossing_an_edge_reflects_velocity() {
		let mut f = field(ParticleConfig::default(), 100.0, 100.0);
		place(
			&mut f,
			vec![Particle {
				x: 99.5,
				y: 0.2,
				vx: 1.0,
				vy: -0.5,
				size: 1.0,
			}],
		);
		f.update();
		let p = &f.particles[0];
		assert_eq!(p.vx, -1.0);
		assert_eq!(p.vy, 0.5);
		assert_eq!(p.x, 100.0);
		assert_eq!(p.y, 0.0);
	}

	#[test]
	fn zero_speed_without_pointer_keeps_positions() {
		let config = ParticleConfig {
			particle_count: 3,
			speed: 0.0,
			..ParticleConfig::default()
		};
		let mut f = field(config, 500.0, 400.0);
		assert_eq!(f.particles.len(), 3);
		let before = f.particles.clone();
		f.update();
		assert_eq!(f.particles, before);
	}

	#[test]
	fn no_pointer_means_only_base_motion() {
		let mut f = field(ParticleConfig::default(), 500.0, 500.0);
		place(
			&mut f,
			vec![Particle {
				x: 250.0,
				y: 250.0,
				vx: 0.1,
				vy: -0.1,
				size: 1.0,
			}],
		);
		f.update();
		let p = &f.particles[0];
		assert!((p.x - 250.1).abs() < EPS);
		assert!((p.y - 249.9).abs() < EPS);
		assert_eq!((p.vx, p.vy), (0.1, -0.1));
	}

	#[test]
	fn pointer_pushes_nearby_particle_away() {
		let mut f = field(ParticleConfig::default(), 500.0, 500.0);
		place(&mut f, vec![still(250.0, 250.0), still(10.0, 10.0)]);
		f.set_pointer(200.0, 250.0);
		f.update();

		// dist 50 of 100 gives force 0.5, scaled by the 1.5 strength.
		let near = &f.particles[0];
		assert!((near.x - 250.75).abs() < EPS);
		assert!((near.y - 250.0).abs() < EPS);
		assert_eq!((near.vx, near.vy), (0.0, 0.0));

		assert_eq!(f.particles[1], still(10.0, 10.0));
	}

	#[test]
	fn pointer_on_top_of_particle_is_skipped() {
		let mut f = field(ParticleConfig::default(), 500.0, 500.0);
		place(&mut f, vec![still(120.0, 80.0)]);
		f.set_pointer(120.0, 80.0);
		f.update();
		let p = &f.particles[0];
		assert!(p.x.is_finite() && p.y.is_finite());
		assert_eq!(*p, still(120.0, 80.0));
	}

	#[test]
	fn clearing_pointer_stops_repulsion() {
		let mut f = field(ParticleConfig::default(), 500.0, 500.0);
		place(&mut f, vec![still(250.0, 250.0)]);
		f.set_pointer(240.0, 250.0);
		f.clear_pointer();
		assert_eq!(f.pointer(), None);
		f.update();
		assert_eq!(f.particles[0], still(250.0, 250.0));
	}

	#[test]
	fn resize_respawns_inside_new_bounds() {
		let mut f = field(ParticleConfig::default(), 1920.0, 1080.0);
		f.particles.truncate(10);
		f.resize(320.0, 240.0);
		assert_eq!(f.particles.len(), 50);
		assert_eq!((f.width(), f.height()), (320.0, 240.0));
		for p in &f.particles {
			assert!((0.0..=320.0).contains(&p.x));
			assert!((0.0..=240.0).contains(&p.y));
		}
	}

	#[test]
	fn degenerate_viewport_does_not_panic() {
		let mut f = field(ParticleConfig::default(), -10.0, 0.0);
		f.update();
		assert!(f.particles.iter().all(|p| p.x == 0.0 && p.y == 0.0));
	}

	#[test]
	fn line_opacity_fades_with_distance() {
		let opacity = line_opacity(30.0, 120.0, 0.15).unwrap();
		assert!((opacity - 0.75 * 0.15).abs() < EPS);
		assert_eq!(line_opacity(120.0, 120.0, 0.15), None);
		assert_eq!(line_opacity(200.0, 120.0, 0.15), None);
		assert_eq!(line_opacity(0.0, 0.0, 0.15), None);
	}

	#[test]
	fn pair_lines_only_for_close_particles() {
		let mut f = field(ParticleConfig::default(), 500.0, 500.0);
		place(
			&mut f,
			vec![still(0.0, 0.0), still(60.0, 80.0), still(400.0, 400.0)],
		);
		let segments = f.segments();
		assert_eq!(segments.len(), 1);
		let s = segments[0];
		assert_eq!(s.kind, SegmentKind::Pair);
		assert_eq!((s.x1, s.y1, s.x2, s.y2), (0.0, 0.0, 60.0, 80.0));
		// dist 100 of 120
		assert!((s.opacity - (1.0 - 100.0 / 120.0) * 0.15).abs() < EPS);
	}

	#[test]
	fn pointer_lines_follow_pair_lines() {
		let mut f = field(ParticleConfig::default(), 500.0, 500.0);
		place(&mut f, vec![still(100.0, 100.0), still(150.0, 100.0)]);
		f.set_pointer(100.0, 160.0);
		let segments = f.segments();
		let kinds: Vec<_> = segments.iter().map(|s| s.kind).collect();
		assert_eq!(kinds, vec![SegmentKind::Pair, SegmentKind::Pointer, SegmentKind::Pointer]);

		let first = segments[1];
		assert_eq!((first.x2, first.y2), (100.0, 160.0));
		assert!((first.opacity - 0.4 * 0.5).abs() < EPS);
	}
}
