//! Tuning parameters for the particle web.
//!
//! All distances are in CSS pixels and all speeds in pixels per frame. The
//! defaults reproduce the site's shipped look; pages can override any subset
//! of fields through a JSON config block.

use log::warn;
use serde::Deserialize;

use super::color::Color;

/// Particle field configuration. Immutable for the lifetime of a field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
	/// Number of particles kept alive at all times.
	pub particle_count: usize,
	pub particle_color: Color,
	/// Color of lines between neighbouring particles.
	pub line_color: Color,
	/// Color of lines from particles to the pointer.
	pub pointer_line_color: Color,
	/// Width of the radius range. Radii fall in `[particle_size_min, particle_size_min + particle_size)`.
	pub particle_size: f64,
	pub particle_size_min: f64,
	/// Pairs closer than this are connected.
	pub line_distance: f64,
	/// Particles closer than this to the pointer are repelled and linked to it.
	pub pointer_distance: f64,
	/// Each velocity component is drawn from `[-speed / 2, speed / 2]`.
	pub speed: f64,
	pub line_opacity: f64,
	pub particle_opacity: f64,
	pub pointer_line_opacity: f64,
	/// Peak displacement in pixels applied to a particle touching the pointer.
	pub repulsion_strength: f64,
	pub line_width: f64,
	pub pointer_line_width: f64,
}

impl Default for ParticleConfig {
	fn default() -> Self {
		Self {
			particle_count: 50,
			particle_color: Color::rgb(168, 85, 247),
			line_color: Color::rgb(168, 85, 247),
			pointer_line_color: Color::rgb(251, 191, 36),
			particle_size: 2.0,
			particle_size_min: 0.5,
			line_distance: 120.0,
			pointer_distance: 100.0,
			speed: 0.3,
			line_opacity: 0.15,
			particle_opacity: 0.4,
			pointer_line_opacity: 0.5,
			repulsion_strength: 1.5,
			line_width: 0.5,
			pointer_line_width: 1.0,
		}
	}
}

fn non_negative(name: &str, value: f64) -> f64 {
	if value.is_finite() && value >= 0.0 {
		value
	} else {
		warn!("particle-web: {name} = {value} is invalid, using 0");
		0.0
	}
}

fn unit_interval(name: &str, value: f64) -> f64 {
	if (0.0..=1.0).contains(&value) {
		value
	} else {
		let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
		warn!("particle-web: {name} = {value} is outside 0..=1, using {clamped}");
		clamped
	}
}

impl ParticleConfig {
	/// Parse a config from JSON. Missing fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<Self>(json).map(Self::sanitized)
	}

	/// Replace negative or non-finite sizes, distances and speeds with zero and
	/// clamp opacities into `0..=1`.
	pub fn sanitized(self) -> Self {
		Self {
			particle_size: non_negative("particle_size", self.particle_size),
			particle_size_min: non_negative("particle_size_min", self.particle_size_min),
			line_distance: non_negative("line_distance", self.line_distance),
			pointer_distance: non_negative("pointer_distance", self.pointer_distance),
			speed: non_negative("speed", self.speed),
			repulsion_strength: non_negative("repulsion_strength", self.repulsion_strength),
			line_width: non_negative("line_width", self.line_width),
			pointer_line_width: non_negative("pointer_line_width", self.pointer_line_width),
			line_opacity: unit_interval("line_opacity", self.line_opacity),
			particle_opacity: unit_interval("particle_opacity", self.particle_opacity),
			pointer_line_opacity: unit_interval("pointer_line_opacity", self.pointer_line_opacity),
			..self
		}
	}
}
