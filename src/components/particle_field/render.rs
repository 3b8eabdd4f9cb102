//! Canvas rendering for the particle web.
//!
//! Drawing goes through the [`Surface`] trait so the frame can be painted to a
//! browser canvas or recorded in tests. Each frame is painted in order:
//! 1. Clear
//! 2. Particles
//! 3. Particle-to-particle lines, then particle-to-pointer lines

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{ParticleField, SegmentKind};

/// Minimal 2D drawing target.
pub trait Surface {
	/// Erase the `width` x `height` area starting at the origin.
	fn clear(&self, width: f64, height: f64);
	/// Fill a circle of `radius` centred on `(x, y)` with a CSS color.
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str);
	/// Stroke a straight line with a CSS color.
	fn stroke_line(&self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: &str);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(color);
		self.fill();
	}

	fn stroke_line(&self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64, color: &str) {
		self.begin_path();
		self.move_to(x1, y1);
		self.line_to(x2, y2);
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.stroke();
	}
}

/// Renders one complete frame of the field.
pub fn render<S: Surface + ?Sized>(field: &ParticleField, surface: &S) {
	let config = field.config();

	surface.clear(field.width(), field.height());

	let particle_css = config
		.particle_color
		.with_alpha(config.particle_opacity)
		.to_css();
	for p in &field.particles {
		surface.fill_circle(p.x, p.y, p.size, &particle_css);
	}

	for s in field.segments() {
		let (color, width) = match s.kind {
			SegmentKind::Pair => (config.line_color, config.line_width),
			SegmentKind::Pointer => (config.pointer_line_color, config.pointer_line_width),
		};
		surface.stroke_line(
			s.x1,
			s.y1,
			s.x2,
			s.y2,
			width,
			&color.with_alpha(s.opacity).to_css(),
		);
	}
}
