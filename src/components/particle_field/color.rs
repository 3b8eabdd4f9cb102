//! RGBA colors for particles and connecting lines.

use serde::Deserialize;

/// RGBA color representation.
///
/// Deserializes from a JSON `[r, g, b]` triple; alpha is applied per draw call
/// since particles, pair lines and pointer lines each carry their own opacity.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

impl From<[u8; 3]> for Color {
	fn from([r, g, b]: [u8; 3]) -> Self {
		Self::rgb(r, g, b)
	}
}
