//! Interactive particle web background.
//!
//! Renders drifting particles on a full-viewport canvas with:
//! - Elastic bouncing off the viewport edges
//! - Fading lines between nearby particles
//! - Pointer and touch repulsion, with lines drawn to the pointer
//! - Full respawn on window resize
//!
//! # Example
//!
//! ```ignore
//! use particle_web::{ParticleConfig, ParticleFieldCanvas};
//!
//! let config = ParticleConfig { particle_count: 80, ..ParticleConfig::default() };
//!
//! view! { <ParticleFieldCanvas config=config /> }
//! ```

mod animation;
pub mod color;
mod component;
pub mod config;
pub mod particles;
pub mod render;

pub use animation::AnimationLoop;
pub use color::Color;
pub use component::ParticleFieldCanvas;
pub use config::ParticleConfig;
pub use particles::{Particle, ParticleField, Pointer, Segment, SegmentKind, line_opacity};
pub use render::{Surface, render};
