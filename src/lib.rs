//! particle-web: marketing site front-end with an interactive particle background.
//!
//! This crate provides a WASM-based page shell that mounts a full-viewport
//! particle web behind the content, plus the small page behaviours the site
//! relies on (sticky navigation, smooth anchor scrolling, fade-in on scroll).

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Pulled in for its `js` feature, which backs `rand`'s entropy on wasm.
use getrandom as _;

pub mod components;
pub mod site;

pub use components::particle_field::{ParticleConfig, ParticleField, ParticleFieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-web: logging initialized");
}

/// Parse a particle config, falling back to defaults when the JSON is invalid.
pub fn parse_config(json: &str) -> ParticleConfig {
	match ParticleConfig::from_json(json) {
		Ok(config) => {
			info!(
				"particle-web: loaded config with {} particles",
				config.particle_count
			);
			config
		}
		Err(e) => {
			warn!("particle-web: failed to parse particle config: {}", e);
			ParticleConfig::default()
		}
	}
}

/// Load the particle config from a script element with id="particle-config".
/// Expected format: JSON object with any subset of [`ParticleConfig`] fields.
fn load_config() -> Option<ParticleConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	Some(parse_config(&json_text))
}

/// Main application component.
/// Mounts the particle background and installs the page behaviours.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config().unwrap_or_default();

	// Runs once the view is in the DOM so the page hooks can find their elements.
	Effect::new(move |_| site::init());

	view! {
		<Title text="Particle Web" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas config=config />
	}
}
