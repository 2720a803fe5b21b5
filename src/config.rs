//! Page-level configuration read from the DOM.
//!
//! The host page may embed overrides as JSON:
//!
//! ```html
//! <script id="landing-config" type="application/json">
//!   {"particles": {"count": 60, "line_distance": 150}, "seed": 7}
//! </script>
//! ```
//!
//! Missing fields keep their defaults; a missing or malformed script yields
//! [`LandingConfig::default`].

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::particle_field::ParticleConfig;

/// Id of the optional configuration script element.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Configuration for the whole landing page.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LandingConfig {
	/// Particle background tuning.
	pub particles: ParticleConfig,
	/// Fixed RNG seed for a reproducible particle layout.
	pub seed: Option<u64>,
}

impl LandingConfig {
	/// Parses configuration JSON, filling unspecified fields with defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

/// Reads [`LandingConfig`] from `<script id="landing-config">`, if present.
pub fn load_config() -> LandingConfig {
	let Some(text) = config_script_text() else {
		return LandingConfig::default();
	};
	match LandingConfig::from_json(&text) {
		Ok(config) => {
			info!(
				"kornerflag: loaded page config ({} particles, seed {:?})",
				config.particles.count, config.seed
			);
			config
		}
		Err(e) => {
			warn!("kornerflag: failed to parse page config: {}", e);
			LandingConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
