//! Animated particle network background.
//!
//! Renders drifting particles on a full-viewport canvas with:
//! - Proximity links whose opacity fades with distance
//! - Gentle repulsion away from the mouse cursor
//! - Colors taken from the active light/dark theme
//! - A per-particle radius pulse
//!
//! Simulation ([`ParticleField`]) is independent of the DOM and advances one
//! frame per call, so it can be stepped deterministically with a seed.
//!
//! # Example
//!
//! ```ignore
//! use kornerflag_landing::components::particle_field::{ParticleConfig, ParticleFieldCanvas};
//!
//! let config = ParticleConfig { count: 60, ..ParticleConfig::default() };
//! view! { <ParticleFieldCanvas config=config /> }
//! ```

mod component;
pub mod config;
pub mod links;
pub mod palette;
pub mod particles;
mod render;
pub mod state;

pub use component::ParticleFieldCanvas;
pub use config::ParticleConfig;
pub use links::Link;
pub use palette::{Color, PaletteColor, ThemePalette};
pub use particles::{Particle, ParticleStore};
pub use state::{CancelToken, Dot, ParticleField, Scene};
