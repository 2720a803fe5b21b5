//! UI components of the landing page.

pub mod analysis;
pub mod effects;
pub mod navbar;
pub mod particle_field;
pub mod theme;
