//! Light/dark theme handling.
//!
//! [`controller`] holds the browser-independent state machine: the current
//! mode, the persisted preference, and subscribers. [`web`] binds it to
//! `localStorage`, the `prefers-color-scheme` media query, and the document.

pub mod controller;
mod web;

pub use controller::{MemoryStore, PreferenceStore, ThemeController, ThemeMode, preferred_theme};
pub use web::{BrowserStore, THEME_CHANGE_EVENT, ThemeContext, ThemeToggle, provide_theme};
