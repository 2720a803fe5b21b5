//! Browser wiring for the theme controller: `localStorage`, the
//! `prefers-color-scheme` media query, the `data-theme` attribute, and the
//! `themechange` event.

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, MediaQueryList, MediaQueryListEvent, Storage};

use super::controller::{PreferenceStore, STORAGE_KEY, ThemeController, ThemeMode};
use crate::error::DomError;

/// Name of the window event dispatched on every theme change.
pub const THEME_CHANGE_EVENT: &str = "themechange";

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

/// `window.localStorage`-backed preference store.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl BrowserStore {
	fn storage() -> Option<Storage> {
		web_sys::window()?.local_storage().ok().flatten()
	}
}

impl PreferenceStore for BrowserStore {
	fn load(&self) -> Option<ThemeMode> {
		Self::storage()?
			.get_item(STORAGE_KEY)
			.ok()
			.flatten()?
			.parse()
			.ok()
	}

	fn save(&self, mode: ThemeMode) {
		match Self::storage() {
			Some(storage) => {
				if let Err(e) = storage.set_item(STORAGE_KEY, mode.as_str()) {
					warn!("kornerflag: failed to persist theme: {:?}", e);
				}
			}
			None => warn!("kornerflag: localStorage unavailable, theme not persisted"),
		}
	}
}

fn system_query() -> Option<MediaQueryList> {
	web_sys::window()?.match_media(DARK_QUERY).ok().flatten()
}

/// Sets `data-theme` on `<html>` and dispatches `themechange` with `{ theme }`.
fn apply_to_document(mode: ThemeMode) -> Result<(), DomError> {
	let window = web_sys::window().ok_or(DomError::NoWindow)?;
	let document = window.document().ok_or(DomError::NoDocument)?;
	if let Some(root) = document.document_element() {
		root.set_attribute("data-theme", mode.as_str())
			.map_err(|e| DomError::js("set data-theme", e))?;
	}

	let detail = js_sys::Object::new();
	js_sys::Reflect::set(
		&detail,
		&JsValue::from_str("theme"),
		&JsValue::from_str(mode.as_str()),
	)
	.map_err(|e| DomError::js("build themechange detail", e))?;
	let init = CustomEventInit::new();
	init.set_detail(&detail);
	let event = CustomEvent::new_with_event_init_dict(THEME_CHANGE_EVENT, &init)
		.map_err(|e| DomError::js("create themechange", e))?;
	window
		.dispatch_event(&event)
		.map_err(|e| DomError::js("dispatch themechange", e))?;
	Ok(())
}

/// Theme state shared through Leptos context.
#[derive(Clone, Copy)]
pub struct ThemeContext {
	/// Current theme; updated after the document attribute changes.
	pub mode: ReadSignal<ThemeMode>,
	controller: StoredValue<ThemeController<BrowserStore>, LocalStorage>,
}

impl ThemeContext {
	/// Explicit user toggle. Persists the new theme.
	pub fn toggle(&self) {
		self.controller.update_value(|c| {
			c.toggle();
		});
	}
}

/// Creates the theme controller, applies the initial theme, follows the
/// system preference, and provides a [`ThemeContext`].
pub fn provide_theme() -> ThemeContext {
	let system_dark = system_query().map(|q| q.matches()).unwrap_or(false);
	let mut controller = ThemeController::new(BrowserStore, system_dark);
	let (mode, set_mode) = signal(controller.current());

	controller.subscribe(move |m| {
		if let Err(e) = apply_to_document(m) {
			warn!("kornerflag: failed to apply theme {}: {}", m, e);
		}
		set_mode.set(m);
	});
	controller.apply_current();
	info!("kornerflag: initial theme {}", controller.current());

	let controller = StoredValue::new_local(controller);

	if let Some(query) = system_query() {
		let on_change = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
			move |ev: MediaQueryListEvent| {
				controller.update_value(|c| {
					c.system_preference_changed(ev.matches());
				});
			},
		);
		if query
			.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
			.is_ok()
		{
			// Lives as long as the page.
			on_change.forget();
		}
	}

	let context = ThemeContext { mode, controller };
	provide_context(context);
	context
}

/// Button flipping between light and dark.
#[component]
pub fn ThemeToggle() -> impl IntoView {
	let theme = expect_context::<ThemeContext>();
	let label = move || match theme.mode.get() {
		ThemeMode::Dark => "Switch to light theme",
		ThemeMode::Light => "Switch to dark theme",
	};

	view! {
		<button
			id="themeToggle"
			class="theme-toggle"
			aria-label=label
			on:click=move |_| theme.toggle()
		>
			{move || if theme.mode.get() == ThemeMode::Dark { "☀" } else { "☾" }}
		</button>
	}
}
