//! Light/dark theme state with persistence and change notification.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use log::debug;

/// Storage key of the persisted preference.
pub const STORAGE_KEY: &str = "theme";

/// The two visual themes.
///
/// Stored and exposed to CSS as the lowercase strings `"light"` and `"dark"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
	/// Light backgrounds.
	#[default]
	Light,
	/// Dark backgrounds.
	Dark,
}

impl ThemeMode {
	/// The stored and CSS form, `"light"` or `"dark"`.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
		}
	}

	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			ThemeMode::Light => ThemeMode::Dark,
			ThemeMode::Dark => ThemeMode::Light,
		}
	}

	/// Mode matching a `prefers-color-scheme` result.
	pub fn from_system(prefers_dark: bool) -> Self {
		if prefers_dark {
			ThemeMode::Dark
		} else {
			ThemeMode::Light
		}
	}
}

impl fmt::Display for ThemeMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ThemeMode {
	type Err = ();

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"light" => Ok(ThemeMode::Light),
			"dark" => Ok(ThemeMode::Dark),
			_ => Err(()),
		}
	}
}

/// Key-value persistence for the explicit theme choice.
pub trait PreferenceStore {
	/// The persisted mode, if any valid one is stored.
	fn load(&self) -> Option<ThemeMode>;
	/// Persists an explicit choice.
	fn save(&self, mode: ThemeMode);
}

/// In-memory store. Clones share the same slot, standing in for a page reload.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Rc<RefCell<Option<String>>>);

impl MemoryStore {
	/// Empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Raw stored value, as a browser would hold it.
	pub fn raw(&self) -> Option<String> {
		self.0.borrow().clone()
	}

	/// Overwrites the raw stored value, bypassing parsing.
	pub fn set_raw(&self, value: Option<&str>) {
		*self.0.borrow_mut() = value.map(str::to_string);
	}
}

impl PreferenceStore for MemoryStore {
	fn load(&self) -> Option<ThemeMode> {
		self.0.borrow().as_deref().and_then(|v| v.parse().ok())
	}

	fn save(&self, mode: ThemeMode) {
		*self.0.borrow_mut() = Some(mode.as_str().to_string());
	}
}

type Listener = Box<dyn Fn(ThemeMode)>;

/// Owns the current theme and fans changes out to subscribers.
pub struct ThemeController<S> {
	store: S,
	current: ThemeMode,
	listeners: Vec<Listener>,
}

/// Persisted choice if present, else the system preference.
pub fn preferred_theme<S: PreferenceStore>(store: &S, system_dark: bool) -> ThemeMode {
	store
		.load()
		.unwrap_or_else(|| ThemeMode::from_system(system_dark))
}

impl<S: PreferenceStore> ThemeController<S> {
	/// Controller starting at the preferred theme. Nothing is persisted or
	/// broadcast until [`apply_current`](Self::apply_current) or a mutation.
	pub fn new(store: S, system_dark: bool) -> Self {
		let current = preferred_theme(&store, system_dark);
		Self {
			store,
			current,
			listeners: Vec::new(),
		}
	}

	/// Active mode.
	pub fn current(&self) -> ThemeMode {
		self.current
	}

	/// Backing preference store.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// Registers a listener called with the mode on every change.
	pub fn subscribe(&mut self, listener: impl Fn(ThemeMode) + 'static) {
		self.listeners.push(Box::new(listener));
	}

	fn broadcast(&self) {
		for listener in &self.listeners {
			listener(self.current);
		}
	}

	/// Broadcasts the current theme without persisting it.
	pub fn apply_current(&self) {
		self.broadcast();
	}

	/// Explicit choice: record, persist, broadcast.
	pub fn set_theme(&mut self, mode: ThemeMode) {
		self.current = mode;
		self.store.save(mode);
		debug!("kornerflag: theme set to {}", mode);
		self.broadcast();
	}

	/// Flips the theme and returns the new one.
	pub fn toggle(&mut self) -> ThemeMode {
		let next = self.current.toggled();
		self.set_theme(next);
		next
	}

	/// Follows the OS preference unless the user has made an explicit choice.
	/// Returns whether the theme was applied.
	pub fn system_preference_changed(&mut self, prefers_dark: bool) -> bool {
		if self.store.load().is_some() {
			return false;
		}
		self.current = ThemeMode::from_system(prefers_dark);
		debug!("kornerflag: following system theme {}", self.current);
		self.broadcast();
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn set_theme_survives_a_fresh_load() {
		for mode in [ThemeMode::Light, ThemeMode::Dark] {
			let store = MemoryStore::new();
			let mut controller = ThemeController::new(store.clone(), mode != ThemeMode::Dark);
			controller.set_theme(mode);

			// Fresh load with the opposite system preference.
			assert_eq!(preferred_theme(&store, mode == ThemeMode::Light), mode);
			assert_eq!(store.raw().as_deref(), Some(mode.as_str()));
		}
	}

	#[test]
	fn toggling_twice_restores_the_starting_theme() {
		let mut controller = ThemeController::new(MemoryStore::new(), true);
		let initial = controller.current();
		assert_eq!(controller.toggle(), initial.toggled());
		assert_eq!(controller.toggle(), initial);
	}

	#[test]
	fn falls_back_to_system_preference() {
		assert_eq!(preferred_theme(&MemoryStore::new(), true), ThemeMode::Dark);
		assert_eq!(preferred_theme(&MemoryStore::new(), false), ThemeMode::Light);

		let store = MemoryStore::new();
		store.set_raw(Some("sepia"));
		assert_eq!(preferred_theme(&store, true), ThemeMode::Dark);
	}

	#[test]
	fn initial_apply_does_not_persist() {
		let store = MemoryStore::new();
		let controller = ThemeController::new(store.clone(), true);
		controller.apply_current();
		assert_eq!(store.raw(), None);
	}

	#[test]
	fn subscribers_see_every_change() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut controller = ThemeController::new(MemoryStore::new(), false);
		let sink = seen.clone();
		controller.subscribe(move |mode| sink.borrow_mut().push(mode));

		controller.apply_current();
		controller.toggle();
		controller.set_theme(ThemeMode::Dark);

		assert_eq!(
			*seen.borrow(),
			vec![ThemeMode::Light, ThemeMode::Dark, ThemeMode::Dark]
		);
	}

	#[test]
	fn system_changes_apply_until_user_chooses() {
		let calls = Rc::new(Cell::new(0));
		let mut controller = ThemeController::new(MemoryStore::new(), false);
		let counter = calls.clone();
		controller.subscribe(move |_| counter.set(counter.get() + 1));

		assert!(controller.system_preference_changed(true));
		assert_eq!(controller.current(), ThemeMode::Dark);
		assert_eq!(controller.store().raw(), None);

		controller.set_theme(ThemeMode::Light);
		assert!(!controller.system_preference_changed(true));
		assert_eq!(controller.current(), ThemeMode::Light);
		assert_eq!(calls.get(), 2);
	}

	#[test]
	fn mode_strings_parse_and_display() {
		assert_eq!(ThemeMode::Dark.to_string(), "dark");
		assert_eq!("light".parse::<ThemeMode>(), Ok(ThemeMode::Light));
		assert!("Dark".parse::<ThemeMode>().is_err());
	}
}
