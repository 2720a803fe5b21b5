//! Decorative page effects: cards that fade in when scrolled into view, and
//! a click ripple on `.btn` elements.

use std::time::Duration;

use leptos::leptos_dom::helpers::set_timeout;
use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
	MouseEvent,
};

use crate::error::DomError;

/// Elements that start hidden and are revealed on first sight.
pub const REVEAL_SELECTOR: &str = ".feature-card, .testimonial-card, .pricing-card, .stat-item";
/// Class added once an element has been revealed.
pub const REVEALED_CLASS: &str = "animate-in";
/// Visible fraction of an element that triggers its reveal.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Shrinks the viewport's bottom edge so elements reveal slightly late.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Diameter of a ripple before it scales up.
pub const RIPPLE_SIZE: f64 = 100.0;
/// How long a ripple stays in the DOM.
pub const RIPPLE_LIFETIME: Duration = Duration::from_millis(600);

const HIDDEN_STYLE: [(&str, &str); 3] = [
	("opacity", "0"),
	("transform", "translateY(30px)"),
	("transition", "opacity 0.6s ease, transform 0.6s ease"),
];

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// A running observer and the callback it calls into.
struct RevealObserver {
	observer: IntersectionObserver,
	_callback: EntriesCallback,
}

impl RevealObserver {
	fn start(selector: &str) -> Result<Self, DomError> {
		let document = web_sys::window()
			.ok_or(DomError::NoWindow)?
			.document()
			.ok_or(DomError::NoDocument)?;

		let callback: EntriesCallback = Closure::new(
			move |entries: js_sys::Array, observer: IntersectionObserver| {
				for entry in entries.iter() {
					let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
						continue;
					};
					if !entry.is_intersecting() {
						continue;
					}
					let target = entry.target();
					let _ = target.class_list().add_1(REVEALED_CLASS);
					observer.unobserve(&target);
				}
			},
		);

		let init = IntersectionObserverInit::new();
		init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
		init.set_root_margin(REVEAL_ROOT_MARGIN);
		let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
			.map_err(|e| DomError::js("create IntersectionObserver", e))?;

		let targets = document
			.query_selector_all(selector)
			.map_err(|e| DomError::js("querySelectorAll", e))?;
		for i in 0..targets.length() {
			let Some(el) = targets.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
				continue;
			};
			let style = el.style();
			for (property, value) in HIDDEN_STYLE {
				let _ = style.set_property(property, value);
			}
			observer.observe(&el);
		}
		debug!("kornerflag: revealing {} elements on scroll", targets.length());

		Ok(Self {
			observer,
			_callback: callback,
		})
	}
}

/// Hides [`REVEAL_SELECTOR`] elements until they scroll into view.
///
/// Elements are collected once, after the current view has mounted. The
/// observer is disconnected when the calling owner is cleaned up.
pub fn reveal_on_scroll() {
	let running = StoredValue::new_local(None::<RevealObserver>);

	Effect::new(move |_| {
		if running.with_value(Option::is_some) {
			return;
		}
		match RevealObserver::start(REVEAL_SELECTOR) {
			Ok(observer) => running.set_value(Some(observer)),
			Err(e) => warn!("kornerflag: scroll reveal disabled: {}", e),
		}
	});

	on_cleanup(move || {
		running.try_update_value(|slot| {
			if let Some(reveal) = slot.take() {
				reveal.observer.disconnect();
			}
		});
	});
}

/// Click position relative to the clicked element's top-left corner.
pub fn ripple_origin(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> (f64, f64) {
	(client_x - rect_left, client_y - rect_top)
}

/// Inline style of a ripple centered on `(x, y)`.
pub fn ripple_style(x: f64, y: f64) -> String {
	let half = RIPPLE_SIZE / 2.0;
	format!(
		"position: absolute; background: rgba(255, 255, 255, 0.4); border-radius: 50%; \
		 transform: scale(0); animation: ripple 0.6s ease-out; pointer-events: none; \
		 left: {x}px; top: {y}px; width: {RIPPLE_SIZE}px; height: {RIPPLE_SIZE}px; \
		 margin-left: -{half}px; margin-top: -{half}px;"
	)
}

fn spawn_ripple(ev: &MouseEvent) -> Result<(), DomError> {
	let Some(button) = ev
		.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.and_then(|el| el.closest(".btn").ok().flatten())
		.and_then(|el| el.dyn_into::<HtmlElement>().ok())
	else {
		return Ok(());
	};
	let document = web_sys::window()
		.ok_or(DomError::NoWindow)?
		.document()
		.ok_or(DomError::NoDocument)?;

	let rect = button.get_bounding_client_rect();
	let (x, y) = ripple_origin(
		f64::from(ev.client_x()),
		f64::from(ev.client_y()),
		rect.left(),
		rect.top(),
	);
	let ripple = document
		.create_element("span")
		.map_err(|e| DomError::js("create ripple", e))?;
	ripple
		.set_attribute("style", &ripple_style(x, y))
		.map_err(|e| DomError::js("style ripple", e))?;

	let style = button.style();
	let _ = style.set_property("position", "relative");
	let _ = style.set_property("overflow", "hidden");
	button
		.append_child(&ripple)
		.map_err(|e| DomError::js("attach ripple", e))?;

	set_timeout(move || ripple.remove(), RIPPLE_LIFETIME);
	Ok(())
}

/// Click handler body for `.btn` elements: draws a ripple at the cursor.
pub fn ripple(ev: &MouseEvent) {
	if let Err(e) = spawn_ripple(ev) {
		debug!("kornerflag: ripple skipped: {}", e);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ripple_is_placed_relative_to_the_button() {
		assert_eq!(ripple_origin(130.0, 75.0, 100.0, 50.0), (30.0, 25.0));
		assert_eq!(ripple_origin(10.0, 10.0, 10.0, 10.0), (0.0, 0.0));
	}

	#[test]
	fn ripple_style_centers_the_circle_on_the_click() {
		let style = ripple_style(30.0, 25.0);
		assert!(style.contains("left: 30px;"));
		assert!(style.contains("top: 25px;"));
		assert!(style.contains("width: 100px;"));
		assert!(style.contains("margin-left: -50px;"));
		assert!(style.contains("animation: ripple 0.6s ease-out;"));
	}

	#[test]
	fn reveal_covers_every_card_kind() {
		for class in ["feature-card", "testimonial-card", "pricing-card", "stat-item"] {
			assert!(REVEAL_SELECTOR.contains(&format!(".{class}")));
		}
		assert_eq!(RIPPLE_LIFETIME, Duration::from_millis(600));
	}
}
