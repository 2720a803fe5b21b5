//! Top navigation bar: theme toggle, scroll-state styling, and smooth
//! in-page anchor scrolling.

use leptos::ev;
use leptos::leptos_dom::helpers::window_event_listener;
use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};

use super::effects::ripple;
use super::theme::ThemeToggle;
use crate::error::DomError;

/// Scroll offset past which the navbar switches to its compact style.
pub const SCROLLED_THRESHOLD: f64 = 50.0;
/// Gap left between the navbar and a scrolled-to section.
pub const ANCHOR_GAP: f64 = 20.0;

/// Whether a page scrolled by `offset` pixels shows the `scrolled` navbar.
pub fn navbar_scrolled(offset: f64) -> bool {
	offset > SCROLLED_THRESHOLD
}

/// Document-relative scroll position that places a section just below the
/// navbar. `target_top` is the section's viewport-relative top.
pub fn anchor_scroll_top(target_top: f64, page_offset: f64, navbar_height: f64) -> f64 {
	target_top + page_offset - navbar_height - ANCHOR_GAP
}

fn scroll_to_section(id: &str) -> Result<(), DomError> {
	let window = web_sys::window().ok_or(DomError::NoWindow)?;
	let document = window.document().ok_or(DomError::NoDocument)?;
	let Some(target) = document.get_element_by_id(id) else {
		return Ok(());
	};
	let navbar_height = document
		.query_selector(".navbar")
		.ok()
		.flatten()
		.and_then(|el| el.dyn_into::<HtmlElement>().ok())
		.map(|el| el.offset_height() as f64)
		.unwrap_or(0.0);
	let page_offset = window
		.page_y_offset()
		.map_err(|e| DomError::js("pageYOffset", e))?;

	let options = ScrollToOptions::new();
	options.set_top(anchor_scroll_top(
		target.get_bounding_client_rect().top(),
		page_offset,
		navbar_height,
	));
	options.set_behavior(ScrollBehavior::Smooth);
	window.scroll_to_with_scroll_to_options(&options);
	Ok(())
}

/// In-page link that scrolls smoothly to the element with id `target`.
#[component]
pub fn SectionLink(
	/// Id of the section to scroll to.
	target: &'static str,
	/// CSS class of the anchor.
	#[prop(optional)]
	class: &'static str,
	/// Link content.
	children: Children,
) -> impl IntoView {
	let is_button = class.split_whitespace().any(|c| c == "btn");
	let on_click = move |ev: MouseEvent| {
		ev.prevent_default();
		if is_button {
			ripple(&ev);
		}
		if let Err(e) = scroll_to_section(target) {
			warn!("kornerflag: cannot scroll to #{}: {}", target, e);
		}
	};

	view! {
		<a href=format!("#{}", target) class=class on:click=on_click>
			{children()}
		</a>
	}
}

/// Fixed navbar with brand, section links, and the theme toggle.
#[component]
pub fn Navbar() -> impl IntoView {
	let (scrolled, set_scrolled) = signal(false);

	let listener = window_event_listener(ev::scroll, move |_| {
		let offset = web_sys::window()
			.and_then(|w| w.page_y_offset().ok())
			.unwrap_or(0.0);
		set_scrolled.set(navbar_scrolled(offset));
	});
	on_cleanup(move || listener.remove());

	view! {
		<nav class="navbar" class:scrolled=move || scrolled.get()>
			<div class="nav-container">
				<SectionLink target="home" class="nav-brand">
					"korner"<span class="brand-accent">"Flag"</span>
				</SectionLink>
				<div class="nav-links">
					<SectionLink target="features">"Features"</SectionLink>
					<SectionLink target="demo">"Demo"</SectionLink>
					<ThemeToggle />
				</div>
			</div>
		</nav>
	}
}
