//! Leptos component hosting the particle network canvas.
//!
//! The component sizes a fixed, full-viewport canvas, seeds a
//! [`ParticleField`], and drives it from a `requestAnimationFrame` loop.
//! Window listeners track the cursor and viewport size. The loop runs until
//! the component is unmounted, at which point its [`CancelToken`] is tripped
//! and the next frame tears everything down instead of rescheduling.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::leptos_dom::helpers::set_timeout;
use leptos::prelude::*;
use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::config::ParticleConfig;
use super::palette::ThemePalette;
use super::render;
use super::state::{CancelToken, ParticleField};
use crate::components::theme::{ThemeContext, ThemeMode};
use crate::error::DomError;

type Slot<T> = Rc<RefCell<Option<T>>>;

/// Shared handles of one running animation loop.
#[derive(Clone, Default)]
struct FrameLoop {
	field: Slot<ParticleField>,
	animate: Slot<Closure<dyn FnMut(f64)>>,
	on_mousemove: Slot<Closure<dyn FnMut(MouseEvent)>>,
	on_resize: Slot<Closure<dyn FnMut()>>,
}

fn viewport_size(window: &Window) -> Result<(f64, f64), DomError> {
	let width = window
		.inner_width()
		.map_err(|e| DomError::js("innerWidth", e))?
		.as_f64()
		.unwrap_or(0.0);
	let height = window
		.inner_height()
		.map_err(|e| DomError::js("innerHeight", e))?
		.as_f64()
		.unwrap_or(0.0);
	Ok((width, height))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, DomError> {
	canvas
		.get_context("2d")
		.map_err(|e| DomError::js("getContext", e))?
		.ok_or(DomError::NoContext2d)?
		.dyn_into()
		.map_err(|_| DomError::NoContext2d)
}

impl FrameLoop {
	fn start(
		&self,
		canvas: HtmlCanvasElement,
		config: ParticleConfig,
		seed: Option<u64>,
		token: CancelToken,
	) -> Result<(), DomError> {
		let window = web_sys::window().ok_or(DomError::NoWindow)?;
		let (w, h) = viewport_size(&window)?;
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let ctx = context_2d(&canvas)?;

		let palette = ThemePalette::from_document();
		let field = match seed {
			Some(seed) => ParticleField::seeded(config, palette, w, h, seed),
			None => ParticleField::from_entropy(config, palette, w, h),
		};
		*self.field.borrow_mut() = Some(field);

		let field_mm = self.field.clone();
		*self.on_mousemove.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			if let Some(ref mut f) = *field_mm.borrow_mut() {
				f.set_mouse(ev.client_x() as f64, ev.client_y() as f64);
			}
		}));

		let (field_rs, canvas_rs) = (self.field.clone(), canvas.clone());
		*self.on_resize.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let Ok((nw, nh)) = viewport_size(&win) else {
				return;
			};
			canvas_rs.set_width(nw as u32);
			canvas_rs.set_height(nh as u32);
			if let Some(ref mut f) = *field_rs.borrow_mut() {
				f.resize(nw, nh);
			}
			debug!("kornerflag: particle canvas resized to {}x{}", nw, nh);
		}));

		if let Some(ref cb) = *self.on_mousemove.borrow() {
			window
				.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref())
				.map_err(|e| DomError::js("listen mousemove", e))?;
		}
		if let Some(ref cb) = *self.on_resize.borrow() {
			window
				.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
				.map_err(|e| DomError::js("listen resize", e))?;
		}

		let this = self.clone();
		*self.animate.borrow_mut() = Some(Closure::new(move |time: f64| {
			if token.is_cancelled() {
				this.teardown();
				return;
			}
			if let Some(ref mut f) = *this.field.borrow_mut() {
				let scene = f.frame(time);
				render::render(&scene, &ctx, &f.palette, f.width, f.height);
			}
			this.request_frame();
		}));
		self.request_frame();
		info!("kornerflag: particle loop started");
		Ok(())
	}

	fn request_frame(&self) {
		let Some(window) = web_sys::window() else {
			return;
		};
		if let Some(ref cb) = *self.animate.borrow() {
			if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				error!("kornerflag: requestAnimationFrame failed: {:?}", e);
			}
		}
	}

	/// Removes window listeners and releases the loop. Called from inside the
	/// frame callback, so the callback itself is dropped on a later tick.
	fn teardown(&self) {
		if let Some(window) = web_sys::window() {
			if let Some(cb) = self.on_mousemove.borrow_mut().take() {
				let _ = window
					.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
			}
			if let Some(cb) = self.on_resize.borrow_mut().take() {
				let _ =
					window.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
		self.field.borrow_mut().take();
		let animate = self.animate.clone();
		set_timeout(
			move || {
				animate.borrow_mut().take();
			},
			Duration::ZERO,
		);
		info!("kornerflag: particle loop stopped");
	}
}

/// Full-viewport animated particle network, drawn behind page content.
///
/// Colors come from the active theme's CSS variables and are re-read whenever
/// the [`ThemeContext`] mode changes. Pass `seed` for a reproducible layout.
#[component]
pub fn ParticleFieldCanvas(
	/// Simulation tuning.
	#[prop(default = ParticleConfig::default())]
	config: ParticleConfig,
	/// Fixed RNG seed; entropy-seeded when absent.
	#[prop(default = None)]
	seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let frame_loop = FrameLoop::default();
	let token = CancelToken::new();

	let (loop_init, token_init) = (frame_loop.clone(), token.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if loop_init.field.borrow().is_some() || token_init.is_cancelled() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		if let Err(e) = loop_init.start(canvas, config.clone(), seed, token_init.clone()) {
			error!("kornerflag: particle background disabled: {}", e);
		}
	});

	if let Some(theme) = use_context::<ThemeContext>() {
		let field_theme = frame_loop.field.clone();
		Effect::new(move |prev: Option<ThemeMode>| {
			let mode = theme.mode.get();
			if prev.is_some_and(|p| p != mode) {
				if let Some(ref mut f) = *field_theme.borrow_mut() {
					f.recolor(ThemePalette::from_document());
					debug!("kornerflag: particles recolored for {} theme", mode);
				}
			}
			mode
		});
	}

	on_cleanup(move || token.cancel());

	view! {
		<canvas
			node_ref=canvas_ref
			id="particleCanvas"
			class="particle-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; pointer-events: none; z-index: 0;"
		/>
	}
}
