//! Leptos component wrapping the particle field canvas.
//!
//! The component creates a fixed, full-viewport canvas behind the page and
//! wires window-level pointer, touch and resize listeners into a shared
//! [`ParticleField`]. An [`AnimationLoop`] updates and repaints the field every
//! display frame; both the loop and the listeners are torn down on cleanup.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::animation::AnimationLoop;
use super::config::ParticleConfig;
use super::particles::ParticleField;
use super::render;

const CANVAS_STYLE: &str =
	"position: fixed; inset: 0; z-index: 0; pointer-events: none; display: block;";

/// A window event listener that can be detached again.
struct Listener {
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn attach(window: &Window, event: &'static str, handler: impl FnMut(Event) + 'static) -> Self {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		let _ = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
		Self { event, callback }
	}

	fn detach(&self, window: &Window) {
		let _ = window
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Everything a running particle field owns in the page.
struct FieldRuntime {
	window: Window,
	animation: AnimationLoop,
	listeners: Vec<Listener>,
}

impl FieldRuntime {
	fn stop(self) {
		self.animation.stop();
		for listener in &self.listeners {
			listener.detach(&self.window);
		}
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn start(window: &Window, canvas: HtmlCanvasElement, config: ParticleConfig) -> Option<FieldRuntime> {
	let (w, h) = viewport_size(window)?;
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);

	let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;

	info!(
		"particle-web: {} particles on a {}x{} canvas",
		config.particle_count, w, h
	);
	let field = Rc::new(RefCell::new(ParticleField::from_entropy(config, w, h)));
	let mut listeners = Vec::with_capacity(5);

	let (field_resize, canvas_resize) = (field.clone(), canvas.clone());
	listeners.push(Listener::attach(window, "resize", move |_| {
		let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
			return;
		};
		canvas_resize.set_width(nw as u32);
		canvas_resize.set_height(nh as u32);
		field_resize.borrow_mut().resize(nw, nh);
		debug!("particle-web: resized to {nw}x{nh}");
	}));

	let field_mm = field.clone();
	listeners.push(Listener::attach(window, "mousemove", move |ev| {
		if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
			field_mm
				.borrow_mut()
				.set_pointer(ev.client_x() as f64, ev.client_y() as f64);
		}
	}));

	// `mouseout` with no related target means the pointer left the window.
	let field_mo = field.clone();
	listeners.push(Listener::attach(window, "mouseout", move |ev| {
		if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
			if ev.related_target().is_none() {
				field_mo.borrow_mut().clear_pointer();
			}
		}
	}));

	let field_tm = field.clone();
	listeners.push(Listener::attach(window, "touchmove", move |ev| {
		let Some(touch) = ev
			.dyn_ref::<TouchEvent>()
			.and_then(|ev| ev.touches().get(0))
		else {
			return;
		};
		field_tm
			.borrow_mut()
			.set_pointer(touch.client_x() as f64, touch.client_y() as f64);
	}));

	let field_te = field.clone();
	listeners.push(Listener::attach(window, "touchend", move |_| {
		field_te.borrow_mut().clear_pointer();
	}));

	let field_frame = field;
	let animation = AnimationLoop::start(move || {
		let mut field = field_frame.borrow_mut();
		field.update();
		render::render(&*field, &ctx);
	});

	Some(FieldRuntime {
		window: window.clone(),
		animation,
		listeners,
	})
}

/// Renders the animated particle web as a full-viewport page background.
///
/// Pass a `config` to override the default tuning. The canvas ignores pointer
/// events itself; interaction is read from window-level mouse and touch
/// events so content above the canvas stays clickable.
#[component]
pub fn ParticleFieldCanvas(#[prop(optional)] config: Option<ParticleConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();
	let runtime: Rc<RefCell<Option<FieldRuntime>>> = Rc::new(RefCell::new(None));
	let runtime_cleanup = StoredValue::new_local(runtime.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if runtime.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			return;
		};
		match start(&window, canvas.into(), config.clone()) {
			Some(rt) => *runtime.borrow_mut() = Some(rt),
			None => warn!("particle-web: canvas 2d context unavailable, background disabled"),
		}
	});

	on_cleanup(move || {
		let _ = runtime_cleanup.try_with_value(|runtime| {
			if let Some(rt) = runtime.borrow_mut().take() {
				rt.stop();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			id="particles-canvas"
			style=CANVAS_STYLE
		/>
	}
}
