//! `requestAnimationFrame` loop with an explicit stop handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a self-rescheduling animation loop.
///
/// The running flag is checked before each reschedule, so after
/// [`stop`](Self::stop) no further frame is requested. Dropping the handle
/// does not stop the loop; owners call `stop` on teardown.
#[derive(Clone, Default)]
pub struct AnimationLoop {
	running: Rc<Cell<bool>>,
	pending: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(callback.as_ref().unchecked_ref())
		.ok()
}

impl AnimationLoop {
	/// Run `frame` once per display refresh until stopped.
	pub fn start(mut frame: impl FnMut() + 'static) -> Self {
		let handle = Self::default();
		handle.running.set(true);

		let (running, pending, callback) = (
			handle.running.clone(),
			handle.pending.clone(),
			handle.callback.clone(),
		);
		*handle.callback.borrow_mut() = Some(Closure::new(move || {
			pending.set(None);
			if !running.get() {
				return;
			}
			frame();
			if !running.get() {
				return;
			}
			if let Some(ref cb) = *callback.borrow() {
				pending.set(request_frame(cb));
			}
		}));

		if let Some(ref cb) = *handle.callback.borrow() {
			handle.pending.set(request_frame(cb));
		}
		debug!("particle-web: animation loop started");
		handle
	}

	pub fn is_running(&self) -> bool {
		self.running.get()
	}

	/// Stop the loop and cancel any frame already requested. Safe to call
	/// more than once.
	pub fn stop(&self) {
		if !self.running.replace(false) {
			return;
		}
		if let Some(id) = self.pending.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
		// Breaks the closure's reference cycle back to `callback`.
		self.callback.borrow_mut().take();
		debug!("particle-web: animation loop stopped");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn idle_handle_is_not_running() {
		let handle = AnimationLoop::default();
		assert!(!handle.is_running());
		handle.stop();
		assert!(!handle.is_running());
	}

	#[test]
	fn stop_clears_flag_and_callback() {
		let handle = AnimationLoop::default();
		handle.running.set(true);
		let clone = handle.clone();
		clone.stop();
		assert!(!handle.is_running());
		assert!(handle.callback.borrow().is_none());
		clone.stop();
	}
}
