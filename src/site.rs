//! Page behaviour around the particle background: sticky navigation, smooth
//! anchor scrolling, the mobile menu toggle and fade-in on scroll.
//!
//! Every hook is optional. A missing element simply skips its feature. The
//! listeners live as long as the page, so their closures are leaked.

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
	Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

/// Scroll offset in pixels past which the navbar gets its `scrolled` class.
pub const NAV_SCROLL_THRESHOLD: f64 = 50.0;

/// Share of an element that must be visible before it fades in.
pub const FADE_IN_THRESHOLD: f64 = 0.1;

/// Whether the navbar should render in its scrolled style.
pub fn nav_scrolled(scroll_y: f64) -> bool {
	scroll_y > NAV_SCROLL_THRESHOLD
}

/// The selector an in-page link points at, or `None` for a bare `#` or a
/// link to another page.
pub fn anchor_selector(href: &str) -> Option<&str> {
	(href.len() > 1 && href.starts_with('#')).then_some(href)
}

fn document() -> Option<Document> {
	web_sys::window()?.document()
}

/// Toggle the `scrolled` class on `#navbar` as the page scrolls.
pub fn init_sticky_nav() {
	let Some(window) = web_sys::window() else {
		return;
	};
	let Some(navbar) = window.document().and_then(|d| d.get_element_by_id("navbar")) else {
		return;
	};

	let closure = Closure::<dyn FnMut()>::new(move || {
		let Some(y) = web_sys::window().and_then(|w| w.scroll_y().ok()) else {
			return;
		};
		let classes = navbar.class_list();
		let _ = if nav_scrolled(y) {
			classes.add_1("scrolled")
		} else {
			classes.remove_1("scrolled")
		};
	});
	let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
	closure.forget();
}

/// Smooth-scroll to the target of every same-page anchor link.
pub fn init_smooth_scroll() {
	let Some(document) = document() else {
		return;
	};
	let Ok(anchors) = document.query_selector_all("a[href^=\"#\"]") else {
		return;
	};

	for i in 0..anchors.length() {
		let Some(anchor) = anchors.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
			continue;
		};
		let link = anchor.clone();
		let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
			ev.prevent_default();
			let Some(href) = link.get_attribute("href") else {
				return;
			};
			let Some(selector) = anchor_selector(&href) else {
				return;
			};
			let Some(target) = self::document().and_then(|d| d.query_selector(selector).ok().flatten())
			else {
				return;
			};
			let options = ScrollIntoViewOptions::new();
			options.set_behavior(ScrollBehavior::Smooth);
			options.set_block(ScrollLogicalPosition::Start);
			target.scroll_into_view_with_scroll_into_view_options(&options);
		});
		let _ = anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
		closure.forget();
	}
	debug!("particle-web: smooth scroll on {} anchors", anchors.length());
}

/// `#mobile-menu-btn` toggles the `hidden` class on `#mobile-menu`.
pub fn init_mobile_menu() {
	let Some(document) = document() else {
		return;
	};
	let (Some(button), Some(menu)) = (
		document.get_element_by_id("mobile-menu-btn"),
		document.get_element_by_id("mobile-menu"),
	) else {
		return;
	};

	let closure = Closure::<dyn FnMut()>::new(move || {
		let _ = menu.class_list().toggle("hidden");
	});
	let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
	closure.forget();
}

/// Add `visible` to each `.fade-in` element the first time it scrolls into view.
pub fn init_fade_in() {
	let Some(document) = document() else {
		return;
	};
	let Ok(elements) = document.query_selector_all(".fade-in") else {
		return;
	};
	if elements.length() == 0 {
		return;
	}

	let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
		move |entries: js_sys::Array, observer: IntersectionObserver| {
			for entry in entries.iter() {
				let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
					continue;
				};
				if entry.is_intersecting() {
					let target = entry.target();
					let _ = target.class_list().add_1("visible");
					observer.unobserve(&target);
				}
			}
		},
	);

	let options = IntersectionObserverInit::new();
	options.set_threshold(&JsValue::from_f64(FADE_IN_THRESHOLD));
	let Ok(observer) =
		IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)
	else {
		return;
	};
	closure.forget();

	for i in 0..elements.length() {
		if let Some(el) = elements.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
			observer.observe(&el);
		}
	}
	debug!("particle-web: fade-in on {} elements", elements.length());
}

/// Install every page behaviour.
pub fn init() {
	init_sticky_nav();
	init_smooth_scroll();
	init_mobile_menu();
	init_fade_in();
}
