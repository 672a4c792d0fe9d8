//! Transient notices centred on the page.
//!
//! Only one notice is shown at a time: a new one replaces the current
//! element and restarts the dismissal timer.

use crate::config;
use crate::dom;
use crate::timer::TimerSlot;
use std::cell::RefCell;
use web_sys::Element;

const TOAST_STYLE: &str = "position: fixed; top: 50%; left: 50%; \
    transform: translate(-50%, -50%); background: rgba(0, 0, 0, 0.8); \
    color: white; padding: 10px 20px; border-radius: 5px; z-index: 10000; \
    font-size: 0.9rem; pointer-events: none;";

thread_local! {
    static CURRENT: RefCell<Option<Element>> = const { RefCell::new(None) };
    static DISMISS: TimerSlot = TimerSlot::new();
}

pub fn show(text: &str) {
    DISMISS.with(TimerSlot::cancel);
    remove_current();

    let el = match dom::create_element("div") {
        Ok(el) => el,
        Err(_) => {
            gloo_console::log!(text);
            return;
        }
    };
    dom::add_class(&el, "site-toast");
    dom::set_text(&el, text);
    let _ = el.set_attribute("style", TOAST_STYLE);
    if let Some(body) = gloo_utils::document().body() {
        let _ = body.append_child(&el);
    }

    CURRENT.with(|current| *current.borrow_mut() = Some(el));
    DISMISS.with(|slot| slot.schedule(config::TOAST_MS, remove_current));
}

// Runs inside the slot's own timeout, so it must not touch the slot.
fn remove_current() {
    let previous = CURRENT.with(|current| current.borrow_mut().take());
    if let Some(el) = previous {
        el.remove();
    }
}
