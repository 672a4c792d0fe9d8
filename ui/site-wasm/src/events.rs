//! Event binding.
//!
//! Wires every widget's listeners once at startup. Closures are leaked with
//! `forget()`; they live as long as the page does.

use crate::dom::Elements;
use crate::icon_grid;
use crate::log_panel;
use crate::message_board;
use crate::storage::BrowserStore;
use crate::theme;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent};

/// Helper: attach a click handler that only needs the element bindings.
macro_rules! on_click {
    ($el:expr, $els:expr, $handler:path) => {{
        let els = $els.clone();
        listen(&$el, "click", move |_: Event| $handler(&els))?;
    }};
}

pub(crate) fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

fn listen_capture(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback_and_bool(kind, cb.as_ref().unchecked_ref(), true)?;
    cb.forget();
    Ok(())
}

fn is_ctrl_enter(event: &Event) -> bool {
    event
        .dyn_ref::<KeyboardEvent>()
        .is_some_and(|key| key.ctrl_key() && key.key() == "Enter")
}

/// Bind all UI event listeners. Call once after the stores are installed.
/// Scroll buttons wire their own listeners in `scroll::ScrollControls`.
pub fn bind_events(els: &Elements, store: &BrowserStore) -> Result<(), JsValue> {
    let document = gloo_utils::document();

    // ── Log panel ──
    on_click!(els.log_button, els, log_panel::toggle);
    on_click!(els.log_close, els, log_panel::hide);
    on_click!(els.log_add, els, log_panel::on_add);
    {
        let els2 = els.clone();
        listen(&els.log_input, "keydown", move |event| {
            if is_ctrl_enter(&event) {
                log_panel::on_add(&els2);
            }
        })?;
    }
    listen(&els.log_list, "click", |event| log_panel::on_list_click(&event))?;
    {
        let els2 = els.clone();
        listen(&document, "click", move |event| log_panel::on_document_click(&els2, &event))?;
    }

    // ── Message board ──
    on_click!(els.message_toggle, els, message_board::toggle_input);
    on_click!(els.message_submit, els, message_board::on_submit);
    {
        let els2 = els.clone();
        listen(&els.message_input, "keydown", move |event| {
            if is_ctrl_enter(&event) {
                message_board::on_submit(&els2);
            }
        })?;
    }

    // ── Icon grid ──
    on_click!(els.icon_add_button, els, icon_grid::show_modal);
    on_click!(els.icon_modal_close, els, icon_grid::hide_modal);
    on_click!(els.icon_modal_cancel, els, icon_grid::hide_modal);
    on_click!(els.icon_modal_confirm, els, icon_grid::on_confirm);
    {
        let els2 = els.clone();
        listen(&els.icon_modal, "click", move |event| icon_grid::on_modal_click(&els2, &event))?;
    }
    {
        let els2 = els.clone();
        listen(&document, "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                icon_grid::on_keydown(&els2, key);
            }
        })?;
    }
    listen(&els.icon_list, "click", |event| icon_grid::on_list_click(&event))?;
    // `error` does not bubble, so catch image failures on the way down.
    listen_capture(&els.icon_list, "error", |event| icon_grid::on_image_error(&event))?;
    {
        let els2 = els.clone();
        listen(&gloo_utils::window(), "resize", move |_| icon_grid::relayout(&els2))?;
    }

    {
        let els2 = els.clone();
        listen(&els.icon_grid, "scroll", move |_| icon_grid::on_grid_scroll(&els2))?;
    }

    // ── Dark mode ──
    {
        let els2 = els.clone();
        let store = store.clone();
        listen(&els.dark_mode_button, "click", move |_| theme::toggle(&els2, &store))?;
    }

    Ok(())
}
