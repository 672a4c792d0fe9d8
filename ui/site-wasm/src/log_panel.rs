//! Edit log panel: a slide-in list of site change notes.

use crate::config;
use crate::dom::{self, Elements};
use crate::markup;
use crate::scroll::ScrollControls;
use crate::state;
use crate::timer::TimerSlot;
use crate::toast;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use ys_list::{ItemId, ListError, LogEntry};

thread_local! {
    static ANIMATION: TimerSlot = TimerSlot::new();
    static SCROLL: RefCell<Option<ScrollControls>> = const { RefCell::new(None) };
}

/// Adds the scroll buttons next to the list and installs the render hook.
pub fn attach(els: &Elements) -> Result<(), JsValue> {
    let host = els.log_list.parent_element().unwrap_or_else(|| els.log_panel.clone());
    let controls = ScrollControls::install(&els.log_list, &host, "", true)?;
    SCROLL.with(|slot| *slot.borrow_mut() = Some(controls.clone()));

    let list = els.log_list.clone();
    state::with_logs(|logs| {
        logs.set_render_hook(move |items| {
            dom::set_inner_html(&list, &markup::log_list(items, markup::format_time));
            controls.refresh();
        });
    });
    Ok(())
}

fn with_scroll(f: impl FnOnce(&ScrollControls)) {
    SCROLL.with(|slot| {
        if let Some(controls) = slot.borrow().as_ref() {
            f(controls);
        }
    });
}

pub fn is_open(els: &Elements) -> bool {
    dom::has_class(&els.log_panel, "active")
}

pub fn toggle(els: &Elements) {
    if state::log_panel_animating() {
        return;
    }
    if is_open(els) {
        hide(els);
    } else {
        show(els);
    }
}

pub fn show(els: &Elements) {
    if state::log_panel_animating() {
        return;
    }
    state::set_log_panel_animating(true);
    dom::set_style(&els.log_panel, "display", "flex");
    dom::add_class(&els.log_panel, "active");
    ANIMATION.with(|slot| {
        slot.schedule(config::PANEL_ANIMATION_MS, || {
            state::set_log_panel_animating(false);
            with_scroll(ScrollControls::refresh);
        });
    });
}

pub fn hide(els: &Elements) {
    if state::log_panel_animating() {
        return;
    }
    state::set_log_panel_animating(true);
    dom::remove_class(&els.log_panel, "active");
    let panel = els.log_panel.clone();
    ANIMATION.with(|slot| {
        slot.schedule(config::PANEL_ANIMATION_MS, move || {
            dom::set_style(&panel, "display", "none");
            state::set_log_panel_animating(false);
        });
    });
}

/// Closes the panel when a click lands outside it and its button.
pub fn on_document_click(els: &Elements, event: &web_sys::Event) {
    if !is_open(els) {
        return;
    }
    let Some(target) = dom::event_element(event) else {
        return;
    };
    if !dom::contains(&els.log_panel, &target) && !dom::contains(&els.log_button, &target) {
        hide(els);
    }
}

pub fn on_add(els: &Elements) {
    let text = dom::get_textarea_value(&els.log_input);
    if text.is_empty() {
        return;
    }

    match state::with_logs(|logs| logs.add(LogEntry::new(text))) {
        Some(Ok(_)) => {
            els.log_input.set_value("");
            with_scroll(ScrollControls::scroll_to_top);
            toast::show("日志添加成功！");
        }
        Some(Err(err)) => report(&err),
        None => {}
    }
}

/// Delegated handler for the per-entry delete buttons.
pub fn on_list_click(event: &web_sys::Event) {
    let Some(button) = dom::event_element(event).and_then(|el| el.closest(".delete-log").ok().flatten())
    else {
        return;
    };
    let Some(id) = button
        .get_attribute("data-id")
        .and_then(|raw| raw.parse::<u64>().ok())
    else {
        return;
    };

    match state::with_logs(|logs| logs.delete(ItemId(id))) {
        Some(Ok(true)) => toast::show("日志已删除！"),
        Some(Ok(false)) | None => {}
        Some(Err(err)) => report(&err),
    }
}

fn report(err: &ListError) {
    gloo_console::error!(format!("log: {err}"));
    match err {
        ListError::Validation(_) => toast::show("请输入日志内容"),
        ListError::Persistence(_) => toast::show("日志保存失败，存储空间可能已满"),
        ListError::IdsExhausted => toast::show("日志数量已达上限"),
    }
}
