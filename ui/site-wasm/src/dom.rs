//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add a widget element, add a
//! field here and bind it in `Elements::bind()`.

use crate::config;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

// ── Helpers ──

pub fn by_id(id: &str) -> Option<Element> {
    gloo_utils::document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    gloo_utils::document().query_selector(selector).ok()?
}

pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    let Ok(nl) = parent.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn get_textarea_value(el: &HtmlTextAreaElement) -> String {
    el.value().trim().to_string()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str) -> bool {
    el.class_list().toggle(cls).unwrap_or(false)
}

pub fn has_class(el: &Element, cls: &str) -> bool {
    el.class_list().contains(cls)
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn remove_style(el: &Element, property: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().remove_property(property);
    }
}

pub fn focus(el: &Element) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.focus();
    }
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    gloo_utils::document().create_element(tag)
}

/// The element an event fired on, if it is an `Element`.
pub fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Whether `target` is `container` or one of its descendants.
pub fn contains(container: &Element, target: &Element) -> bool {
    container.contains(Some(target.unchecked_ref()))
}

// ── Elements struct ──

/// All DOM element references used by the site widgets.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Log panel
    pub log_button: HtmlElement,
    pub log_panel: Element,
    pub log_close: HtmlElement,
    pub log_add: HtmlElement,
    pub log_input: HtmlTextAreaElement,
    pub log_list: Element,

    // Message board
    pub message_toggle: HtmlElement,
    pub message_submit: HtmlElement,
    pub message_input: HtmlTextAreaElement,
    pub message_list: Element,
    pub message_input_area: Element,

    // Icon grid
    pub icon_add_button: HtmlElement,
    pub icon_modal: Element,
    pub icon_modal_close: HtmlElement,
    pub icon_modal_cancel: HtmlElement,
    pub icon_modal_confirm: HtmlElement,
    pub icon_name: HtmlInputElement,
    pub icon_url: HtmlInputElement,
    pub icon_image: HtmlInputElement,
    pub icon_list: Element,
    pub icon_grid: Element,

    // Dark mode
    pub dark_mode_toggle: Element,
    pub dark_mode_button: HtmlElement,
    pub dark_mode_icon: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_query {
    ($selector:expr) => {
        query($selector).ok_or_else(|| JsValue::from_str(&format!("missing {}", $selector)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_textarea {
    ($id:expr) => {
        by_id_typed::<HtmlTextAreaElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing textarea #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            log_button: get_html!(config::LOG_BUTTON),
            log_panel: get_el!(config::LOG_PANEL),
            log_close: get_html!(config::LOG_CLOSE),
            log_add: get_html!(config::LOG_ADD),
            log_input: get_textarea!(config::LOG_INPUT),
            log_list: get_el!(config::LOG_LIST),

            message_toggle: get_html!(config::MESSAGE_TOGGLE),
            message_submit: get_html!(config::MESSAGE_SUBMIT),
            message_input: get_textarea!(config::MESSAGE_INPUT),
            message_list: get_el!(config::MESSAGE_LIST),
            message_input_area: get_query!(config::MESSAGE_INPUT_AREA),

            icon_add_button: get_html!(config::ICON_ADD_BUTTON),
            icon_modal: get_el!(config::ICON_MODAL),
            icon_modal_close: get_html!(config::ICON_MODAL_CLOSE),
            icon_modal_cancel: get_html!(config::ICON_MODAL_CANCEL),
            icon_modal_confirm: get_html!(config::ICON_MODAL_CONFIRM),
            icon_name: get_input!(config::ICON_NAME_INPUT),
            icon_url: get_input!(config::ICON_URL_INPUT),
            icon_image: get_input!(config::ICON_IMAGE_INPUT),
            icon_list: get_el!(config::ICON_LIST),
            icon_grid: get_query!(config::ICON_GRID),

            dark_mode_toggle: get_el!(config::DARK_MODE_TOGGLE),
            dark_mode_button: get_html!(config::DARK_MODE_BUTTON),
            dark_mode_icon: get_query!(config::DARK_MODE_ICON),
        })
    }
}
