//! User shortcut icons appended after the page's built-in ones.
//!
//! The grid switches from a single row to a scrolling grid once the total
//! icon count exceeds one row. Each icon's CSS `order` keeps built-in icons
//! first and user icons in insertion order.

use crate::config;
use crate::dom::{self, Elements};
use crate::state;
use crate::timer::TimerSlot;
use crate::toast;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement};
use ys_list::{IconShortcut, ItemId, ListError, ListItem, ValidationError};

thread_local! {
    static FOCUS: TimerSlot = TimerSlot::new();
    static RELEASE: TimerSlot = TimerSlot::new();
    static SCROLL_SETTLE: TimerSlot = TimerSlot::new();
}

// ── Layout ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLayout {
    SingleRow,
    Grid { rows: usize },
}

pub fn grid_layout(fixed: usize, user: usize) -> GridLayout {
    let total = fixed + user;
    if total > config::ICONS_PER_ROW {
        GridLayout::Grid {
            rows: total.div_ceil(config::ICONS_PER_ROW),
        }
    } else {
        GridLayout::SingleRow
    }
}

/// CSS `order` of the user icon at `index`, counting from 1 across the grid.
pub fn user_icon_order(fixed: usize, index: usize) -> usize {
    fixed + index + 1
}

/// Re-lays out the grid for the current number of user icons.
pub fn relayout(els: &Elements) {
    let user = state::with_icons(|icons| icons.len()).unwrap_or(0);
    apply_layout(els, user);
}

// The render hook runs while the icon store is borrowed, so it passes the
// item count it was handed instead of going through `relayout`.
fn apply_layout(els: &Elements, user: usize) {
    let grid = &els.icon_grid;
    match grid_layout(config::FIXED_ICON_COUNT, user) {
        GridLayout::Grid { rows } => {
            dom::add_class(grid, "grid-layout");
            dom::add_class(grid, "scroll-enabled");
            dom::set_style(grid, "--grid-rows", &rows.to_string());
        }
        GridLayout::SingleRow => {
            dom::remove_class(grid, "grid-layout");
            dom::remove_class(grid, "scroll-enabled");
            dom::remove_style(grid, "--grid-rows");
        }
    }
    apply_order(els);
}

fn apply_order(els: &Elements) {
    let fixed = dom::query_all_within(&els.icon_grid, ":scope > .icon-with-text");
    for (index, icon) in fixed.iter().enumerate() {
        dom::set_style(icon, "order", &(index + 1).to_string());
    }
    let user = dom::query_all_within(&els.icon_list, ".user-icon-item");
    for (index, icon) in user.iter().enumerate() {
        dom::set_style(icon, "order", &user_icon_order(fixed.len(), index).to_string());
    }
}

/// Marks the grid as `scrolling` until it has been still for a moment.
pub fn on_grid_scroll(els: &Elements) {
    dom::add_class(&els.icon_grid, "scrolling");
    let grid = els.icon_grid.clone();
    SCROLL_SETTLE.with(|slot| {
        slot.schedule(config::SCROLL_SETTLE_MS, move || dom::remove_class(&grid, "scrolling"));
    });
}

// ── Rendering ──

pub fn attach_renderer(els: &Elements) {
    let render_els = els.clone();
    state::with_icons(|icons| {
        icons.set_render_hook(move |items| {
            dom::set_inner_html(&render_els.icon_list, "");
            for item in items {
                match icon_element(item) {
                    Ok(el) => {
                        let _ = render_els.icon_list.append_child(&el);
                    }
                    Err(err) => gloo_console::error!("failed to build icon", err),
                }
            }
            apply_layout(&render_els, items.len());
        });
    });
}

fn icon_element(item: &ListItem<IconShortcut>) -> Result<Element, JsValue> {
    let icon = &item.payload;

    let wrapper = dom::create_element("div")?;
    wrapper.set_class_name("user-icon-item");

    let link = dom::create_element("a")?;
    link.set_class_name("icon-with-text");
    link.set_attribute("href", &icon.target_url)?;
    link.set_attribute("target", "_blank")?;
    link.set_attribute("rel", "noopener")?;

    let image_button = dom::create_element("div")?;
    image_button.set_class_name("image-button");

    let img = dom::create_element("img")?;
    img.set_attribute("src", &icon.image_url)?;
    img.set_attribute("alt", &icon.name)?;

    let delete = dom::create_element("button")?;
    delete.set_class_name("delete-icon-btn");
    delete.set_attribute("title", "删除图标")?;
    delete.set_attribute("data-id", &item.id.to_string())?;
    dom::set_text(&delete, "×");

    let text = dom::create_element("span")?;
    text.set_class_name("icon-text");
    dom::set_text(&text, &icon.name);

    image_button.append_child(&img)?;
    link.append_child(&image_button)?;
    link.append_child(&text)?;
    wrapper.append_child(&link)?;
    wrapper.append_child(&delete)?;
    Ok(wrapper)
}

/// Capture-phase `error` handler: broken icon images get the placeholder.
pub fn on_image_error(event: &web_sys::Event) {
    let Some(img) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlImageElement>().ok())
    else {
        return;
    };
    if img.src() != config::ICON_FALLBACK_IMAGE {
        img.set_src(config::ICON_FALLBACK_IMAGE);
    }
}

// ── Modal ──

pub fn modal_open(els: &Elements) -> bool {
    dom::has_class(&els.icon_modal, "active")
}

pub fn show_modal(els: &Elements) {
    RELEASE.with(TimerSlot::cancel);
    dom::add_class(&els.icon_add_button, "active");
    dom::add_class(&els.icon_modal, "active");

    els.icon_name.set_value("");
    els.icon_url.set_value("");
    els.icon_image.set_value("");

    let name = els.icon_name.clone();
    FOCUS.with(|slot| slot.schedule(config::FOCUS_DELAY_MS, move || dom::focus(&name)));
}

pub fn hide_modal(els: &Elements) {
    FOCUS.with(TimerSlot::cancel);
    dom::remove_class(&els.icon_modal, "active");
    let button = els.icon_add_button.clone();
    RELEASE.with(|slot| {
        slot.schedule(config::MODAL_RELEASE_MS, move || dom::remove_class(&button, "active"));
    });
}

/// Clicks on the modal's backdrop, not its dialog, close it.
pub fn on_modal_click(els: &Elements, event: &web_sys::Event) {
    let on_backdrop = match (event.target(), event.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    };
    if on_backdrop {
        hide_modal(els);
    }
}

pub fn on_keydown(els: &Elements, event: &web_sys::KeyboardEvent) {
    if !modal_open(els) {
        return;
    }
    match event.key().as_str() {
        "Enter" => on_confirm(els),
        "Escape" => hide_modal(els),
        _ => {}
    }
}

pub fn on_confirm(els: &Elements) {
    let shortcut = IconShortcut::new(
        dom::get_input_value(&els.icon_name),
        dom::get_input_value(&els.icon_url),
        dom::get_input_value(&els.icon_image),
    );

    match state::with_icons(|icons| icons.add(shortcut)) {
        Some(Ok(_)) => {
            hide_modal(els);
            toast::show("图标添加成功！");
        }
        Some(Err(ListError::Validation(err))) => toast::show(validation_notice(&err)),
        Some(Err(ListError::IdsExhausted)) => toast::show("图标数量已达上限"),
        Some(Err(err)) => {
            gloo_console::error!(format!("icons: {err}"));
            hide_modal(els);
            toast::show("图标保存失败，存储空间可能已满");
        }
        None => {}
    }
}

/// The prompt shown for a rejected shortcut.
pub fn validation_notice(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::MissingField("name") => "请输入图标名称",
        ValidationError::MissingField("target_url") => "请输入图标链接",
        ValidationError::MissingField(_) => "请输入图标图片URL",
        ValidationError::InvalidUrl { field: "target_url", .. } => "请输入有效的链接地址",
        ValidationError::InvalidUrl { .. } => "请输入有效的图片链接",
    }
}

// ── Deletion ──

/// Delegated handler for the per-icon delete buttons. Asks before deleting.
pub fn on_list_click(event: &web_sys::Event) {
    let Some(button) = dom::event_element(event)
        .and_then(|el| el.closest(".delete-icon-btn").ok().flatten())
    else {
        return;
    };
    event.prevent_default();
    event.stop_propagation();

    let Some(id) = button
        .get_attribute("data-id")
        .and_then(|raw| raw.parse::<u64>().ok())
    else {
        return;
    };

    let confirmed = gloo_utils::window()
        .confirm_with_message("确定要删除这个图标吗？")
        .unwrap_or(false);
    if !confirmed {
        return;
    }

    match state::with_icons(|icons| icons.delete(ItemId(id))) {
        Some(Ok(true)) => toast::show("图标已删除"),
        Some(Ok(false)) | None => {}
        Some(Err(err)) => {
            gloo_console::error!(format!("icons: {err}"));
            toast::show("图标保存失败");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_to_one_row_stays_single_row() {
        assert_eq!(grid_layout(5, 0), GridLayout::SingleRow);
        assert_eq!(grid_layout(5, 1), GridLayout::SingleRow);
    }

    #[test]
    fn overflow_switches_to_grid_rows() {
        assert_eq!(grid_layout(5, 2), GridLayout::Grid { rows: 2 });
        assert_eq!(grid_layout(5, 7), GridLayout::Grid { rows: 2 });
        assert_eq!(grid_layout(5, 8), GridLayout::Grid { rows: 3 });
    }

    #[test]
    fn user_icons_follow_built_in_ones() {
        assert_eq!(user_icon_order(5, 0), 6);
        assert_eq!(user_icon_order(5, 3), 9);
        assert_eq!(user_icon_order(0, 0), 1);
    }

    #[test]
    fn validation_notices_name_the_failing_field() {
        assert_eq!(validation_notice(&ValidationError::MissingField("name")), "请输入图标名称");
        assert_eq!(validation_notice(&ValidationError::MissingField("target_url")), "请输入图标链接");
        assert_eq!(validation_notice(&ValidationError::MissingField("image_url")), "请输入图标图片URL");
        assert_eq!(
            validation_notice(&ValidationError::InvalidUrl {
                field: "target_url",
                value: "not-a-url".to_owned(),
            }),
            "请输入有效的链接地址"
        );
        assert_eq!(
            validation_notice(&ValidationError::InvalidUrl {
                field: "image_url",
                value: "nope".to_owned(),
            }),
            "请输入有效的图片链接"
        );
    }
}
