//! Message board: newest posts first, with a collapsible input area.

use crate::config;
use crate::dom::{self, Elements};
use crate::markup;
use crate::scroll::ScrollControls;
use crate::state;
use crate::toast;
use wasm_bindgen::prelude::*;
use ys_list::{ListError, Message};

/// Adds the scroll buttons to the board and installs the render hook.
pub fn attach(els: &Elements) -> Result<(), JsValue> {
    let container = els.message_list.clone();
    let host = container
        .closest(config::MESSAGE_BOARD)?
        .or_else(|| container.parent_element())
        .unwrap_or_else(|| container.clone());
    let controls = ScrollControls::install(&container, &host, "-message", false)?;

    state::with_messages(|board| {
        board.set_render_hook(move |items| {
            dom::set_inner_html(&container, &markup::message_list(items, markup::format_time));
            container.set_scroll_top(0);
            controls.refresh();
        });
    });
    Ok(())
}

pub fn toggle_input(els: &Elements) {
    if dom::toggle_class(&els.message_input_area, "active") {
        dom::focus(&els.message_input);
    }
}

pub fn on_submit(els: &Elements) {
    let content = dom::get_textarea_value(&els.message_input);
    if content.is_empty() {
        return;
    }

    match state::with_messages(|board| board.add(Message::new(content))) {
        Some(Ok(_)) => {
            els.message_input.set_value("");
            toggle_input(els);
            toast::show("留言发布成功！");
        }
        Some(Err(err)) => {
            gloo_console::error!(format!("message board: {err}"));
            match err {
                ListError::Validation(_) => toast::show("请输入留言内容"),
                ListError::Persistence(_) => toast::show("留言保存失败，存储空间可能已满"),
                ListError::IdsExhausted => toast::show("留言数量已达上限"),
            }
        }
        None => {}
    }
}
