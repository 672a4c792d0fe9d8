//! Yuki site widgets, WASM front end.
//!
//! Edit log panel, message board, custom icon grid and dark mode, backed by
//! `localStorage`. Each concern lives in its own module; list persistence
//! comes from `ys-list`.

pub mod config;
pub mod dom;
pub mod events;
pub mod icon_grid;
pub mod log_panel;
pub mod markup;
pub mod message_board;
pub mod scroll;
pub mod state;
pub mod storage;
pub mod theme;
pub mod timer;
pub mod toast;

use wasm_bindgen::prelude::*;

/// WASM entry point, called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init()
}

fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;
    let store = storage::BrowserStore::local();

    // Theme first so the page never flashes the wrong background.
    theme::init(&els, &store);

    state::install(&store);

    log_panel::attach(&els)?;
    message_board::attach(&els)?;
    icon_grid::attach_renderer(&els);

    events::bind_events(&els, &store)?;

    if !store.is_available() {
        toast::show("浏览器存储不可用，内容将不会被保存");
    }

    Ok(())
}
