//! Page state.
//!
//! The three list stores live in `thread_local!` slots (WASM is
//! single-threaded) and are opened once by `install()`. Render hooks only
//! touch the DOM, so a hook running inside `with_*` never re-enters a slot.

use crate::storage::{BrowserClock, BrowserStore};
use std::cell::{Cell, RefCell};
use ys_list::presets::{self, IconStore, LogStore, MessageStore};

pub type SiteLogStore = LogStore<BrowserStore, BrowserClock>;
pub type SiteMessageStore = MessageStore<BrowserStore, BrowserClock>;
pub type SiteIconStore = IconStore<BrowserStore, BrowserClock>;

thread_local! {
    static LOGS: RefCell<Option<SiteLogStore>> = const { RefCell::new(None) };
    static MESSAGES: RefCell<Option<SiteMessageStore>> = const { RefCell::new(None) };
    static ICONS: RefCell<Option<SiteIconStore>> = const { RefCell::new(None) };
    static LOG_PANEL_ANIMATING: Cell<bool> = const { Cell::new(false) };
}

/// Opens every store against `localStorage`. Load problems are logged and
/// leave that store empty; the page keeps working.
pub fn install(store: &BrowserStore) {
    let logs = presets::open_log_store(store.clone(), BrowserClock);
    let messages = presets::open_message_store(store.clone(), BrowserClock);
    let icons = presets::open_icon_store(store.clone(), BrowserClock);

    for (key, err) in [
        (logs.storage_key(), logs.load_error().map(ToString::to_string)),
        (messages.storage_key(), messages.load_error().map(ToString::to_string)),
        (icons.storage_key(), icons.load_error().map(ToString::to_string)),
    ] {
        if let Some(err) = err {
            gloo_console::warn!(format!("{key}: {err}"));
        }
    }

    LOGS.with(|slot| *slot.borrow_mut() = Some(logs));
    MESSAGES.with(|slot| *slot.borrow_mut() = Some(messages));
    ICONS.with(|slot| *slot.borrow_mut() = Some(icons));
}

pub fn with_logs<R>(f: impl FnOnce(&mut SiteLogStore) -> R) -> Option<R> {
    LOGS.with(|slot| slot.borrow_mut().as_mut().map(f))
}

pub fn with_messages<R>(f: impl FnOnce(&mut SiteMessageStore) -> R) -> Option<R> {
    MESSAGES.with(|slot| slot.borrow_mut().as_mut().map(f))
}

pub fn with_icons<R>(f: impl FnOnce(&mut SiteIconStore) -> R) -> Option<R> {
    ICONS.with(|slot| slot.borrow_mut().as_mut().map(f))
}

// ── Log panel animation guard ──

pub fn log_panel_animating() -> bool {
    LOG_PANEL_ANIMATING.with(Cell::get)
}

pub fn set_log_panel_animating(animating: bool) {
    LOG_PANEL_ANIMATING.with(|flag| flag.set(animating));
}
