//! Browser backends for the list stores: `localStorage` and the JS clock.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DomException, Storage};
use ys_list::Clock;
use ys_storage::{KeyValueStore, Result, StorageError};

/// `window.localStorage`, or nothing when the page may not use it
/// (private browsing modes, sandboxed iframes).
#[derive(Clone)]
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    pub fn local() -> Self {
        let storage = gloo_utils::window().local_storage().ok().flatten();
        if storage.is_none() {
            gloo_console::warn!("localStorage unavailable; lists will not be saved");
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_owned()))
    }
}

fn describe(err: &JsValue) -> String {
    match err.dyn_ref::<DomException>() {
        Some(ex) => format!("{}: {}", ex.name(), ex.message()),
        None => format!("{err:?}"),
    }
}

fn is_quota_error(err: &JsValue) -> bool {
    err.dyn_ref::<DomException>().is_some_and(|ex| {
        // Firefox used its own name before the standard one.
        matches!(ex.name().as_str(), "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED")
    })
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Backend(describe(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(|err| {
            if is_quota_error(&err) {
                StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed: key.len() + value.len(),
                }
            } else {
                StorageError::Backend(describe(&err))
            }
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage()?
            .remove_item(key)
            .map_err(|err| StorageError::Backend(describe(&err)))
    }
}

/// Milliseconds since the epoch from `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}
