//! Dark mode.
//!
//! The page's current mode lives in memory and is read from storage once, at
//! start. The preference is stored as `true`/`false` under `darkMode`, which
//! is also what the old page wrote; anything else reads as light mode.
//! Saving is best-effort: a full or missing store only costs the preference.

use crate::config;
use crate::dom::{self, Elements};
use crate::timer::TimerSlot;
use std::cell::Cell;
use web_sys::Element;
use ys_storage::{KeyValueStore, StorageError};

thread_local! {
    static DARK: Cell<bool> = const { Cell::new(false) };
    static RIPPLE: TimerSlot = TimerSlot::new();
}

pub fn read_preference(store: &impl KeyValueStore) -> bool {
    match store.get(config::DARK_MODE_KEY) {
        Ok(raw) => raw.is_some_and(|raw| raw.trim() == "true"),
        Err(_) => false,
    }
}

pub fn save_preference(store: &impl KeyValueStore, dark: bool) -> Result<(), StorageError> {
    store.set(config::DARK_MODE_KEY, if dark { "true" } else { "false" })
}

/// Flips the in-memory mode and returns the new one.
pub fn flip() -> bool {
    DARK.with(|dark| {
        dark.set(!dark.get());
        dark.get()
    })
}

/// Seeds the mode from storage and paints it.
pub fn init(els: &Elements, store: &impl KeyValueStore) {
    let dark = read_preference(store);
    DARK.with(|cell| cell.set(dark));
    apply(els, dark);
}

/// Body class, background image and toggle icon for the given mode.
pub fn apply(els: &Elements, dark: bool) {
    let Some(body) = gloo_utils::document().body() else {
        return;
    };
    let background = if dark {
        dom::add_class(&body, "dark-mode");
        config::DARK_BACKGROUND
    } else {
        dom::remove_class(&body, "dark-mode");
        config::LIGHT_BACKGROUND
    };
    dom::set_style(&body, "--background-image", &format!("url('{background}')"));
    dom::set_text(&els.dark_mode_icon, if dark { "☀️" } else { "🌙" });
}

pub fn toggle(els: &Elements, store: &impl KeyValueStore) {
    let dark = flip();
    if let Err(err) = save_preference(store, dark) {
        gloo_console::warn!(format!("failed to save dark mode preference: {err}"));
    }
    ripple(&els.dark_mode_toggle);
    apply(els, dark);
}

fn ripple(toggle: &Element) {
    dom::add_class(toggle, "active");
    let toggle = toggle.clone();
    RIPPLE.with(|slot| {
        slot.schedule(config::RIPPLE_MS, move || dom::remove_class(&toggle, "active"));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use ys_storage::InMemoryStore;

    #[test]
    fn preference_reads_the_legacy_string_values() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        assert!(!read_preference(&store));

        store.set(config::DARK_MODE_KEY, "true")?;
        assert!(read_preference(&store));
        store.set(config::DARK_MODE_KEY, "false")?;
        assert!(!read_preference(&store));
        store.set(config::DARK_MODE_KEY, "yes please")?;
        assert!(!read_preference(&store));
        Ok(())
    }

    #[test]
    fn mode_alternates_even_when_saving_fails() -> anyhow::Result<()> {
        let store = InMemoryStore::with_quota(0);
        DARK.with(|cell| cell.set(false));

        let first = flip();
        assert!(save_preference(&store, first).is_err());
        let second = flip();
        assert!(save_preference(&store, second).is_err());

        assert!(first);
        assert!(!second);
        assert!(!DARK.with(Cell::get));
        assert_eq!(store.get(config::DARK_MODE_KEY)?, None);
        Ok(())
    }

    #[test]
    fn saved_preference_round_trips() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        save_preference(&store, true)?;
        assert_eq!(store.get(config::DARK_MODE_KEY)?.as_deref(), Some("true"));
        assert!(read_preference(&store));
        Ok(())
    }
}
