use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl ItemId {
    /// The id after this one, or `None` once the id space is used up.
    pub fn next(self) -> Option<ItemId> {
        self.0.checked_add(1).map(ItemId)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a freshly added item lands in its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOrdering {
    /// New items go to the head.
    NewestFirst,
    /// New items go to the tail.
    Insertion,
}

/// One persisted record. Payload fields are serialized next to `id` and
/// `created_at` rather than nested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListItem<P> {
    pub id: ItemId,
    pub created_at: u64,
    #[serde(flatten)]
    pub payload: P,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
}

impl LogEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub content: String,
}

impl Message {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// A user-defined shortcut shown in the icon grid.
///
/// The aliases accept the field names of the unversioned layout
/// (`url`, `image`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IconShortcut {
    pub name: String,
    #[serde(alias = "url")]
    pub target_url: String,
    #[serde(alias = "image")]
    pub image_url: String,
}

impl IconShortcut {
    pub fn new(
        name: impl Into<String>,
        target_url: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target_url: target_url.into(),
            image_url: image_url.into(),
        }
    }
}
