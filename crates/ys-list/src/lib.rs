//! Persistent list widgets: ordered item lists mirrored to a key-value store.

pub mod clock;
pub mod codec;
pub mod error;
pub mod list;
pub mod payload;
pub mod presets;
pub mod render;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CodecError, ListError, LoadError, PersistenceError, ValidationError};
pub use list::{PersistentList, RenderHook, SeedPolicy, StoreConfig};
pub use payload::Payload;
pub use presets::{IconStore, LogStore, MessageStore};
pub use ys_types::{IconShortcut, ItemId, ItemOrdering, ListItem, LogEntry, Message};
