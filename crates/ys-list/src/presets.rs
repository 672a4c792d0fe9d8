//! The three lists the site keeps, bound to their storage keys.

use ys_storage::KeyValueStore;
use ys_types::{IconShortcut, LogEntry, Message};

use crate::clock::Clock;
use crate::list::{PersistentList, StoreConfig};

pub const LOG_ENTRIES_KEY: &str = "logEntries";
pub const MESSAGE_BOARD_KEY: &str = "messageBoardPosts";
pub const CUSTOM_ICONS_KEY: &str = "customIconShortcuts";

pub const LEGACY_LOG_ENTRIES_KEY: &str = "websiteEditLogs";
pub const LEGACY_MESSAGE_BOARD_KEY: &str = "messageBoard";
pub const LEGACY_CUSTOM_ICONS_KEY: &str = "userCustomIcons";

pub const WELCOME_MESSAGE: &str = "欢迎留言！这是一个示例留言。";

pub type LogStore<S, C> = PersistentList<LogEntry, S, C>;
pub type MessageStore<S, C> = PersistentList<Message, S, C>;
pub type IconStore<S, C> = PersistentList<IconShortcut, S, C>;

pub fn log_store_config() -> StoreConfig<LogEntry> {
    StoreConfig::new(LOG_ENTRIES_KEY).with_legacy_key(LEGACY_LOG_ENTRIES_KEY)
}

pub fn message_store_config() -> StoreConfig<Message> {
    StoreConfig::new(MESSAGE_BOARD_KEY)
        .with_legacy_key(LEGACY_MESSAGE_BOARD_KEY)
        .with_seed(vec![Message::new(WELCOME_MESSAGE)])
}

pub fn icon_store_config() -> StoreConfig<IconShortcut> {
    StoreConfig::new(CUSTOM_ICONS_KEY).with_legacy_key(LEGACY_CUSTOM_ICONS_KEY)
}

pub fn open_log_store<S: KeyValueStore, C: Clock>(store: S, clock: C) -> LogStore<S, C> {
    PersistentList::open(log_store_config(), store, clock)
}

pub fn open_message_store<S: KeyValueStore, C: Clock>(store: S, clock: C) -> MessageStore<S, C> {
    PersistentList::open(message_store_config(), store, clock)
}

pub fn open_icon_store<S: KeyValueStore, C: Clock>(store: S, clock: C) -> IconStore<S, C> {
    PersistentList::open(icon_store_config(), store, clock)
}

/// The edit log kept in a RocksDB directory, for running outside a browser.
#[cfg(feature = "rocksdb")]
pub fn open_log_store_at(
    path: impl AsRef<std::path::Path>,
) -> Result<LogStore<ys_storage::RocksDbStore, crate::clock::SystemClock>, ys_storage::StorageError> {
    let store = ys_storage::RocksDbStore::open_default(path)?;
    Ok(open_log_store(store, crate::clock::SystemClock))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use ys_storage::InMemoryStore;

    #[test]
    fn message_board_starts_with_welcome_post() {
        let store = InMemoryStore::new();
        let board = open_message_store(&store, ManualClock::new(5));

        let posts = board.list();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].payload.content, WELCOME_MESSAGE);
        assert_eq!(posts[0].created_at, 5);
    }

    #[test]
    fn stores_use_distinct_keys() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        let clock = ManualClock::new(1);
        let mut log = open_log_store(&store, &clock);
        let mut board = open_message_store(&store, &clock);
        let mut grid = open_icon_store(&store, &clock);

        log.add(LogEntry::new("log"))?;
        board.add(Message::new("post"))?;
        grid.add(IconShortcut::new("icon", "http://x", "http://y"))?;

        assert_eq!(
            store.keys()?,
            vec![CUSTOM_ICONS_KEY.to_owned(), LOG_ENTRIES_KEY.to_owned(), MESSAGE_BOARD_KEY.to_owned()]
        );
        assert!(log.load_error().is_none() && board.load_error().is_none() && grid.load_error().is_none());
        Ok(())
    }

    #[test]
    fn original_message_board_is_picked_up() -> anyhow::Result<()> {
        let store = InMemoryStore::new();
        store.set(
            LEGACY_MESSAGE_BOARD_KEY,
            r#"[{"id":1,"content":"hello","time":"2024/1/1 08:00:00","timestamp":1704067200000}]"#,
        )?;

        let board = open_message_store(&store, ManualClock::new(9));
        assert_eq!(board.list()[0].payload.content, "hello");
        assert_eq!(board.list()[0].created_at, 1_704_067_200_000);
        assert!(store.get(MESSAGE_BOARD_KEY)?.is_some());
        Ok(())
    }

    #[cfg(feature = "rocksdb")]
    #[test]
    fn log_store_on_disk_survives_reopen() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let first = {
            let mut log = open_log_store_at(dir.path())?;
            log.add(LogEntry::new("kept on disk"))?
        };

        let log = open_log_store_at(dir.path())?;
        assert_eq!(log.list(), vec![first]);
        assert!(log.load_error().is_none());
        Ok(())
    }
}
