//! The persistent list engine shared by every list widget on the page.

use tracing::{debug, warn};
use ys_storage::KeyValueStore;
use ys_types::{ItemId, ItemOrdering, ListItem};

use crate::clock::{Clock, SystemClock};
use crate::codec::{self, Decoded};
use crate::error::{ListError, LoadError, PersistenceError};
use crate::payload::{self, Payload};

/// Called with the full list after it is loaded or changed.
pub type RenderHook<P> = Box<dyn FnMut(&[ListItem<P>])>;

/// What a store shows when nothing has been stored under its key yet.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedPolicy<P> {
    Empty,
    Items(Vec<P>),
}

#[derive(Debug, Clone)]
pub struct StoreConfig<P> {
    pub storage_key: String,
    /// Key the list was kept under before the versioned layout.
    pub legacy_key: Option<String>,
    pub seed: SeedPolicy<P>,
}

impl<P> StoreConfig<P> {
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            legacy_key: None,
            seed: SeedPolicy::Empty,
        }
    }

    pub fn with_legacy_key(mut self, legacy_key: impl Into<String>) -> Self {
        self.legacy_key = Some(legacy_key.into());
        self
    }

    pub fn with_seed(mut self, seed: Vec<P>) -> Self {
        self.seed = SeedPolicy::Items(seed);
        self
    }
}

/// An ordered list of items mirrored to one key of a [`KeyValueStore`].
///
/// Every mutation rewrites the whole list. Writes are write-through: if the
/// backend rejects a write, the in-memory change stays and the error is
/// returned so the caller can warn the user or call [`persist`] again.
///
/// [`persist`]: PersistentList::persist
pub struct PersistentList<P: Payload, S: KeyValueStore, C: Clock = SystemClock> {
    config: StoreConfig<P>,
    store: S,
    clock: C,
    items: Vec<ListItem<P>>,
    next_id: ItemId,
    load_error: Option<LoadError>,
    render: Option<RenderHook<P>>,
}

impl<P, S, C> PersistentList<P, S, C>
where
    P: Payload,
    S: KeyValueStore,
    C: Clock,
{
    /// Builds the store and loads its list. Never fails: see [`load`].
    ///
    /// [`load`]: PersistentList::load
    pub fn open(config: StoreConfig<P>, store: S, clock: C) -> Self {
        let mut list = Self {
            config,
            store,
            clock,
            items: Vec::new(),
            next_id: ItemId(1),
            load_error: None,
            render: None,
        };
        list.load();
        list
    }

    pub fn storage_key(&self) -> &str {
        &self.config.storage_key
    }

    /// The reason the last load fell back to an empty list, if it did.
    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_ref()
    }

    /// Installs the render callback and immediately renders the current list.
    pub fn set_render_hook(&mut self, hook: impl FnMut(&[ListItem<P>]) + 'static) {
        self.render = Some(Box::new(hook));
        self.render();
    }

    /// Re-reads the list from storage.
    ///
    /// An absent key yields the configured seed. An unreadable or malformed
    /// value yields an empty list; the cause is kept in [`load_error`] and a
    /// malformed value is copied to `<key>.corrupt.<epoch_ms>` first.
    ///
    /// [`load_error`]: PersistentList::load_error
    pub fn load(&mut self) -> Vec<ListItem<P>> {
        self.load_error = None;

        let (items, next_id) = match self.read_stored() {
            Ok(Some(decoded)) => (decoded.items, decoded.next_id),
            Ok(None) => self.seed_items(),
            Err(err) => {
                warn!(kind = P::KIND, error = %err, "list storage unusable, starting empty");
                self.load_error = Some(err);
                (Vec::new(), ItemId(1))
            }
        };

        debug!(kind = P::KIND, key = %self.config.storage_key, count = items.len(), "list loaded");
        self.items = items;
        self.next_id = next_id;
        self.render();
        self.list()
    }

    /// Validates, stamps and inserts a new item, then persists the list.
    pub fn add(&mut self, payload: P) -> Result<ListItem<P>, ListError> {
        payload::validate(&payload)?;

        let item = ListItem {
            id: self.allocate_id()?,
            created_at: self.clock.now_ms(),
            payload,
        };
        match P::ORDERING {
            ItemOrdering::NewestFirst => self.items.insert(0, item.clone()),
            ItemOrdering::Insertion => self.items.push(item.clone()),
        }
        debug!(kind = P::KIND, id = %item.id, "item added");

        let persisted = self.persist();
        self.render();
        persisted?;
        Ok(item)
    }

    /// Removes the item with `id`, returning whether one was found. The list
    /// is persisted either way.
    pub fn delete(&mut self, id: ItemId) -> Result<bool, ListError> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(kind = P::KIND, %id, "item deleted");
        }

        let persisted = self.persist();
        self.render();
        persisted?;
        Ok(removed)
    }

    pub fn list(&self) -> Vec<ListItem<P>> {
        self.items.clone()
    }

    pub fn get(&self, id: ItemId) -> Option<ListItem<P>> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Writes the in-memory list over the stored value.
    pub fn persist(&self) -> Result<(), PersistenceError> {
        let encoded = codec::encode(&self.items, self.next_id).map_err(PersistenceError::Encode)?;
        self.store.set(&self.config.storage_key, &encoded).map_err(|err| {
            warn!(kind = P::KIND, key = %self.config.storage_key, error = %err, "failed to persist list");
            PersistenceError::from(err)
        })
    }

    // The last id of the range is never handed out: the counter would have
    // nowhere to go after it.
    fn allocate_id(&mut self) -> Result<ItemId, ListError> {
        let id = self.next_id;
        let Some(next) = id.next() else {
            warn!(kind = P::KIND, %id, "list has run out of ids");
            return Err(ListError::IdsExhausted);
        };
        self.next_id = next;
        Ok(id)
    }

    fn render(&mut self) {
        if let Some(hook) = self.render.as_mut() {
            hook(&self.items);
        }
    }

    fn read_stored(&self) -> Result<Option<Decoded<P>>, LoadError> {
        let key = &self.config.storage_key;
        let raw = self.store.get(key).map_err(|source| LoadError::Read {
            key: key.clone(),
            source,
        })?;

        if let Some(raw) = raw {
            return match codec::decode(&raw) {
                Ok(decoded) => Ok(Some(decoded)),
                Err(source) => {
                    self.backup_corrupt(&raw);
                    Err(LoadError::Parse {
                        key: key.clone(),
                        source,
                    })
                }
            };
        }

        self.read_legacy()
    }

    fn read_legacy(&self) -> Result<Option<Decoded<P>>, LoadError> {
        let Some(legacy_key) = &self.config.legacy_key else {
            return Ok(None);
        };
        let raw = self.store.get(legacy_key).map_err(|source| LoadError::Read {
            key: legacy_key.clone(),
            source,
        })?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let decoded = codec::decode::<P>(&raw).map_err(|source| LoadError::Parse {
            key: legacy_key.clone(),
            source,
        })?;

        match codec::encode(&decoded.items, decoded.next_id) {
            Ok(encoded) => match self.store.set(&self.config.storage_key, &encoded) {
                Ok(()) => debug!(
                    kind = P::KIND,
                    from = %legacy_key,
                    to = %self.config.storage_key,
                    count = decoded.items.len(),
                    "migrated legacy list"
                ),
                Err(err) => warn!(kind = P::KIND, error = %err, "failed to write migrated list"),
            },
            Err(err) => warn!(kind = P::KIND, error = %err, "failed to encode migrated list"),
        }

        Ok(Some(decoded))
    }

    fn backup_corrupt(&self, raw: &str) {
        let backup_key = format!("{}.corrupt.{}", self.config.storage_key, self.clock.now_ms());
        match self.store.set(&backup_key, raw) {
            Ok(()) => warn!(kind = P::KIND, backup = %backup_key, "moved unreadable list aside"),
            Err(err) => warn!(kind = P::KIND, error = %err, "failed to back up unreadable list"),
        }
    }

    fn seed_items(&self) -> (Vec<ListItem<P>>, ItemId) {
        let SeedPolicy::Items(seed) = &self.config.seed else {
            return (Vec::new(), ItemId(1));
        };

        let now = self.clock.now_ms();
        let items: Vec<ListItem<P>> = seed
            .iter()
            .cloned()
            .zip(1u64..)
            .map(|(payload, id)| ListItem {
                id: ItemId(id),
                created_at: now,
                payload,
            })
            .collect();
        let next_id = ItemId(items.len() as u64 + 1);
        (items, next_id)
    }
}
