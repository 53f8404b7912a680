//! Storage contract consumed by the engine.
//!
//! The engine needs whole-entity load, save and delete by id, nothing more.
//! A [`Store`] is a key-value map from `(EntityKind, id)` to encoded bytes;
//! [`StoreExt`] layers typed access on top for any [`Record`].
//!
//! Multi-record writes go through a [`Batch`]: every record is encoded first,
//! and only when all encodings succeed are the bytes written. A failed
//! operation therefore never leaves half of its writes behind.
//!
//! ## Key Types
//!
//! - `Store`: raw key-value storage (implement this for a real backend)
//! - `Record`: an entity with a kind and a typed id
//! - `StoreExt`: typed `load`/`save`/`delete`/`load_all`
//! - `Batch`: all-or-nothing write set
//! - `MemoryStore`: in-process implementation

pub mod memory;

pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{EngineError, EntityKind, Result};

/// Raw key-value storage keyed by entity kind and id.
pub trait Store {
    /// Reserve a fresh id for `kind`. Ids are never reused.
    fn allocate(&mut self, kind: EntityKind) -> u64;

    /// Read the bytes stored under `(kind, id)`.
    fn read(&self, kind: EntityKind, id: u64) -> Option<Vec<u8>>;

    /// Write bytes under `(kind, id)`, replacing any previous value.
    fn write(&mut self, kind: EntityKind, id: u64, bytes: Vec<u8>);

    /// Remove `(kind, id)`. Returns whether it existed.
    fn remove(&mut self, kind: EntityKind, id: u64) -> bool;

    /// All ids currently stored for `kind`, ascending.
    fn ids(&self, kind: EntityKind) -> Vec<u64>;
}

/// A persisted entity.
pub trait Record: Serialize + DeserializeOwned {
    /// Kind tag used as the first half of the storage key.
    const KIND: EntityKind;

    /// Typed identifier.
    type Id: Copy + Into<u64> + From<u64>;

    /// This record's id.
    fn id(&self) -> Self::Id;
}

pub(crate) fn encode<R: Record>(record: &R) -> Result<Vec<u8>> {
    bincode::serialize(record).map_err(|err| {
        EngineError::data_integrity(format!("cannot encode {}: {err}", R::KIND))
    })
}

pub(crate) fn decode<R: Record>(id: u64, bytes: &[u8]) -> Result<R> {
    bincode::deserialize(bytes).map_err(|err| {
        EngineError::data_integrity(format!("cannot decode {} {id}: {err}", R::KIND))
    })
}

/// Typed access to any [`Store`].
pub trait StoreExt: Store {
    /// Allocate a typed id for a new record.
    fn next_id<R: Record>(&mut self) -> R::Id {
        R::Id::from(self.allocate(R::KIND))
    }

    /// Load a record, failing with `NotFound` when absent.
    fn load<R: Record>(&self, id: R::Id) -> Result<R> {
        let raw = id.into();
        let bytes = self
            .read(R::KIND, raw)
            .ok_or_else(|| EngineError::not_found(R::KIND, raw))?;
        decode(raw, &bytes)
    }

    /// Check whether a record exists.
    fn exists<R: Record>(&self, id: R::Id) -> bool {
        self.read(R::KIND, id.into()).is_some()
    }

    /// Save a single record.
    fn save<R: Record>(&mut self, record: &R) -> Result<()> {
        let bytes = encode(record)?;
        self.write(R::KIND, record.id().into(), bytes);
        Ok(())
    }

    /// Delete a record, failing with `NotFound` when absent.
    fn delete<R: Record>(&mut self, id: R::Id) -> Result<()> {
        let raw = id.into();
        if self.remove(R::KIND, raw) {
            Ok(())
        } else {
            Err(EngineError::not_found(R::KIND, raw))
        }
    }

    /// Load every record of a kind, in ascending id order.
    fn load_all<R: Record>(&self) -> Result<Vec<R>> {
        self.ids(R::KIND)
            .into_iter()
            .map(|raw| self.load(R::Id::from(raw)))
            .collect()
    }
}

impl<S: Store + ?Sized> StoreExt for S {}

/// An all-or-nothing set of writes and removals.
///
/// ```
/// use open_table::decks::{Deck, DeckRole};
/// use open_table::core::DeckId;
/// use open_table::store::{Batch, MemoryStore, StoreExt};
///
/// let mut store = MemoryStore::new();
/// let mut batch = Batch::new();
/// batch.put(&Deck::new(DeckId::new(1), DeckRole::Discard, Vec::new())).unwrap();
/// batch.commit(&mut store);
///
/// assert!(store.exists::<Deck>(DeckId::new(1)));
/// ```
#[derive(Debug, Default)]
pub struct Batch {
    writes: Vec<(EntityKind, u64, Vec<u8>)>,
    removals: Vec<(EntityKind, u64)>,
}

impl Batch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode a record now; write it on commit.
    pub fn put<R: Record>(&mut self, record: &R) -> Result<()> {
        let bytes = encode(record)?;
        self.writes.push((R::KIND, record.id().into(), bytes));
        Ok(())
    }

    /// Remove a record on commit.
    pub fn remove<R: Record>(&mut self, id: R::Id) {
        self.removals.push((R::KIND, id.into()));
    }

    /// Number of pending writes and removals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.writes.len() + self.removals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply every pending change. Cannot fail.
    pub fn commit<S: Store + ?Sized>(self, store: &mut S) {
        for (kind, id, bytes) in self.writes {
            store.write(kind, id, bytes);
        }
        for (kind, id) in self.removals {
            store.remove(kind, id);
        }
    }
}
