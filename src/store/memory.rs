//! In-process [`Store`] backed by hash maps.
//!
//! Values are kept as encoded bytes, so every load decodes a fresh value and
//! nothing handed out by the store aliases what it holds.

use rustc_hash::FxHashMap;

use super::Store;
use crate::core::EntityKind;

/// Hash-map store for tests and single-process embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<(EntityKind, u64), Vec<u8>>,
    counters: FxHashMap<EntityKind, u64>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entities of one kind.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entries.keys().filter(|(k, _)| *k == kind).count()
    }

    /// Total number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn allocate(&mut self, kind: EntityKind) -> u64 {
        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        *counter
    }

    fn read(&self, kind: EntityKind, id: u64) -> Option<Vec<u8>> {
        self.entries.get(&(kind, id)).cloned()
    }

    fn write(&mut self, kind: EntityKind, id: u64, bytes: Vec<u8>) {
        self.entries.insert((kind, id), bytes);
    }

    fn remove(&mut self, kind: EntityKind, id: u64) -> bool {
        self.entries.remove(&(kind, id)).is_some()
    }

    fn ids(&self, kind: EntityKind) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .entries
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|&(_, id)| id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::{DeckId, EngineError};
    use crate::decks::{Deck, DeckRole};
    use crate::store::{Batch, StoreExt};

    fn deck(id: u64, cards: &[u32]) -> Deck {
        Deck::new(
            DeckId::new(id),
            DeckRole::PlayerHand,
            cards.iter().copied().map(CardId::new).collect(),
        )
    }

    #[test]
    fn test_allocate_is_per_kind() {
        let mut store = MemoryStore::new();

        assert_eq!(store.allocate(EntityKind::Deck), 1);
        assert_eq!(store.allocate(EntityKind::Deck), 2);
        assert_eq!(store.allocate(EntityKind::Match), 1);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        store.save(&deck(3, &[5, 6, 7])).unwrap();

        let loaded: Deck = store.load(DeckId::new(3)).unwrap();
        assert_eq!(loaded.card_ids(), vec![CardId::new(5), CardId::new(6), CardId::new(7)]);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.load::<Deck>(DeckId::new(1)).unwrap_err();
        assert_eq!(err, EngineError::not_found(EntityKind::Deck, 1));
    }

    #[test]
    fn test_loads_are_independent() {
        let mut store = MemoryStore::new();
        store.save(&deck(1, &[1, 2])).unwrap();

        let mut first: Deck = store.load(DeckId::new(1)).unwrap();
        first.add_back(CardId::new(9)).unwrap();

        let second: Deck = store.load(DeckId::new(1)).unwrap();
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_delete() {
        let mut store = MemoryStore::new();
        store.save(&deck(1, &[1])).unwrap();

        store.delete::<Deck>(DeckId::new(1)).unwrap();
        assert!(!store.exists::<Deck>(DeckId::new(1)));
        assert!(store.delete::<Deck>(DeckId::new(1)).is_err());
    }

    #[test]
    fn test_load_all_in_id_order() {
        let mut store = MemoryStore::new();
        store.save(&deck(4, &[4])).unwrap();
        store.save(&deck(2, &[2])).unwrap();

        let all: Vec<Deck> = store.load_all().unwrap();
        let ids: Vec<u64> = all.iter().map(|d| d.id.raw()).collect();
        assert_eq!(ids, vec![2, 4]);
        assert_eq!(store.count(EntityKind::Deck), 2);
    }

    #[test]
    fn test_batch_applies_everything() {
        let mut store = MemoryStore::new();
        store.save(&deck(1, &[1])).unwrap();

        let mut batch = Batch::new();
        batch.put(&deck(2, &[2])).unwrap();
        batch.remove::<Deck>(DeckId::new(1));
        assert_eq!(batch.len(), 2);

        assert_eq!(store.len(), 1);
        batch.commit(&mut store);

        assert!(store.exists::<Deck>(DeckId::new(2)));
        assert!(!store.exists::<Deck>(DeckId::new(1)));
    }
}
