//! Card catalog for card lookup.
//!
//! The `CardCatalog` holds the fixed 52-card universe. The process-wide
//! instance returned by [`catalog`] is built exactly once on first use and is
//! read-only afterwards; there is no write path to it.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::definition::{Card, CardId, Suit, ACE, KING};
use crate::core::{EngineError, EntityKind, Result};

/// Number of cards in a full catalog.
pub const DECK_SIZE: usize = 52;

static CATALOG: Lazy<CardCatalog> = Lazy::new(|| {
    let mut catalog = CardCatalog::new();
    catalog.build();
    catalog
});

/// The process-wide card catalog.
#[must_use]
pub fn catalog() -> &'static CardCatalog {
    &CATALOG
}

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use open_table::cards::{CardCatalog, CardId, Suit};
///
/// let mut catalog = CardCatalog::new();
/// catalog.build();
///
/// let first = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(first.rank, 1);
/// assert_eq!(first.suit, Suit::Hearts);
/// assert_eq!(catalog.len(), 52);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
    order: Vec<CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the catalog with one card per suit and rank.
    ///
    /// Ids run from 1 to 52, suit by suit in [`Suit::ALL`] order, ace to king
    /// within a suit. Calling it on a catalog that already holds 52 cards does
    /// nothing; the check is by count, not by content.
    pub fn build(&mut self) {
        if self.cards.len() == DECK_SIZE {
            return;
        }

        self.cards.clear();
        self.order.clear();

        let mut next_id = 1u32;
        for suit in Suit::ALL {
            for rank in ACE..=KING {
                let id = CardId::new(next_id);
                next_id += 1;
                self.cards.insert(id, Card::new(id, rank, suit));
                self.order.push(id);
            }
        }
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Get a card by ID, failing with `NotFound`.
    pub fn lookup(&self, id: CardId) -> Result<&Card> {
        self.get(id)
            .ok_or_else(|| EngineError::not_found(EntityKind::Card, u64::from(id.raw())))
    }

    /// Resolve an id held by a deck. A missing card is a `DataIntegrity` fault.
    pub fn resolve(&self, id: CardId) -> Result<Card> {
        self.get(id)
            .cloned()
            .ok_or_else(|| EngineError::data_integrity(format!("{id} is not in the catalog")))
    }

    /// Resolve a sequence of ids to cards, preserving order.
    ///
    /// An id missing from the catalog is a `DataIntegrity` fault.
    pub fn materialize(&self, ids: impl IntoIterator<Item = CardId>) -> Result<Vec<Card>> {
        ids.into_iter().map(|id| self.resolve(id)).collect()
    }

    /// Check if a card ID is in the catalog.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// All card ids in catalog order.
    #[must_use]
    pub fn ids(&self) -> &[CardId] {
        &self.order
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.order.iter().filter_map(move |id| self.cards.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_produces_full_deck() {
        let mut catalog = CardCatalog::new();
        assert!(catalog.is_empty());

        catalog.build();
        assert_eq!(catalog.len(), 52);

        for suit in Suit::ALL {
            let ranks: Vec<u8> = catalog.iter().filter(|c| c.suit == suit).map(|c| c.rank).collect();
            assert_eq!(ranks, (1..=13).collect::<Vec<u8>>());
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut catalog = CardCatalog::new();
        catalog.build();
        let before: Vec<Card> = catalog.iter().cloned().collect();

        catalog.build();

        assert_eq!(catalog.len(), 52);
        assert_eq!(catalog.iter().cloned().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_ids_are_sequential() {
        let ids: Vec<u32> = catalog().ids().iter().map(|id| id.raw()).collect();
        assert_eq!(ids, (1..=52).collect::<Vec<u32>>());
    }

    #[test]
    fn test_labels_are_unique() {
        let mut labels: Vec<&str> = catalog().iter().map(|c| c.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 52);
    }

    #[test]
    fn test_lookup_unknown_is_not_found() {
        let err = catalog().lookup(CardId::new(99)).unwrap_err();
        assert_eq!(err, EngineError::not_found(EntityKind::Card, 99));
    }

    #[test]
    fn test_materialize_preserves_order() {
        let cards = catalog()
            .materialize([CardId::new(40), CardId::new(2), CardId::new(27)])
            .unwrap();
        let ids: Vec<u32> = cards.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![40, 2, 27]);
    }

    #[test]
    fn test_materialize_unknown_is_integrity_fault() {
        let err = catalog().materialize([CardId::new(3), CardId::new(0)]).unwrap_err();
        assert!(matches!(err, EngineError::DataIntegrity(_)));
    }
}
