//! Store-backed deck operations.
//!
//! Each call loads one deck, mutates it, and saves it. An unknown deck id
//! fails with `NotFound` before anything is written.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::deck::{Deck, DeckRole, Drawn};
use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{DeckId, EngineError, GameRng, Result};
use crate::store::{Store, StoreExt};

/// A deck together with its cards resolved from the catalog.
///
/// The cards are a projection of `deck`; only `deck` is ever stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckView {
    pub deck: Deck,
    pub cards: Vec<Card>,
}

/// Deck operations against a store.
pub struct DeckService<'a, S: Store> {
    store: &'a mut S,
    rng: &'a mut GameRng,
    catalog: &'a CardCatalog,
}

impl<'a, S: Store> DeckService<'a, S> {
    pub fn new(store: &'a mut S, rng: &'a mut GameRng, catalog: &'a CardCatalog) -> Self {
        Self { store, rng, catalog }
    }

    /// Create and persist a deck holding `cards` in order.
    ///
    /// A repeated id is a `DataIntegrity` fault and nothing is saved.
    pub fn create(&mut self, role: DeckRole, cards: Vec<CardId>) -> Result<Deck> {
        let mut seen = FxHashSet::default();
        if let Some(repeated) = cards.iter().find(|&&card| !seen.insert(card)) {
            return Err(EngineError::data_integrity(format!(
                "{repeated} appears more than once in a new {role}"
            )));
        }
        let id = self.store.next_id::<Deck>();
        let deck = Deck::new(id, role, cards);
        self.store.save(&deck)?;
        debug!(deck.id = id.raw(), role = %role, size = deck.len(), "Created deck");
        Ok(deck)
    }

    /// Load a deck with its cards materialized in deck order.
    pub fn get(&self, id: DeckId) -> Result<DeckView> {
        let deck: Deck = self.store.load(id)?;
        let cards = deck.materialize(self.catalog)?;
        Ok(DeckView { deck, cards })
    }

    /// Shuffle a deck in place.
    pub fn shuffle(&mut self, id: DeckId) -> Result<Deck> {
        self.update(id, |deck, rng| {
            deck.shuffle(rng);
            Ok(())
        })
    }

    /// Remove up to `count` ids from the front.
    pub fn draw_front(&mut self, id: DeckId, count: usize) -> Result<Drawn> {
        let mut drawn = Drawn::new();
        self.update(id, |deck, _| {
            drawn = deck.draw_front(count);
            Ok(())
        })?;
        Ok(drawn)
    }

    /// Append a card to the back.
    pub fn add_back(&mut self, id: DeckId, card: &Card) -> Result<Deck> {
        self.catalog.lookup(card.id)?;
        self.update(id, |deck, _| deck.add_back(card.id))
    }

    /// Remove a card by id; absent cards are ignored.
    pub fn remove_by_id(&mut self, id: DeckId, card: CardId) -> Result<Deck> {
        self.update(id, |deck, _| {
            deck.remove(card);
            Ok(())
        })
    }

    /// First id, without mutating.
    pub fn peek_front(&self, id: DeckId) -> Result<Option<CardId>> {
        Ok(self.store.load::<Deck>(id)?.peek_front())
    }

    /// Last id, without mutating.
    pub fn peek_back(&self, id: DeckId) -> Result<Option<CardId>> {
        Ok(self.store.load::<Deck>(id)?.peek_back())
    }

    fn update<F>(&mut self, id: DeckId, mutate: F) -> Result<Deck>
    where
        F: FnOnce(&mut Deck, &mut GameRng) -> Result<()>,
    {
        let mut deck: Deck = self.store.load(id)?;
        mutate(&mut deck, &mut *self.rng)?;
        self.store.save(&deck)?;
        Ok(deck)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog;
    use crate::core::EntityKind;
    use crate::store::MemoryStore;

    fn ids(raw: &[u32]) -> Vec<CardId> {
        raw.iter().copied().map(CardId::new).collect()
    }

    #[test]
    fn test_create_and_get() {
        let mut store = MemoryStore::new();
        let mut rng = GameRng::new(1);
        let mut decks = DeckService::new(&mut store, &mut rng, catalog());

        let deck = decks.create(DeckRole::PlayerHand, ids(&[14, 1])).unwrap();
        let view = decks.get(deck.id).unwrap();

        assert_eq!(view.deck, deck);
        let labels: Vec<&str> = view.cards.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["ace_of_diamonds", "ace_of_hearts"]);
    }

    #[test]
    fn test_create_rejects_repeated_ids() {
        let mut store = MemoryStore::new();
        let mut rng = GameRng::new(1);
        let mut decks = DeckService::new(&mut store, &mut rng, catalog());

        let err = decks.create(DeckRole::Discard, ids(&[5, 9, 5])).unwrap_err();

        assert!(matches!(err, EngineError::DataIntegrity(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_with_unknown_card_is_integrity_fault() {
        let mut store = MemoryStore::new();
        let mut rng = GameRng::new(1);
        let mut decks = DeckService::new(&mut store, &mut rng, catalog());

        let deck = decks.create(DeckRole::Discard, ids(&[1, 77])).unwrap();
        let err = decks.get(deck.id).unwrap_err();

        assert!(matches!(err, EngineError::DataIntegrity(_)));
    }

    #[test]
    fn test_unknown_deck_is_not_found() {
        let mut store = MemoryStore::new();
        let mut rng = GameRng::new(1);
        let mut decks = DeckService::new(&mut store, &mut rng, catalog());
        let missing = DeckId::new(5);
        let expected = EngineError::not_found(EntityKind::Deck, 5);

        assert_eq!(decks.get(missing).unwrap_err(), expected);
        assert_eq!(decks.shuffle(missing).unwrap_err(), expected);
        assert_eq!(decks.draw_front(missing, 1).unwrap_err(), expected);
        assert_eq!(decks.remove_by_id(missing, CardId::new(1)).unwrap_err(), expected);
        assert_eq!(decks.peek_front(missing).unwrap_err(), expected);
        assert_eq!(decks.peek_back(missing).unwrap_err(), expected);
    }

    #[test]
    fn test_draw_front_persists() {
        let mut store = MemoryStore::new();
        let mut rng = GameRng::new(1);
        let mut decks = DeckService::new(&mut store, &mut rng, catalog());

        let deck = decks.create(DeckRole::Stock, ids(&[1, 2, 3, 4, 5])).unwrap();
        let drawn = decks.draw_front(deck.id, 2).unwrap();

        assert_eq!(drawn.to_vec(), ids(&[1, 2]));
        assert_eq!(decks.peek_front(deck.id).unwrap(), Some(CardId::new(3)));
        assert_eq!(decks.get(deck.id).unwrap().deck.len(), 3);
    }

    #[test]
    fn test_draw_from_empty_returns_nothing() {
        let mut store = MemoryStore::new();
        let mut rng = GameRng::new(1);
        let mut decks = DeckService::new(&mut store, &mut rng, catalog());

        let deck = decks.create(DeckRole::Stock, Vec::new()).unwrap();
        assert!(decks.draw_front(deck.id, 3).unwrap().is_empty());
    }

    #[test]
    fn test_add_back_and_remove() {
        let mut store = MemoryStore::new();
        let mut rng = GameRng::new(1);
        let mut decks = DeckService::new(&mut store, &mut rng, catalog());

        let pile = decks.create(DeckRole::Discard, Vec::new()).unwrap();
        let seven = catalog().lookup(CardId::new(7)).unwrap().clone();

        decks.add_back(pile.id, &seven).unwrap();
        assert_eq!(decks.peek_back(pile.id).unwrap(), Some(CardId::new(7)));

        decks.remove_by_id(pile.id, CardId::new(7)).unwrap();
        decks.remove_by_id(pile.id, CardId::new(7)).unwrap();
        assert_eq!(decks.peek_back(pile.id).unwrap(), None);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let shuffled = |seed| {
            let mut store = MemoryStore::new();
            let mut rng = GameRng::new(seed);
            let mut decks = DeckService::new(&mut store, &mut rng, catalog());
            let deck = decks.create(DeckRole::Stock, ids(&(1..=52).collect::<Vec<_>>())).unwrap();
            decks.shuffle(deck.id).unwrap().card_ids()
        };

        assert_eq!(shuffled(3), shuffled(3));
        assert_ne!(shuffled(3), shuffled(4));
    }
}
