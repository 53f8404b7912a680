//! Ordered card-id sequences.
//!
//! One structure serves every pile in a match:
//! - the stock is a FIFO queue (draw from the front, never add)
//! - the discard pile is a LIFO stack (add to and peek at the back)
//! - hands are ordered so a card can be addressed by index
//!
//! Which access pattern applies to which role is enforced by the turn engine,
//! not here.
//!
//! Sequences are `im::Vector`s, so cloning a deck for a snapshot shares
//! structure until either side changes.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardCatalog, CardId};
use crate::core::{DeckId, EngineError, EntityKind, GameRng, Result};
use crate::store::Record;

/// The role a deck plays in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckRole {
    /// Main draw pile.
    Stock,
    /// Open table; the back card is face up.
    Discard,
    PlayerHand,
    OpponentHand,
}

impl DeckRole {
    /// Human-readable role name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DeckRole::Stock => "stock",
            DeckRole::Discard => "discard",
            DeckRole::PlayerHand => "player hand",
            DeckRole::OpponentHand => "opponent hand",
        }
    }
}

impl std::fmt::Display for DeckRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ids drawn in one call. Draws are almost always a single card or a hand.
pub type Drawn = SmallVec<[CardId; 4]>;

/// An ordered sequence of card ids with no duplicates.
///
/// ## Example
///
/// ```
/// use open_table::cards::CardId;
/// use open_table::core::DeckId;
/// use open_table::decks::{Deck, DeckRole};
///
/// let ids = (1..=6).map(CardId::new).collect();
/// let mut stock = Deck::new(DeckId::new(1), DeckRole::Stock, ids);
///
/// let hand = stock.draw_front(4);
/// assert_eq!(hand.as_slice(), &[CardId::new(1), CardId::new(2), CardId::new(3), CardId::new(4)]);
/// assert_eq!(stock.peek_front(), Some(CardId::new(5)));
/// assert_eq!(stock.peek_back(), Some(CardId::new(6)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub role: DeckRole,
    cards: Vector<CardId>,
}

impl Record for Deck {
    const KIND: EntityKind = EntityKind::Deck;
    type Id = DeckId;

    fn id(&self) -> DeckId {
        self.id
    }
}

impl Deck {
    /// Create a deck holding `cards` in order.
    #[must_use]
    pub fn new(id: DeckId, role: DeckRole, cards: Vec<CardId>) -> Self {
        Self {
            id,
            role,
            cards: Vector::from(cards),
        }
    }

    /// Copy this deck's contents under a new identity.
    #[must_use]
    pub fn clone_as(&self, id: DeckId) -> Self {
        Self {
            id,
            role: self.role,
            cards: self.cards.clone(),
        }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Check whether the deck holds a card.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    /// Iterate ids front to back.
    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }

    /// Ids front to back.
    #[must_use]
    pub fn card_ids(&self) -> Vec<CardId> {
        self.iter().collect()
    }

    /// Id at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CardId> {
        self.cards.get(index).copied()
    }

    /// First id, without removing it.
    #[must_use]
    pub fn peek_front(&self) -> Option<CardId> {
        self.cards.front().copied()
    }

    /// Last id, without removing it. The visible top of a discard pile.
    #[must_use]
    pub fn peek_back(&self) -> Option<CardId> {
        self.cards.back().copied()
    }

    /// Remove up to `count` ids from the front, in their original order.
    ///
    /// Returns fewer (possibly none) when the deck runs out.
    pub fn draw_front(&mut self, count: usize) -> Drawn {
        let take = count.min(self.cards.len());
        let rest = self.cards.split_off(take);
        let drawn = std::mem::replace(&mut self.cards, rest);
        drawn.into_iter().collect()
    }

    /// Remove the front id.
    pub fn pop_front(&mut self) -> Option<CardId> {
        self.cards.pop_front()
    }

    /// Append an id to the back.
    ///
    /// A card already in this deck is a `DataIntegrity` fault.
    pub fn add_back(&mut self, card: CardId) -> Result<()> {
        if self.contains(card) {
            return Err(EngineError::data_integrity(format!(
                "{card} is already in {} {}",
                self.role, self.id
            )));
        }
        self.cards.push_back(card);
        Ok(())
    }

    /// Remove a card by id. Returns whether it was present.
    pub fn remove(&mut self, card: CardId) -> bool {
        match self.cards.index_of(&card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove and return the id at `index`, if in range.
    pub fn remove_at(&mut self, index: usize) -> Option<CardId> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    /// Permute the sequence uniformly at random.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut ids = self.card_ids();
        rng.shuffle(&mut ids);
        self.cards = Vector::from(ids);
    }

    /// Resolve ids to full cards, in deck order.
    pub fn materialize(&self, catalog: &CardCatalog) -> Result<Vec<Card>> {
        catalog.materialize(self.iter())
    }
}
