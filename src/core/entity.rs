//! Entity identification for stored records.
//!
//! Decks, matches and save records live in a [`Store`](crate::store::Store)
//! and are addressed by typed ids. Each kind has its own id space, allocated
//! by the store starting at 1.
//!
//! ## Usage
//!
//! ```
//! use open_table::core::{DeckId, EntityKind, MatchId};
//!
//! let deck = DeckId::new(3);
//! let game = MatchId::new(3);
//!
//! // Same raw value, different kinds
//! assert_eq!(deck.raw(), game.raw());
//! assert_eq!(EntityKind::Deck.to_string(), "deck");
//! ```

use serde::{Deserialize, Serialize};

/// The kinds of entity the engine persists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Card,
    Deck,
    Match,
    Save,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            EntityKind::Card => "card",
            EntityKind::Deck => "deck",
            EntityKind::Match => "match",
            EntityKind::Save => "save",
        })
    }
}

/// Identifier of a stored deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeckId(pub u64);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for DeckId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<DeckId> for u64 {
    fn from(id: DeckId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deck({})", self.0)
    }
}

/// Identifier of a stored match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchId(pub u64);

impl MatchId {
    /// Create a new match ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for MatchId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<MatchId> for u64 {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Match({})", self.0)
    }
}

/// Identifier of a save record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SaveId(pub u64);

impl SaveId {
    /// Create a new save ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for SaveId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<SaveId> for u64 {
    fn from(id: SaveId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SaveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Save({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DeckId::new(7).to_string(), "Deck(7)");
        assert_eq!(MatchId::new(1).to_string(), "Match(1)");
        assert_eq!(SaveId::new(12).to_string(), "Save(12)");
        assert_eq!(EntityKind::Save.to_string(), "save");
    }

    #[test]
    fn test_ordering_follows_raw_value() {
        assert!(SaveId::new(2) > SaveId::new(1));
        assert_eq!(MatchId::new(5).raw(), 5);
    }
}
