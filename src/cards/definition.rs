//! Card definitions - immutable card data.
//!
//! A `Card` is created once when the catalog is built and never changes.
//! Decks only hold [`CardId`]s; the full card is looked up in the catalog
//! when a deck's cards are materialized.

use serde::{Deserialize, Serialize};

/// Unique identifier of a card within the catalog (1..=52).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The four suits, in catalog order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in the order the catalog assigns ids.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Lower-case suit name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    /// Red suits are hearts and diamonds.
    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowest and highest rank.
pub const ACE: u8 = 1;
pub const JACK: u8 = 11;
pub const QUEEN: u8 = 12;
pub const KING: u8 = 13;

/// Display name of a rank: `ace`, `jack`, `queen`, `king`, or the numeral.
#[must_use]
pub fn rank_name(rank: u8) -> String {
    match rank {
        ACE => "ace".to_string(),
        JACK => "jack".to_string(),
        QUEEN => "queen".to_string(),
        KING => "king".to_string(),
        n => n.to_string(),
    }
}

/// A playing card.
///
/// ## Example
///
/// ```
/// use open_table::cards::{Card, CardId, Suit};
///
/// let card = Card::new(CardId::new(12), 12, Suit::Hearts);
/// assert_eq!(card.label, "queen_of_hearts");
/// assert_eq!(card.image_file(), "queen_of_hearts.svg");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// 1 (ace) through 13 (king).
    pub rank: u8,

    pub suit: Suit,

    /// `"{rank name}_of_{suit}"`, derived from rank and suit.
    pub label: String,
}

impl Card {
    /// Create a card, deriving its label.
    #[must_use]
    pub fn new(id: CardId, rank: u8, suit: Suit) -> Self {
        Self {
            id,
            rank,
            suit,
            label: format!("{}_of_{}", rank_name(rank), suit.name()),
        }
    }

    /// Asset filename used by front ends.
    #[must_use]
    pub fn image_file(&self) -> String {
        format!("{}.svg", self.label)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", rank_name(self.rank), self.suit)
    }
}
