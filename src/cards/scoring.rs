//! Card and hand scoring. Lower is better.
//!
//! | Card                           | Score      |
//! |--------------------------------|------------|
//! | Ace                            | -5         |
//! | King                           | 0          |
//! | Ten of diamonds or hearts      | -10        |
//! | Two through nine               | face value |
//! | Other ten, jack, queen         | 10         |
//!
//! Rules are checked top to bottom; the first match wins.

use super::definition::{Card, ACE, KING};

/// Score of a single card.
#[must_use]
pub fn score(card: &Card) -> i32 {
    match card.rank {
        ACE => -5,
        KING => 0,
        10 if card.suit.is_red() => -10,
        rank @ 2..=9 => i32::from(rank),
        _ => 10,
    }
}

/// Sum of card scores. An empty hand scores 0.
#[must_use]
pub fn hand_score<'a>(cards: impl IntoIterator<Item = &'a Card>) -> i32 {
    cards.into_iter().map(score).sum()
}
