//! Automated opponent strategies.
//!
//! The turn engine asks a strategy two questions per opponent turn:
//! whether to take the face-up discard card, and which hand card (if any)
//! to replace with the card it ended up with. The engine performs the moves;
//! strategies only decide.

use crate::cards::{score, Card};

/// Decision policy for the automated opponent.
///
/// Implementations must be deterministic for a given hand and card.
pub trait OpponentStrategy: Send + Sync {
    /// Take `top` from the discard pile instead of drawing from the stock?
    fn take_discard(&self, hand: &[Card], top: &Card) -> bool;

    /// Index of the hand card to replace with `drawn`, or `None` to discard it.
    fn swap_index(&self, hand: &[Card], drawn: &Card) -> Option<usize>;
}

/// Index and score of the worst (highest scoring) card in `hand`.
///
/// Ties go to the first card in hand order: a later card only replaces the
/// current pick when its score is strictly greater.
#[must_use]
pub fn worst_card(hand: &[Card]) -> Option<(usize, i32)> {
    let mut worst: Option<(usize, i32)> = None;
    for (index, card) in hand.iter().enumerate() {
        let card_score = score(card);
        match worst {
            Some((_, current)) if card_score <= current => {}
            _ => worst = Some((index, card_score)),
        }
    }
    worst
}

/// Greedy opponent that always trades its worst card for a lower one.
///
/// - Takes the discard top when it scores lower than the worst card in hand.
/// - Otherwise draws, then swaps the drawn card against the worst card when
///   the drawn card scores strictly lower; else discards it.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyOpponent;

impl OpponentStrategy for GreedyOpponent {
    fn take_discard(&self, hand: &[Card], top: &Card) -> bool {
        worst_card(hand).is_some_and(|(_, worst)| score(top) < worst)
    }

    fn swap_index(&self, hand: &[Card], drawn: &Card) -> Option<usize> {
        worst_card(hand)
            .filter(|&(_, worst)| score(drawn) < worst)
            .map(|(index, _)| index)
    }
}
