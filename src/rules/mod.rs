//! Game rules that sit outside the turn mechanics.
//!
//! - `OpponentStrategy`: how the automated opponent decides
//! - `Outcome`: who won, derived from final scores
//!
//! The turn engine calls into these but never hardcodes a strategy.

pub mod opponent;
pub mod outcome;

pub use opponent::{worst_card, GreedyOpponent, OpponentStrategy};
pub use outcome::Outcome;
