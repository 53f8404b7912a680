//! Match outcome. Lower total score wins.

use serde::{Deserialize, Serialize};

/// Result of a finished match, derived from the two final scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerWins,
    OpponentWins,
    Tie,
}

impl Outcome {
    /// Compare final scores.
    #[must_use]
    pub fn from_scores(player_score: i32, opponent_score: i32) -> Self {
        match player_score.cmp(&opponent_score) {
            std::cmp::Ordering::Less => Outcome::PlayerWins,
            std::cmp::Ordering::Greater => Outcome::OpponentWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    /// Closing line for the match narrative.
    #[must_use]
    pub fn announcement(self) -> &'static str {
        match self {
            Outcome::PlayerWins => "Player wins!",
            Outcome::OpponentWins => "Computer wins!",
            Outcome::Tie => "It's a tie!",
        }
    }
}
