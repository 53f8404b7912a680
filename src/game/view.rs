//! What a caller gets back from the turn engine.

use serde::{Deserialize, Serialize};

use super::state::{DrawSource, Phase, RevealToken, Table};
use crate::cards::{Card, CardCatalog};
use crate::core::{MatchId, Result};
use crate::rules::Outcome;

/// The face-up result of [`Engine::reveal`](super::Engine::reveal).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub token: RevealToken,
    pub card: Card,
    pub source: DrawSource,
}

/// How the player resolves a revealed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Put the drawn card on the discard pile.
    Discard,
    /// Replace the hand card at this index. An index outside the hand
    /// discards the drawn card instead.
    Swap(usize),
}

/// Snapshot of a match from the player's side of the table.
///
/// The opponent's hand is reported by size only. Scores are computed from the
/// current hands, so they are meaningful before the match ends too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnView {
    pub match_id: MatchId,
    pub phase: Phase,
    pub player_hand: Vec<Card>,
    pub opponent_hand_size: usize,
    /// The card the player drew this turn, if the view follows a commit.
    pub drawn_card: Option<Card>,
    pub discard_top: Option<Card>,
    pub stock_size: usize,
    pub discard_size: usize,
    pub round: u32,
    pub is_over: bool,
    pub player_score: i32,
    pub opponent_score: i32,
    pub narrative: String,
}

impl TurnView {
    pub(crate) fn build(
        table: &Table,
        catalog: &CardCatalog,
        drawn_card: Option<Card>,
        mut narrative: String,
    ) -> Result<Self> {
        let (player_score, opponent_score) = table.live_scores(catalog)?;
        let discard_top = table
            .discard
            .peek_back()
            .map(|id| catalog.resolve(id))
            .transpose()?;

        if table.record.is_over {
            narrative.push_str(&game_over(player_score, opponent_score));
        }

        Ok(Self {
            match_id: table.record.id,
            phase: table.record.phase(),
            player_hand: table.player.materialize(catalog)?,
            opponent_hand_size: table.opponent.len(),
            drawn_card,
            discard_top,
            stock_size: table.stock.len(),
            discard_size: table.discard.len(),
            round: table.record.round,
            is_over: table.record.is_over,
            player_score,
            opponent_score,
            narrative,
        })
    }

    /// Winner, once the match is over.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_over
            .then(|| Outcome::from_scores(self.player_score, self.opponent_score))
    }
}

fn game_over(player_score: i32, opponent_score: i32) -> String {
    let outcome = Outcome::from_scores(player_score, opponent_score);
    format!(
        "\n--- GAME OVER ---\nFinal Scores: Player = {player_score}, Computer = {opponent_score}\n{}",
        outcome.announcement()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_lines() {
        let text = game_over(3, 12);
        assert!(text.starts_with("\n--- GAME OVER ---\n"));
        assert!(text.contains("Final Scores: Player = 3, Computer = 12"));
        assert!(text.ends_with("Player wins!"));

        assert!(game_over(5, 5).ends_with("It's a tie!"));
    }
}
