//! Result event payload.

use serde::{Deserialize, Serialize};

/// One finished game, as published on the result channel.
///
/// Serialized with camelCase keys:
///
/// ```
/// use open_table::report::ResultEvent;
///
/// let event = ResultEvent::new("ada", 4, 17, 9);
/// let json = serde_json::to_string(&event).unwrap();
/// assert_eq!(json, r#"{"playerName":"ada","playerScore":4,"computerScore":17,"rounds":9}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEvent {
    pub player_name: String,
    pub player_score: i32,
    pub computer_score: i32,
    pub rounds: u32,
}

impl ResultEvent {
    #[must_use]
    pub fn new(player_name: impl Into<String>, player_score: i32, computer_score: i32, rounds: u32) -> Self {
        Self {
            player_name: player_name.into(),
            player_score,
            computer_score,
            rounds,
        }
    }

    /// JSON wire form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
