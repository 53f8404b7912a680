//! Engine configuration.
//!
//! The engine is configured once at construction. All fields have defaults,
//! so an `EngineConfig` can be deserialized from a partial document or built
//! with the chained setters:
//!
//! ```
//! use open_table::core::EngineConfig;
//!
//! let config = EngineConfig::default().with_seed(42).with_hand_size(4);
//! assert_eq!(config.seed, Some(42));
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use crate::cards::DECK_SIZE;

/// Default number of cards dealt to each hand.
pub const DEFAULT_HAND_SIZE: usize = 4;

/// Label used when a snapshot is taken without a usable label.
pub const DEFAULT_SAVE_LABEL: &str = "Saved Game";

/// Channel name of the external results archive.
pub const RESULT_CHANNEL: &str = "game-result";

/// Configuration for an [`Engine`](crate::game::Engine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cards dealt to the player and to the opponent.
    pub hand_size: usize,

    /// Seed for deck shuffles. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Label given to snapshots whose label is blank.
    pub default_save_label: String,

    /// Channel the result reporter publishes to.
    pub result_channel: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            seed: None,
            default_save_label: DEFAULT_SAVE_LABEL.to_string(),
            result_channel: RESULT_CHANNEL.to_string(),
        }
    }
}

impl EngineConfig {
    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of cards per hand.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the fallback snapshot label.
    #[must_use]
    pub fn with_default_save_label(mut self, label: impl Into<String>) -> Self {
        self.default_save_label = label.into();
        self
    }

    /// Set the result channel name.
    #[must_use]
    pub fn with_result_channel(mut self, channel: impl Into<String>) -> Self {
        self.result_channel = channel.into();
        self
    }

    /// Check that a full deal fits in the deck and leaves a stock to draw from.
    pub fn validate(&self) -> Result<()> {
        if self.hand_size == 0 {
            return Err(EngineError::invalid_argument("hand size must be at least 1"));
        }
        if self.hand_size > (DECK_SIZE - 1) / 2 {
            return Err(EngineError::invalid_argument(format!(
                "hand size {} leaves no stock in a {DECK_SIZE}-card deck",
                self.hand_size
            )));
        }
        if self.result_channel.trim().is_empty() {
            return Err(EngineError::invalid_argument("result channel must be named"));
        }
        Ok(())
    }
}
