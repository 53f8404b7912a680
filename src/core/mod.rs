//! Core engine types: entity ids, errors, RNG, configuration.
//!
//! These are the building blocks every other module depends on. None of them
//! know about card rules or turn order.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;

pub use config::{EngineConfig, DEFAULT_HAND_SIZE, DEFAULT_SAVE_LABEL, RESULT_CHANNEL};
pub use entity::{DeckId, EntityKind, MatchId, SaveId};
pub use error::{EngineError, Result};
pub use rng::{GameRng, GameRngState};
