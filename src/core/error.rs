//! Engine error type.
//!
//! Every fallible operation returns [`Result<T>`]. Errors are synchronous and
//! never retried internally; a failed operation leaves the store untouched.

use thiserror::Error;

use super::entity::EntityKind;

/// Errors surfaced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Unknown match, deck, save or card id.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: u64 },

    /// The operation is illegal in the match's current phase.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A malformed request (unknown draw source, stale reveal token, bad config).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Revealing from an empty discard pile.
    #[error("the discard pile is empty")]
    EmptyPile,

    /// Revealing from an empty stock pile.
    #[error("the stock pile is exhausted")]
    DeckExhausted,

    /// Stored data contradicts the catalog or the match invariants.
    #[error("data integrity fault: {0}")]
    DataIntegrity(String),
}

impl EngineError {
    pub fn not_found(kind: EntityKind, id: u64) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn invalid_state(detail: impl Into<String>) -> Self {
        Self::InvalidState(detail.into())
    }

    pub fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    pub fn data_integrity(detail: impl Into<String>) -> Self {
        Self::DataIntegrity(detail.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
