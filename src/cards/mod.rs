//! Card system: definitions, the catalog, and scoring.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of a card in the catalog
//! - `Card`: Immutable rank, suit and label
//! - `CardCatalog`: The 52-card universe, built once
//! - `score` / `hand_score`: The fixed scoring table

pub mod definition;
pub mod registry;
pub mod scoring;

pub use definition::{rank_name, Card, CardId, Suit, ACE, JACK, KING, QUEEN};
pub use registry::{catalog, CardCatalog, DECK_SIZE};
pub use scoring::{hand_score, score};
