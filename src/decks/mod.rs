//! Decks: ordered card-id sequences and their store-backed operations.
//!
//! ## Key Types
//!
//! - `Deck`: One pile or hand (stored record)
//! - `DeckRole`: Stock, discard, player hand, opponent hand
//! - `DeckService`: Load-mutate-save operations by deck id
//! - `DeckView`: A deck plus its cards resolved from the catalog

pub mod deck;
pub mod service;

pub use deck::{Deck, DeckRole, Drawn};
pub use service::{DeckService, DeckView};
