//! # open-table
//!
//! A turn-based card-matching engine: a 52-card catalog, store-backed decks,
//! a two-step player turn against an automated opponent, scoring, and named
//! snapshots of matches in progress.
//!
//! ## Design Principles
//!
//! 1. **Storage-Agnostic**: The engine only needs whole-entity load, save and
//!    delete by id. Implement `Store` for a real backend; `MemoryStore` ships
//!    for tests and embedding.
//!
//! 2. **All-or-Nothing Turns**: A turn is applied to an in-memory copy of the
//!    match and its decks, verified, and written as one batch.
//!
//! 3. **Server-Side Draws**: `reveal` records which card the player saw and
//!    hands back a token. `commit` trusts the token, never caller card data.
//!
//! ## Architecture
//!
//! - **Lower Scores Win**: aces -5, red tens -10, kings 0, other faces 10.
//!
//! - **Persistent Data Structures**: Deck sequences are `im::Vector`s, so
//!   snapshot copies share structure until one side changes.
//!
//! - **Deterministic When Seeded**: shuffles come from a seedable ChaCha8 RNG.
//!
//! ## Modules
//!
//! - `core`: Ids, errors, configuration, RNG
//! - `cards`: Card definitions, the catalog, scoring
//! - `decks`: Ordered card-id sequences and store-backed deck operations
//! - `store`: Storage contract and the in-memory store
//! - `rules`: Opponent strategies and match outcomes
//! - `game`: Match state and the turn engine
//! - `archive`: Save, list, restore and delete snapshots
//! - `report`: Publishing finished games to a results channel

pub mod core;
pub mod cards;
pub mod decks;
pub mod store;
pub mod rules;
pub mod game;
pub mod archive;
pub mod report;

// Re-export commonly used types
pub use crate::core::{
    DeckId, MatchId, SaveId, EntityKind,
    EngineConfig, EngineError, Result,
    GameRng, GameRngState,
};

pub use crate::cards::{catalog, hand_score, score, Card, CardCatalog, CardId, Suit};

pub use crate::decks::{Deck, DeckRole, DeckService, DeckView};

pub use crate::store::{Batch, MemoryStore, Record, Store, StoreExt};

pub use crate::rules::{GreedyOpponent, OpponentStrategy, Outcome};

pub use crate::game::{
    Decision, DrawSource, Engine, Match, Phase,
    Reveal, RevealToken, Table, TurnView,
};

pub use crate::archive::SaveRecord;

pub use crate::report::{RecordingSink, Reporter, ResultEvent, ResultSink, TracingSink};
