//! Matches and the turn engine.
//!
//! A match moves through `AwaitingDraw -> AwaitingDecision -> AwaitingDraw`
//! until the stock runs dry after an opponent turn (or it is ended manually),
//! at which point it is `Over` for good.
//!
//! ## Key Types
//!
//! - `Engine`: the turn engine over a `Store`
//! - `Match`: the persisted match record
//! - `Table`: a match loaded together with its four decks
//! - `Reveal` / `RevealToken`: the first half of a player turn
//! - `Decision`: the second half
//! - `TurnView`: what a caller sees after each call

pub mod engine;
pub mod state;
pub mod turn;
pub mod view;

pub use engine::Engine;
pub use state::{DrawSource, Match, PendingReveal, Phase, RevealToken, Table};
pub use view::{Decision, Reveal, TurnView};
