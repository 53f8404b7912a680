//! Match state.
//!
//! A [`Match`] record holds references to its four decks plus the scalar
//! state of the game. A [`Table`] is the match loaded together with those
//! decks: the unit every turn mutates in memory and then writes back whole.

use serde::{Deserialize, Serialize};

use crate::cards::{hand_score, CardCatalog, CardId};
use crate::core::{DeckId, EngineError, EntityKind, MatchId, Result};
use crate::decks::{Deck, DeckRole};
use crate::store::{Batch, Record};

/// Where the player draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawSource {
    /// Front of the stock.
    Stock,
    /// Back of the discard pile (the face-up card).
    Discard,
}

impl DrawSource {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DrawSource::Stock => "stock",
            DrawSource::Discard => "discard",
        }
    }
}

impl std::fmt::Display for DrawSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DrawSource {
    type Err = EngineError;

    fn from_str(source: &str) -> Result<Self> {
        match source {
            "stock" | "mainDeck" => Ok(DrawSource::Stock),
            "discard" | "openTable" => Ok(DrawSource::Discard),
            other => Err(EngineError::invalid_argument(format!(
                "unknown draw source: {other:?}"
            ))),
        }
    }
}

/// Where a match is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to reveal a card.
    AwaitingDraw,
    /// A card is revealed; waiting for the player's decision.
    AwaitingDecision,
    /// Terminal.
    Over,
}

/// Handle for one reveal. Only the latest token of a match commits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevealToken {
    pub match_id: MatchId,
    pub serial: u64,
}

impl std::fmt::Display for RevealToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.match_id, self.serial)
    }
}

/// The card a player has looked at but not yet acted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReveal {
    pub token: RevealToken,
    pub card: CardId,
    pub source: DrawSource,
}

/// A match record. Decks are referenced by id and owned exclusively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub stock: DeckId,
    pub discard: DeckId,
    pub player_hand: DeckId,
    pub opponent_hand: DeckId,
    /// Final player score. Only meaningful once `is_over`.
    pub player_score: i32,
    /// Final opponent score. Only meaningful once `is_over`.
    pub opponent_score: i32,
    /// Starts at 1; incremented once per completed turn cycle that does not end the match.
    pub round: u32,
    /// Never goes back to false.
    pub is_over: bool,
    pub pending: Option<PendingReveal>,
    reveals_issued: u64,
}

impl Record for Match {
    const KIND: EntityKind = EntityKind::Match;
    type Id = MatchId;

    fn id(&self) -> MatchId {
        self.id
    }
}

impl Match {
    /// Current phase, derived from `is_over` and the pending reveal.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_over {
            Phase::Over
        } else if self.pending.is_some() {
            Phase::AwaitingDecision
        } else {
            Phase::AwaitingDraw
        }
    }

    /// Record a new pending reveal, superseding any earlier one.
    pub(crate) fn issue_reveal(&mut self, card: CardId, source: DrawSource) -> PendingReveal {
        self.reveals_issued += 1;
        let pending = PendingReveal {
            token: RevealToken {
                match_id: self.id,
                serial: self.reveals_issued,
            },
            card,
            source,
        };
        self.pending = Some(pending);
        pending
    }
}

/// A match together with its four decks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub record: Match,
    pub stock: Deck,
    pub discard: Deck,
    pub player: Deck,
    pub opponent: Deck,
}

impl Table {
    /// Assemble a fresh match around four decks: round 1, scores 0.
    #[must_use]
    pub fn new(id: MatchId, stock: Deck, discard: Deck, player: Deck, opponent: Deck) -> Self {
        let record = Match {
            id,
            stock: stock.id,
            discard: discard.id,
            player_hand: player.id,
            opponent_hand: opponent.id,
            player_score: 0,
            opponent_score: 0,
            round: 1,
            is_over: false,
            pending: None,
            reveals_issued: 0,
        };
        Self {
            record,
            stock,
            discard,
            player,
            opponent,
        }
    }

    /// The decks in stock, discard, player, opponent order.
    #[must_use]
    pub fn decks(&self) -> [&Deck; 4] {
        [&self.stock, &self.discard, &self.player, &self.opponent]
    }

    /// Check that the decks are the ones the record names, in their roles.
    pub fn check_links(&self) -> Result<()> {
        let expected = [
            (self.record.stock, DeckRole::Stock),
            (self.record.discard, DeckRole::Discard),
            (self.record.player_hand, DeckRole::PlayerHand),
            (self.record.opponent_hand, DeckRole::OpponentHand),
        ];
        for (deck, (id, role)) in self.decks().into_iter().zip(expected) {
            if deck.id != id || deck.role != role {
                return Err(EngineError::data_integrity(format!(
                    "{} expects {role} {id}, found {} {}",
                    self.record.id, deck.role, deck.id
                )));
            }
        }
        Ok(())
    }

    /// Check that every catalog card is in exactly one deck.
    pub fn check_partition(&self, catalog: &CardCatalog) -> Result<()> {
        let mut seen = rustc_hash::FxHashSet::default();
        for deck in self.decks() {
            for card in deck.iter() {
                if !catalog.contains(card) {
                    return Err(EngineError::data_integrity(format!(
                        "{} holds {card}, which is not in the catalog",
                        deck.id
                    )));
                }
                if !seen.insert(card) {
                    return Err(EngineError::data_integrity(format!(
                        "{card} appears more than once in {}",
                        self.record.id
                    )));
                }
            }
        }
        if seen.len() != catalog.len() {
            return Err(EngineError::data_integrity(format!(
                "{} holds {} of {} cards",
                self.record.id,
                seen.len(),
                catalog.len()
            )));
        }
        Ok(())
    }

    /// Live `(player, opponent)` scores of the current hands.
    pub fn live_scores(&self, catalog: &CardCatalog) -> Result<(i32, i32)> {
        let player = self.player.materialize(catalog)?;
        let opponent = self.opponent.materialize(catalog)?;
        Ok((hand_score(&player), hand_score(&opponent)))
    }

    /// Mark the match over and fix the final scores. Idempotent.
    pub(crate) fn finish(&mut self, catalog: &CardCatalog) -> Result<()> {
        let (player, opponent) = self.live_scores(catalog)?;
        self.record.player_score = player;
        self.record.opponent_score = opponent;
        self.record.is_over = true;
        self.record.pending = None;
        Ok(())
    }

    /// Copy the whole match under new identities. The pending reveal is not
    /// carried over; the copy starts a fresh turn.
    #[must_use]
    pub fn clone_as(&self, id: MatchId, decks: [DeckId; 4]) -> Self {
        let [stock, discard, player, opponent] = decks;
        let mut copy = Self::new(
            id,
            self.stock.clone_as(stock),
            self.discard.clone_as(discard),
            self.player.clone_as(player),
            self.opponent.clone_as(opponent),
        );
        copy.record.player_score = self.record.player_score;
        copy.record.opponent_score = self.record.opponent_score;
        copy.record.round = self.record.round;
        copy.record.is_over = self.record.is_over;
        copy
    }

    /// Queue the record and its decks for writing.
    pub(crate) fn stage(&self, batch: &mut Batch) -> Result<()> {
        for deck in self.decks() {
            batch.put(deck)?;
        }
        batch.put(&self.record)
    }

    /// Queue the record and its decks for removal.
    pub(crate) fn stage_removal(&self, batch: &mut Batch) {
        for deck in self.decks() {
            batch.remove::<Deck>(deck.id);
        }
        batch.remove::<Match>(self.record.id);
    }
}
