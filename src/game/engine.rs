//! The turn engine.
//!
//! Every mutating call follows the same shape: load the [`Table`], mutate it
//! in memory, verify it, then write the record and all four decks in one
//! [`Batch`]. A call that fails anywhere before the batch commits leaves the
//! store exactly as it was.

use tracing::{debug, info};

use super::state::{DrawSource, Match, RevealToken, Table};
use super::view::{Decision, Reveal, TurnView};
use crate::cards::{catalog, CardCatalog};
use crate::core::{DeckId, EngineConfig, EngineError, GameRng, GameRngState, MatchId, Result};
use crate::decks::{Deck, DeckRole, DeckService};
use crate::report::{Reporter, ResultEvent, ResultSink, TracingSink};
use crate::rules::{GreedyOpponent, OpponentStrategy};
use crate::store::{Batch, Store, StoreExt};

/// Runs matches against a store.
///
/// ## Example
///
/// ```
/// use open_table::core::EngineConfig;
/// use open_table::game::{Decision, DrawSource, Engine};
/// use open_table::store::MemoryStore;
///
/// let mut engine = Engine::new(MemoryStore::new(), EngineConfig::default().with_seed(7)).unwrap();
/// let dealt = engine.deal().unwrap();
/// assert_eq!(dealt.stock_size, 44);
///
/// let reveal = engine.reveal(dealt.match_id, DrawSource::Stock).unwrap();
/// let view = engine.commit(dealt.match_id, reveal.token, Decision::Swap(0)).unwrap();
/// assert_eq!(view.round, 2);
/// assert_eq!(view.player_hand[3], reveal.card);
/// ```
pub struct Engine<S: Store> {
    pub(crate) store: S,
    pub(crate) rng: GameRng,
    pub(crate) config: EngineConfig,
    pub(crate) catalog: &'static CardCatalog,
    opponent: Box<dyn OpponentStrategy>,
    reporter: Reporter,
}

impl<S: Store> Engine<S> {
    /// Create an engine with the greedy opponent and a logging result sink.
    pub fn new(store: S, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let rng = GameRng::from_seed_or_entropy(config.seed);
        let reporter = Reporter::new(config.result_channel.clone(), TracingSink);
        Ok(Self {
            store,
            rng,
            config,
            catalog: catalog(),
            opponent: Box::new(GreedyOpponent),
            reporter,
        })
    }

    /// Replace the opponent strategy.
    #[must_use]
    pub fn with_opponent(mut self, opponent: impl OpponentStrategy + 'static) -> Self {
        self.opponent = Box::new(opponent);
        self
    }

    /// Replace the result sink. The channel name stays as configured.
    #[must_use]
    pub fn with_sink(mut self, sink: impl ResultSink + 'static) -> Self {
        self.reporter = Reporter::new(self.config.result_channel.clone(), sink);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access. Writes made here bypass every match invariant.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Capture the shuffle RNG, e.g. to replay a sequence of deals.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Continue the shuffle stream from a captured state.
    #[must_use]
    pub fn with_rng_state(mut self, state: &GameRngState) -> Self {
        self.rng = GameRng::from_state(state);
        self
    }

    /// Deck-level operations on the same store and RNG.
    pub fn decks(&mut self) -> DeckService<'_, S> {
        DeckService::new(&mut self.store, &mut self.rng, self.catalog)
    }

    /// Start a match: shuffle a full deck into the stock, deal both hands
    /// from its front, and leave the discard pile empty.
    pub fn deal(&mut self) -> Result<TurnView> {
        let hand_size = self.config.hand_size;

        let mut stock = Deck::new(
            self.store.next_id::<Deck>(),
            DeckRole::Stock,
            self.catalog.ids().to_vec(),
        );
        stock.shuffle(&mut self.rng);
        let discard = Deck::new(self.store.next_id::<Deck>(), DeckRole::Discard, Vec::new());
        let player = Deck::new(
            self.store.next_id::<Deck>(),
            DeckRole::PlayerHand,
            stock.draw_front(hand_size).to_vec(),
        );
        let opponent = Deck::new(
            self.store.next_id::<Deck>(),
            DeckRole::OpponentHand,
            stock.draw_front(hand_size).to_vec(),
        );

        let table = Table::new(self.store.next_id::<Match>(), stock, discard, player, opponent);
        self.persist(&table)?;

        info!(
            match_id = table.record.id.raw(),
            seed = self.rng.seed(),
            hand_size,
            "Dealt new match"
        );
        TurnView::build(&table, self.catalog, None, "New game dealt".to_string())
    }

    /// Look at the card the player would draw from `source`.
    ///
    /// Nothing leaves the pile. The returned token supersedes any earlier
    /// reveal on this match.
    pub fn reveal(&mut self, match_id: MatchId, source: DrawSource) -> Result<Reveal> {
        let mut table = self.load_table(match_id)?;
        if table.record.is_over {
            return Err(EngineError::invalid_state(format!("{match_id} is over")));
        }

        let top = match source {
            DrawSource::Stock => table.stock.peek_front().ok_or(EngineError::DeckExhausted)?,
            DrawSource::Discard => table.discard.peek_back().ok_or(EngineError::EmptyPile)?,
        };
        let card = self.catalog.resolve(top)?;
        let pending = table.record.issue_reveal(card.id, source);
        self.store.save(&table.record)?;

        debug!(
            match_id = match_id.raw(),
            token = %pending.token,
            card = %card,
            source = %source,
            "Revealed card"
        );
        Ok(Reveal {
            token: pending.token,
            card,
            source,
        })
    }

    /// [`reveal`](Self::reveal) with the source given by name
    /// (`stock`/`mainDeck` or `discard`/`openTable`).
    pub fn reveal_named(&mut self, match_id: MatchId, source: &str) -> Result<Reveal> {
        // unknown names fail before the match is touched
        let source = source.parse()?;
        self.reveal(match_id, source)
    }

    /// Resolve the latest reveal with `decision`, play the opponent's turn,
    /// and either advance the round or end the match.
    pub fn commit(
        &mut self,
        match_id: MatchId,
        token: RevealToken,
        decision: Decision,
    ) -> Result<TurnView> {
        let mut table = self.load_table(match_id)?;
        if table.record.is_over {
            return Err(EngineError::invalid_state(format!("{match_id} is over")));
        }
        let pending = table.record.pending.ok_or_else(|| {
            EngineError::invalid_state(format!("no card has been revealed in {match_id}"))
        })?;
        if pending.token != token {
            return Err(EngineError::invalid_argument(format!(
                "reveal token {token} is not the latest for {match_id}"
            )));
        }

        let top = match pending.source {
            DrawSource::Stock => table.stock.peek_front(),
            DrawSource::Discard => table.discard.peek_back(),
        };
        if top != Some(pending.card) {
            return Err(EngineError::data_integrity(format!(
                "{} is no longer on top of the {} in {match_id}",
                pending.card, pending.source
            )));
        }
        match pending.source {
            DrawSource::Stock => {
                table.stock.pop_front();
            }
            DrawSource::Discard => {
                table.discard.remove(pending.card);
            }
        }
        table.record.pending = None;

        let drawn = self.catalog.resolve(pending.card)?;
        let mut narrative = format!("Player drew {drawn}. ");
        narrative.push_str(&table.apply_decision(&drawn, decision, self.catalog)?);
        narrative.push_str(&table.opponent_turn(self.opponent.as_ref(), self.catalog)?);

        if table.stock.is_empty() {
            table.finish(self.catalog)?;
        } else {
            table.record.round += 1;
        }
        self.persist(&table)?;

        if table.record.is_over {
            info!(
                match_id = match_id.raw(),
                round = table.record.round,
                player_score = table.record.player_score,
                opponent_score = table.record.opponent_score,
                "Match over"
            );
        }
        TurnView::build(&table, self.catalog, Some(drawn), narrative)
    }

    /// The current state of a match, without making a move.
    pub fn view(&self, match_id: MatchId) -> Result<TurnView> {
        let table = self.load_table(match_id)?;
        TurnView::build(&table, self.catalog, None, "Current game state".to_string())
    }

    /// End a match now and fix its scores. Ending an ended match changes nothing.
    pub fn end_manually(&mut self, match_id: MatchId) -> Result<TurnView> {
        let mut table = self.load_table(match_id)?;
        if !table.record.is_over {
            table.finish(self.catalog)?;
            self.persist(&table)?;
            info!(
                match_id = match_id.raw(),
                round = table.record.round,
                player_score = table.record.player_score,
                opponent_score = table.record.opponent_score,
                "Match ended manually"
            );
        }
        TurnView::build(&table, self.catalog, None, "Game ended manually.".to_string())
    }

    /// Delete a match and its four decks.
    pub fn discard_match(&mut self, match_id: MatchId) -> Result<()> {
        let table = self.load_table(match_id)?;
        let mut batch = Batch::new();
        table.stage_removal(&mut batch);
        batch.commit(&mut self.store);
        info!(match_id = match_id.raw(), "Deleted match");
        Ok(())
    }

    /// Publish a result event to the configured channel.
    pub fn report(
        &self,
        player_name: &str,
        player_score: i32,
        computer_score: i32,
        rounds: u32,
    ) -> ResultEvent {
        self.reporter
            .report(player_name, player_score, computer_score, rounds)
    }

    /// Publish the current scores and round of a stored match.
    ///
    /// For an unfinished match these are the live hand scores, not the
    /// stored final scores (which are only set when the match ends).
    pub fn report_match(&self, match_id: MatchId, player_name: &str) -> Result<ResultEvent> {
        let view = self.view(match_id)?;
        Ok(self.report(player_name, view.player_score, view.opponent_score, view.round))
    }

    /// Check a stored match against the card partition: every card in
    /// exactly one of its decks.
    pub fn verify(&self, match_id: MatchId) -> Result<()> {
        self.load_table(match_id)?.check_partition(self.catalog)
    }

    /// Load a match with its decks. A missing deck is a `DataIntegrity` fault.
    pub(crate) fn load_table(&self, match_id: MatchId) -> Result<Table> {
        let record: Match = self.store.load(match_id)?;
        let load_deck = |id: DeckId| {
            self.store.load::<Deck>(id).map_err(|err| match err {
                EngineError::NotFound { .. } => {
                    EngineError::data_integrity(format!("{match_id} references missing {id}"))
                }
                other => other,
            })
        };
        let table = Table {
            stock: load_deck(record.stock)?,
            discard: load_deck(record.discard)?,
            player: load_deck(record.player_hand)?,
            opponent: load_deck(record.opponent_hand)?,
            record,
        };
        table.check_links()?;
        Ok(table)
    }

    /// Verify and write a table in one batch.
    pub(crate) fn persist(&mut self, table: &Table) -> Result<()> {
        table.check_links()?;
        table.check_partition(self.catalog)?;
        let mut batch = Batch::new();
        table.stage(&mut batch)?;
        batch.commit(&mut self.store);
        Ok(())
    }

    /// Copy a table under freshly allocated match and deck ids.
    pub(crate) fn clone_table(&mut self, table: &Table) -> Table {
        let decks = [
            self.store.next_id::<Deck>(),
            self.store.next_id::<Deck>(),
            self.store.next_id::<Deck>(),
            self.store.next_id::<Deck>(),
        ];
        table.clone_as(self.store.next_id::<Match>(), decks)
    }
}

impl<S: Store + std::fmt::Debug> std::fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("reporter", &self.reporter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::store::MemoryStore;

    fn engine(seed: u64) -> Engine<MemoryStore> {
        Engine::new(MemoryStore::new(), EngineConfig::default().with_seed(seed)).unwrap()
    }

    #[test]
    fn test_deal_layout() {
        let mut engine = engine(1);
        let view = engine.deal().unwrap();

        assert_eq!(view.player_hand.len(), 4);
        assert_eq!(view.opponent_hand_size, 4);
        assert_eq!(view.stock_size, 44);
        assert_eq!(view.discard_size, 0);
        assert_eq!(view.discard_top, None);
        assert_eq!(view.round, 1);
        assert!(!view.is_over);
        engine.verify(view.match_id).unwrap();
    }

    #[test]
    fn test_deal_is_seeded() {
        let hand = |seed| engine(seed).deal().unwrap().player_hand;
        assert_eq!(hand(5), hand(5));
    }

    #[test]
    fn test_rng_state_replays_deals() {
        let mut first = engine(9);
        first.deal().unwrap();
        let state = first.rng_state();
        let next = first.deal().unwrap().player_hand;

        let mut replay = engine(1).with_rng_state(&state);
        assert_eq!(replay.deal().unwrap().player_hand, next);
    }

    #[test]
    fn test_unknown_match_is_not_found() {
        let mut engine = engine(1);
        let missing = MatchId::new(9);

        assert!(matches!(engine.view(missing), Err(EngineError::NotFound { .. })));
        assert!(matches!(
            engine.reveal(missing, DrawSource::Stock),
            Err(EngineError::NotFound { .. })
        ));
        assert!(matches!(engine.end_manually(missing), Err(EngineError::NotFound { .. })));
        assert!(matches!(engine.discard_match(missing), Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_reveal_does_not_draw() {
        let mut engine = engine(2);
        let id = engine.deal().unwrap().match_id;

        let first = engine.reveal(id, DrawSource::Stock).unwrap();
        let second = engine.reveal(id, DrawSource::Stock).unwrap();

        assert_eq!(first.card, second.card);
        assert_ne!(first.token, second.token);
        assert_eq!(engine.view(id).unwrap().stock_size, 44);
    }

    #[test]
    fn test_reveal_empty_discard() {
        let mut engine = engine(2);
        let id = engine.deal().unwrap().match_id;

        assert_eq!(
            engine.reveal(id, DrawSource::Discard).unwrap_err(),
            EngineError::EmptyPile
        );
    }

    #[test]
    fn test_reveal_empty_stock() {
        let mut engine = engine(2);
        let id = engine.deal().unwrap().match_id;
        let stock = engine.store().load::<Match>(id).unwrap().stock;
        engine.decks().draw_front(stock, 52).unwrap();

        assert_eq!(
            engine.reveal(id, DrawSource::Stock).unwrap_err(),
            EngineError::DeckExhausted
        );
        assert_eq!(engine.view(id).unwrap().phase, crate::game::Phase::AwaitingDraw);
    }

    #[test]
    fn test_reveal_named_rejects_unknown_source() {
        let mut engine = engine(2);
        let id = engine.deal().unwrap().match_id;

        let err = engine.reveal_named(id, "sideboard").unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
        assert!(engine.reveal_named(id, "mainDeck").is_ok());
    }

    #[test]
    fn test_commit_without_reveal() {
        let mut engine = engine(3);
        let id = engine.deal().unwrap().match_id;
        let token = RevealToken { match_id: id, serial: 1 };

        let err = engine.commit(id, token, Decision::Discard).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn test_stale_token_is_rejected() {
        let mut engine = engine(3);
        let id = engine.deal().unwrap().match_id;
        let stale = engine.reveal(id, DrawSource::Stock).unwrap();
        let fresh = engine.reveal(id, DrawSource::Stock).unwrap();

        let err = engine.commit(id, stale.token, Decision::Discard).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));

        let view = engine.commit(id, fresh.token, Decision::Discard).unwrap();
        assert_eq!(view.round, 2);
    }

    #[test]
    fn test_token_is_single_use() {
        let mut engine = engine(3);
        let id = engine.deal().unwrap().match_id;
        let reveal = engine.reveal(id, DrawSource::Stock).unwrap();
        engine.commit(id, reveal.token, Decision::Discard).unwrap();

        let err = engine.commit(id, reveal.token, Decision::Discard).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn test_commit_after_tampering_is_integrity_fault() {
        let mut engine = engine(4);
        let id = engine.deal().unwrap().match_id;
        let reveal = engine.reveal(id, DrawSource::Stock).unwrap();

        let stock = engine.store().load::<Match>(id).unwrap().stock;
        engine.decks().draw_front(stock, 1).unwrap();

        let err = engine.commit(id, reveal.token, Decision::Discard).unwrap_err();
        assert!(matches!(err, EngineError::DataIntegrity(_)));
    }

    #[test]
    fn test_failed_commit_writes_nothing() {
        let mut engine = engine(4);
        let id = engine.deal().unwrap().match_id;
        let reveal = engine.reveal(id, DrawSource::Stock).unwrap();

        // a stray copy of a held card breaks the partition
        let record = engine.store().load::<Match>(id).unwrap();
        let held = engine.store().load::<Deck>(record.player_hand).unwrap().peek_front().unwrap();
        let mut opponent: Deck = engine.store().load(record.opponent_hand).unwrap();
        opponent.add_back(held).unwrap();
        engine.store_mut().save(&opponent).unwrap();
        let before = engine.store().load::<Deck>(record.stock).unwrap();

        let err = engine.commit(id, reveal.token, Decision::Discard).unwrap_err();

        assert!(matches!(err, EngineError::DataIntegrity(_)));
        assert_eq!(engine.store().load::<Deck>(record.stock).unwrap(), before);
        assert_eq!(engine.store().load::<Match>(id).unwrap().round, 1);
    }

    #[test]
    fn test_missing_deck_is_integrity_fault() {
        let mut engine = engine(4);
        let id = engine.deal().unwrap().match_id;
        let discard = engine.store().load::<Match>(id).unwrap().discard;
        engine.store_mut().delete::<Deck>(discard).unwrap();

        assert!(matches!(engine.view(id), Err(EngineError::DataIntegrity(_))));
    }

    #[test]
    fn test_end_manually_is_idempotent() {
        let mut engine = engine(6);
        let id = engine.deal().unwrap().match_id;

        let first = engine.end_manually(id).unwrap();
        let second = engine.end_manually(id).unwrap();

        assert!(first.is_over);
        assert_eq!(first.player_score, second.player_score);
        assert!(first.narrative.contains("--- GAME OVER ---"));
        assert!(first.outcome().is_some());
        assert!(matches!(
            engine.reveal(id, DrawSource::Stock),
            Err(EngineError::InvalidState(_))
        ));
    }

    #[test]
    fn test_end_manually_clears_pending_reveal() {
        let mut engine = engine(6);
        let id = engine.deal().unwrap().match_id;
        let reveal = engine.reveal(id, DrawSource::Stock).unwrap();
        engine.end_manually(id).unwrap();

        let err = engine.commit(id, reveal.token, Decision::Discard).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn test_discard_match_removes_everything() {
        let mut engine = engine(7);
        let id = engine.deal().unwrap().match_id;
        engine.discard_match(id).unwrap();

        assert!(engine.store().is_empty());
        assert!(matches!(engine.view(id), Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_decks_service_shares_store() {
        let mut engine = engine(8);
        let id = engine.deal().unwrap().match_id;
        let hand = engine.store().load::<Match>(id).unwrap().player_hand;

        let view = engine.decks().get(hand).unwrap();
        assert_eq!(view.cards, engine.view(id).unwrap().player_hand);
        assert!(view.deck.iter().all(|card| card != CardId::new(0)));
    }
}
