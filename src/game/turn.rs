//! Turn mechanics applied to an in-memory [`Table`].
//!
//! Both halves of a turn cycle live here: the player's decision on a drawn
//! card and the automated opponent's reply. Each returns the narrative it
//! produced. Nothing here touches the store.

use tracing::{debug, warn};

use super::state::Table;
use super::view::Decision;
use crate::cards::{Card, CardCatalog};
use crate::core::{EngineError, Result};
use crate::rules::OpponentStrategy;

impl Table {
    /// Place the player's drawn card according to `decision`.
    ///
    /// The drawn card must already be out of its source pile.
    pub(crate) fn apply_decision(
        &mut self,
        drawn: &Card,
        decision: Decision,
        catalog: &CardCatalog,
    ) -> Result<String> {
        match decision {
            Decision::Swap(index) => match self.player.remove_at(index) {
                Some(out) => {
                    let out = catalog.resolve(out)?;
                    self.discard.add_back(out.id)?;
                    self.player.add_back(drawn.id)?;
                    Ok(format!("Swapped out: {out}. "))
                }
                None => {
                    warn!(
                        match_id = self.record.id.raw(),
                        index,
                        hand_size = self.player.len(),
                        "Invalid swap index, discarding drawn card"
                    );
                    self.discard.add_back(drawn.id)?;
                    Ok("Invalid swap index! Card discarded. ".to_string())
                }
            },
            Decision::Discard => {
                self.discard.add_back(drawn.id)?;
                Ok("Card discarded to open table. ".to_string())
            }
        }
    }

    /// Play one opponent turn with `strategy`.
    pub(crate) fn opponent_turn(
        &mut self,
        strategy: &dyn OpponentStrategy,
        catalog: &CardCatalog,
    ) -> Result<String> {
        let hand = self.opponent.materialize(catalog)?;

        let mut taken = None;
        if let Some(top) = self.discard.peek_back() {
            let top = catalog.resolve(top)?;
            if strategy.take_discard(&hand, &top) {
                self.discard.remove(top.id);
                taken = Some(top);
            }
        }

        let (card, source) = match taken {
            Some(card) => (card, "open table"),
            None => match self.stock.pop_front() {
                Some(id) => (catalog.resolve(id)?, "main deck"),
                None => {
                    warn!(
                        match_id = self.record.id.raw(),
                        "Stock is empty, opponent skips its turn"
                    );
                    return Ok("Computer cannot draw - deck empty. ".to_string());
                }
            },
        };
        debug!(match_id = self.record.id.raw(), card = %card, source, "Opponent drew");

        let mut narrative = format!("Computer drew {card} from {source}. ");
        match strategy.swap_index(&hand, &card) {
            Some(index) => {
                let out = self.opponent.remove_at(index).ok_or_else(|| {
                    EngineError::invalid_state(format!(
                        "opponent chose index {index} in a hand of {}",
                        hand.len()
                    ))
                })?;
                let out = catalog.resolve(out)?;
                self.discard.add_back(out.id)?;
                self.opponent.add_back(card.id)?;
                debug!(match_id = self.record.id.raw(), out = %out, "Opponent swapped");
                narrative.push_str(&format!("Computer swapped out {out}."));
            }
            None => {
                self.discard.add_back(card.id)?;
                debug!(match_id = self.record.id.raw(), "Opponent discarded");
                narrative.push_str("Computer discarded the card.");
            }
        }
        Ok(narrative)
    }
}
