//! Named snapshots of in-progress matches.
//!
//! A [`SaveRecord`] embeds a full copy of the match it was taken from, under
//! freshly allocated match and deck ids. The copy lives only inside the save
//! record, so nothing can play it: it is immutable until the save is deleted.
//! Restoring copies it again into a new live match, so a save can be restored
//! any number of times and the restored matches never share decks.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;

use crate::core::{EngineError, EntityKind, MatchId, Result, SaveId};
use crate::game::{Engine, Table, TurnView};
use crate::store::{Record, Store, StoreExt};

/// A saved match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub id: SaveId,
    pub owner: String,
    pub label: String,
    pub saved_at: OffsetDateTime,
    /// Owned copy of the match at save time.
    pub game: Table,
}

impl Record for SaveRecord {
    const KIND: EntityKind = EntityKind::Save;
    type Id = SaveId;

    fn id(&self) -> SaveId {
        self.id
    }
}

impl SaveRecord {
    /// Round the saved match had reached.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.game.record.round
    }
}

impl<S: Store> Engine<S> {
    /// Save a copy of an in-progress match for `owner`.
    ///
    /// A blank `label` is replaced by the configured default. Any pending
    /// reveal is not saved.
    pub fn snapshot(&mut self, match_id: MatchId, owner: &str, label: &str) -> Result<SaveRecord> {
        let table = self.load_table(match_id)?;
        if table.record.is_over {
            return Err(EngineError::invalid_state(format!(
                "{match_id} is over and cannot be saved"
            )));
        }

        let label = match label.trim() {
            "" => self.config.default_save_label.clone(),
            _ => label.to_string(),
        };
        let save = SaveRecord {
            id: self.store.next_id::<SaveRecord>(),
            owner: owner.to_string(),
            label,
            saved_at: OffsetDateTime::now_utc(),
            game: self.clone_table(&table),
        };
        save.game.check_partition(self.catalog)?;
        self.store.save(&save)?;

        info!(
            save_id = save.id.raw(),
            match_id = match_id.raw(),
            owner,
            label = %save.label,
            round = save.round(),
            "Saved match"
        );
        Ok(save)
    }

    /// Start a new live match from a save. The save is left untouched.
    pub fn restore(&mut self, save_id: SaveId) -> Result<TurnView> {
        let save: SaveRecord = self.store.load(save_id)?;
        let table = self.clone_table(&save.game);
        self.persist(&table)?;

        info!(
            save_id = save_id.raw(),
            match_id = table.record.id.raw(),
            round = table.record.round,
            "Restored match"
        );
        TurnView::build(&table, self.catalog, None, format!("Restored \"{}\"", save.label))
    }

    /// Saves, newest first. Saves with equal timestamps list the later id first.
    pub fn list_saves(&self, owner: Option<&str>) -> Result<Vec<SaveRecord>> {
        let mut saves: Vec<SaveRecord> = self
            .store
            .load_all::<SaveRecord>()?
            .into_iter()
            .filter(|save| owner.map_or(true, |owner| save.owner == owner))
            .collect();
        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at).then(b.id.cmp(&a.id)));
        Ok(saves)
    }

    /// Delete a save and the match copy it holds. Matches restored from it
    /// are not affected.
    pub fn delete_save(&mut self, save_id: SaveId) -> Result<()> {
        self.store.delete::<SaveRecord>(save_id)?;
        info!(save_id = save_id.raw(), "Deleted save");
        Ok(())
    }
}
