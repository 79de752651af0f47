//! Bracket persistence
//!
//! A store keeps two tables: one record per bracket and one record per
//! occupied seat. The core never sees them; sessions hand over a
//! [`BracketSummary`] plus [`BracketState`] on save and get the same flat
//! sequences back on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use brackets_core::{BracketState, BracketSummary};

use crate::error::{StoreError, StoreResult};

/// Store-assigned bracket key
pub type BracketId = u32;

/// One row per saved bracket
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRecord {
    pub bracket_id: BracketId,
    pub name: String,
    pub elim_type: i32,
    pub num_players: usize,
    pub date_created: String,
}

/// One row per occupied seat
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub seat_id: String,
    pub seat_name: String,
    pub bracket_id: BracketId,
    pub tier: i32,
}

/// Persistence contract used by sessions
pub trait BracketStore {
    /// Save under the summary's name. An existing bracket of that name keeps
    /// its id; its record is refreshed and its seats replaced.
    fn save(&mut self, summary: &BracketSummary, state: &BracketState) -> StoreResult<BracketId>;

    /// Bracket record and seats in the order they were written
    fn load(&self, bracket_id: BracketId) -> StoreResult<(BracketRecord, BracketState)>;

    /// All bracket records, oldest first
    fn list(&self) -> StoreResult<Vec<BracketRecord>>;

    /// Remove a bracket and its seats; false if it was not there
    fn delete(&mut self, bracket_id: BracketId) -> StoreResult<bool>;

    /// Record of the bracket called `name`, if saved
    fn find(&self, name: &str) -> StoreResult<Option<BracketRecord>> {
        Ok(self.list()?.into_iter().find(|record| record.name == name))
    }
}

/// The two tables plus the id counter
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
struct Tables {
    last_id: BracketId,
    brackets: Vec<BracketRecord>,
    seats: Vec<SeatRecord>,
}

impl Tables {
    fn save(&mut self, summary: &BracketSummary, state: &BracketState) -> BracketId {
        let bracket_id = match self.brackets.iter_mut().find(|r| r.name == summary.name) {
            Some(existing) => {
                existing.elim_type = summary.elim_type.code();
                existing.num_players = summary.num_players;
                existing.date_created = summary.date_created.clone();
                let id = existing.bracket_id;
                self.seats.retain(|seat| seat.bracket_id != id);
                id
            }
            None => {
                self.last_id += 1;
                self.brackets.push(BracketRecord {
                    bracket_id: self.last_id,
                    name: summary.name.clone(),
                    elim_type: summary.elim_type.code(),
                    num_players: summary.num_players,
                    date_created: summary.date_created.clone(),
                });
                self.last_id
            }
        };

        self.seats.extend(state.triples().map(|(name, id, tier)| SeatRecord {
            seat_id: id.to_string(),
            seat_name: name.to_string(),
            bracket_id,
            tier,
        }));
        bracket_id
    }

    fn load(&self, bracket_id: BracketId) -> StoreResult<(BracketRecord, BracketState)> {
        let record = self
            .brackets
            .iter()
            .find(|r| r.bracket_id == bracket_id)
            .cloned()
            .ok_or(StoreError::NotFound(bracket_id))?;

        let mut state = BracketState {
            date_created: record.date_created.clone(),
            ..Default::default()
        };
        for seat in self.seats.iter().filter(|s| s.bracket_id == bracket_id) {
            state.names.push(seat.seat_name.clone());
            state.ids.push(seat.seat_id.clone());
            state.tiers.push(seat.tier);
        }
        Ok((record, state))
    }

    fn delete(&mut self, bracket_id: BracketId) -> bool {
        let before = self.brackets.len();
        self.brackets.retain(|r| r.bracket_id != bracket_id);
        self.seats.retain(|s| s.bracket_id != bracket_id);
        self.brackets.len() != before
    }
}

/// In-memory store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Tables,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BracketStore for MemoryStore {
    fn save(&mut self, summary: &BracketSummary, state: &BracketState) -> StoreResult<BracketId> {
        Ok(self.tables.save(summary, state))
    }

    fn load(&self, bracket_id: BracketId) -> StoreResult<(BracketRecord, BracketState)> {
        self.tables.load(bracket_id)
    }

    fn list(&self) -> StoreResult<Vec<BracketRecord>> {
        Ok(self.tables.brackets.clone())
    }

    fn delete(&mut self, bracket_id: BracketId) -> StoreResult<bool> {
        Ok(self.tables.delete(bracket_id))
    }
}

/// Store backed by one pretty-printed JSON document, rewritten on every change
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    tables: Tables,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tables = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            tracing::debug!("Store {} not found, starting empty", path.display());
            Tables::default()
        };
        Ok(Self { path, tables })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `tables` to disk, then adopt them; on failure nothing changes
    fn commit(&mut self, tables: Tables) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&tables)?;
        fs::write(&self.path, json)?;
        self.tables = tables;
        Ok(())
    }
}

impl BracketStore for JsonFileStore {
    fn save(&mut self, summary: &BracketSummary, state: &BracketState) -> StoreResult<BracketId> {
        let mut tables = self.tables.clone();
        let id = tables.save(summary, state);
        self.commit(tables)?;
        Ok(id)
    }

    fn load(&self, bracket_id: BracketId) -> StoreResult<(BracketRecord, BracketState)> {
        self.tables.load(bracket_id)
    }

    fn list(&self) -> StoreResult<Vec<BracketRecord>> {
        Ok(self.tables.brackets.clone())
    }

    fn delete(&mut self, bracket_id: BracketId) -> StoreResult<bool> {
        let mut tables = self.tables.clone();
        let removed = tables.delete(bracket_id);
        if removed {
            self.commit(tables)?;
        }
        Ok(removed)
    }
}
