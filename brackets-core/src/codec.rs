//! Flat state codec: the live grid as parallel name/id/tier sequences
//!
//! Empty slots are omitted, which is why decoding infers the bracket shape
//! from the ids alone.

use serde::{Deserialize, Serialize};

use crate::address::SeatId;
use crate::bracket::{Bracket, ElimType};
use crate::error::Result;
use crate::grid::Grid;

/// Occupied seats in column-major order plus the creation date
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketState {
    pub date_created: String,
    pub names: Vec<String>,
    pub ids: Vec<String>,
    pub tiers: Vec<i32>,
}

impl BracketState {
    /// Number of occupied seats
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// `(name, id, tier)` triples in stored order
    pub fn triples(&self) -> impl Iterator<Item = (&str, &str, i32)> + '_ {
        self.names
            .iter()
            .zip(&self.ids)
            .zip(&self.tiers)
            .map(|((name, id), &tier)| (name.as_str(), id.as_str(), tier))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Per-bracket record kept next to the seat sequences
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSummary {
    pub name: String,
    pub elim_type: ElimType,
    pub num_players: usize,
    pub date_created: String,
}

/// Walk the grid column by column and emit every occupied seat
pub fn serialize(bracket: &Bracket) -> BracketState {
    let mut state = BracketState {
        date_created: bracket.date_created().to_string(),
        ..Default::default()
    };
    for (slot, seat) in bracket.grid().seats() {
        debug_assert_eq!(seat.slot(), Some(slot));
        state.names.push(seat.name().to_string());
        state.ids.push(SeatId::new(seat.kind(), slot).to_string());
        state.tiers.push(seat.tier().into());
    }
    state
}

/// Rebuild a bracket called `name` from its flat state
pub fn deserialize(name: &str, state: &BracketState) -> Result<Bracket> {
    Bracket::reconstruct(
        name,
        &state.date_created,
        &state.names,
        &state.ids,
        &state.tiers,
    )
}

impl Bracket {
    /// Rebuild from parallel sequences; seeds come back as sentinels
    pub fn reconstruct(
        name: &str,
        date_created: &str,
        names: &[String],
        ids: &[String],
        tiers: &[i32],
    ) -> Result<Bracket> {
        let grid = Grid::reconstruct(names, ids, tiers)?;
        let num_players = grid.player_count();
        tracing::debug!(
            "Reconstructed bracket {:?}: {} seats, {} players",
            name,
            ids.len(),
            num_players
        );
        Ok(Bracket::from_parts(
            name.to_string(),
            date_created.to_string(),
            num_players,
            grid,
        ))
    }

    /// Flat state for persistence or a transient snapshot
    pub fn state(&self) -> BracketState {
        serialize(self)
    }

    pub fn summary(&self) -> BracketSummary {
        BracketSummary {
            name: self.name().to_string(),
            elim_type: self.elim_type(),
            num_players: self.num_players(),
            date_created: self.date_created().to_string(),
        }
    }
}
