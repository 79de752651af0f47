//! The live bracket: metadata plus its grid

use serde::{Deserialize, Serialize};

use crate::address::Slot;
use crate::error::BracketError;
use crate::grid::Grid;
use crate::seat::Seat;

/// Elimination format, persisted as an integer code
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum ElimType {
    #[default]
    Single = 0,
    /// Recognised on load, never built
    Double = 1,
}

impl ElimType {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl From<ElimType> for i32 {
    fn from(elim_type: ElimType) -> i32 {
        elim_type.code()
    }
}

impl TryFrom<i32> for ElimType {
    type Error = BracketError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ElimType::Single),
            1 => Ok(ElimType::Double),
            other => Err(BracketError::InvalidEliminationType(other)),
        }
    }
}

/// A first-round-or-later match that still needs a result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub upper: Slot,
    pub lower: Slot,
}

impl Match {
    /// Round number, 0 for the first round
    pub fn round(&self) -> u8 {
        self.upper.col
    }

    /// Where the winner will be seated
    pub fn destination(&self) -> Slot {
        self.upper.parent()
    }
}

/// A single-elimination bracket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bracket {
    name: String,
    date_created: String,
    elim_type: ElimType,
    num_players: usize,
    grid: Grid,
}

impl Bracket {
    pub(crate) fn from_parts(name: String, date_created: String, num_players: usize, grid: Grid) -> Self {
        Self {
            name,
            date_created,
            elim_type: ElimType::Single,
            num_players,
            grid,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calendar date of creation, `MM/DD/YYYY`
    pub fn date_created(&self) -> &str {
        &self.date_created
    }

    pub fn elim_type(&self) -> ElimType {
        self.elim_type
    }

    /// Real players, byes excluded
    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Winner of the grand final, once decided
    pub fn champion(&self) -> Option<&Seat> {
        self.grid.champion()
    }

    /// The match `slot` takes part in, if both seats are known and it is undecided
    pub fn match_at(&self, slot: Slot) -> Option<Match> {
        if !self.grid.contains(slot) || slot == self.grid.final_slot() {
            return None;
        }
        let (upper, lower) = if slot.is_upper() {
            (slot, slot.sibling())
        } else {
            (slot.sibling(), slot)
        };
        let top = self.grid.get(upper)?;
        let bottom = self.grid.get(lower)?;
        let decided = self.grid.get(upper.parent()).is_some();
        let playable = top.is_player() || bottom.is_player();
        (!decided && playable).then_some(Match { upper, lower })
    }

    /// Every undecided match with both seats filled, earliest round first
    pub fn pending_matches(&self) -> Vec<Match> {
        let shape = self.grid.shape();
        shape
            .slots()
            .filter(|slot| slot.is_upper())
            .filter_map(|slot| self.match_at(slot))
            .collect()
    }
}
