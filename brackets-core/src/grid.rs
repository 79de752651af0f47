//! Grid projection: the flat tree re-expressed as one column per round
//!
//! Column 0 holds the leaves, each later column is half as long, and the
//! last column holds the single grand-final winner slot.

use std::collections::HashSet;

use crate::address::{SeatId, Shape, Slot};
use crate::error::{BracketError, Result};
use crate::seat::{Seat, Tier};

/// Column-indexed view of a bracket tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    shape: Shape,
    columns: Vec<Vec<Option<Seat>>>,
}

impl Grid {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// An empty grid of the given shape
    pub fn empty(shape: Shape) -> Self {
        let columns = (0..shape.height() as u8)
            .map(|col| vec![None; shape.column_len(col)])
            .collect();
        Self { shape, columns }
    }

    /// Reshape a flat tree (`2 * leaves - 1` slots) into columns and give
    /// every occupant its canonical id and the winners' tier
    pub fn project(tree: Vec<Option<Seat>>) -> Result<Self> {
        let shape = Shape::new((tree.len() + 1) / 2)?;
        if tree.len() != shape.nodes() {
            return Err(BracketError::StateCorruption(format!(
                "a tree of {} slots is not a full binary tree",
                tree.len()
            )));
        }

        let mut grid = Grid::empty(shape);
        for (index, seat) in tree.into_iter().enumerate() {
            if let Some(mut seat) = seat {
                let slot = shape.slot_at(index);
                seat.place(slot);
                seat.set_tier(Tier::Winners);
                grid.columns[slot.col as usize][slot.row as usize] = Some(seat);
            }
        }
        Ok(grid)
    }

    /// Rebuild a grid from parallel name/id/tier sequences
    ///
    /// Empty slots are absent from the sequences, so the shape is inferred
    /// from the ids: every id in column 0 is a leaf.
    pub fn reconstruct(names: &[String], ids: &[String], tiers: &[i32]) -> Result<Self> {
        if names.len() != ids.len() || ids.len() != tiers.len() {
            return Err(BracketError::StateCorruption(format!(
                "{} names, {} ids and {} tiers do not line up",
                names.len(),
                ids.len(),
                tiers.len()
            )));
        }

        let parsed = ids
            .iter()
            .map(|id| id.parse::<SeatId>().map_err(|_| corrupt_id(id)))
            .collect::<Result<Vec<_>>>()?;

        let leaves = parsed.iter().filter(|id| id.slot.col == 0).count();
        let shape = Shape::new(leaves)?;
        let mut grid = Grid::empty(shape);
        let mut seen = HashSet::with_capacity(parsed.len());

        for ((name, id), &tier) in names.iter().zip(parsed).zip(tiers) {
            if !shape.contains(id.slot) {
                return Err(BracketError::StateCorruption(format!(
                    "seat {id} lies outside a {leaves}-leaf bracket"
                )));
            }
            if !seen.insert(id.slot) {
                return Err(BracketError::StateCorruption(format!(
                    "slot {} is occupied twice",
                    id.slot
                )));
            }
            let seat = Seat::restore(name.as_str(), id, Tier::try_from(tier)?);
            grid.columns[id.slot.col as usize][id.slot.row as usize] = Some(seat);
        }
        Ok(grid)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn height(&self) -> usize {
        self.columns.len()
    }

    pub fn leaves(&self) -> usize {
        self.shape.leaves()
    }

    pub fn final_slot(&self) -> Slot {
        Slot::new(self.shape.final_column(), 0)
    }

    pub fn column(&self, col: u8) -> Option<&[Option<Seat>]> {
        self.columns.get(col as usize).map(Vec::as_slice)
    }

    /// Occupant of `slot`; None when empty or outside the grid
    pub fn get(&self, slot: Slot) -> Option<&Seat> {
        self.columns
            .get(slot.col as usize)
            .and_then(|column| column.get(slot.row as usize))
            .and_then(Option::as_ref)
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.shape.contains(slot)
    }

    /// Occupants in column-major order, top row first
    pub fn seats(&self) -> impl Iterator<Item = (Slot, &Seat)> + '_ {
        self.columns.iter().enumerate().flat_map(|(col, column)| {
            column.iter().enumerate().filter_map(move |(row, seat)| {
                seat.as_ref()
                    .map(|seat| (Slot::new(col as u8, row as u8), seat))
            })
        })
    }

    /// Winner of the grand final, once decided
    pub fn champion(&self) -> Option<&Seat> {
        self.get(self.final_slot())
    }

    pub fn bye_count(&self) -> usize {
        self.columns[0].iter().flatten().filter(|seat| seat.is_bye()).count()
    }

    /// Real players: leaves minus byes
    pub fn player_count(&self) -> usize {
        self.leaves() - self.bye_count()
    }

    /// The flat tree dual of this grid (grand-final slot at index 0)
    pub fn flatten(&self) -> Vec<Option<Seat>> {
        let mut tree = vec![None; self.shape.nodes()];
        for (slot, seat) in self.seats() {
            tree[self.shape.flat_index(slot)] = Some(seat.clone());
        }
        tree
    }

    // ========================================================================
    // MUTATION (match advancer only)
    // ========================================================================

    pub(crate) fn take(&mut self, slot: Slot) -> Option<Seat> {
        self.columns[slot.col as usize][slot.row as usize].take()
    }

    pub(crate) fn put(&mut self, slot: Slot, mut seat: Seat) {
        seat.place(slot);
        self.columns[slot.col as usize][slot.row as usize] = Some(seat);
    }
}

fn corrupt_id(id: &str) -> BracketError {
    BracketError::StateCorruption(format!("unparsable seat id {id:?}"))
}
