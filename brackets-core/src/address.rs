//! Bracket addressing: grid slots, tree shape and seat ids
//!
//! Every `(col, row) <-> flat index` conversion in the workspace goes through
//! this module. Column 0 holds the leaves; column `height - 1` holds the
//! grand-final winner. The flat tree stores the winner at index 0 and the
//! leaves at `[leaves - 1, nodes)`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BracketError;
use crate::seat::SeatKind;

/// Most leaves a bracket can hold (a row must fit in two id digits)
pub const MAX_LEAVES: usize = 64;

/// A position in the column/row grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub col: u8,
    pub row: u8,
}

impl Slot {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// The other seat of the same match
    pub fn sibling(&self) -> Slot {
        Slot::new(self.col, self.row ^ 1)
    }

    /// Where the winner of this match is seated
    pub fn parent(&self) -> Slot {
        Slot::new(self.col + 1, self.row / 2)
    }

    /// The two seats whose match feeds this slot (None in the leaf column)
    pub fn children(&self) -> Option<(Slot, Slot)> {
        if self.col == 0 {
            return None;
        }
        let upper = Slot::new(self.col - 1, self.row * 2);
        Some((upper, upper.sibling()))
    }

    /// Upper seat of its match (even row)
    pub fn is_upper(&self) -> bool {
        self.row % 2 == 0
    }

    /// Inverse of the on-screen node number `col * 100 + row`
    pub fn from_node_number(node: u16) -> Option<Slot> {
        let col = node / 100;
        (col < 10).then(|| Slot::new(col as u8, (node % 100) as u8))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.col, self.row)
    }
}

/// Parses the prefix-less `crr` form, e.g. `"104"`
impl FromStr for Slot {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.as_bytes();
        if digits.len() != 3 || !digits.iter().all(u8::is_ascii_digit) {
            return Err(BracketError::InvalidSeatId(s.to_string()));
        }
        let col = digits[0] - b'0';
        let row = (digits[1] - b'0') * 10 + (digits[2] - b'0');
        Ok(Slot::new(col, row))
    }
}

/// A type-prefixed seat id such as `p205` (Player, column 2, row 5)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeatId {
    pub kind: SeatKind,
    pub slot: Slot,
}

impl SeatId {
    pub const fn new(kind: SeatKind, slot: Slot) -> Self {
        Self { kind, slot }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.slot)
    }
}

impl FromStr for SeatId {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let kind = chars
            .next()
            .and_then(SeatKind::from_prefix)
            .ok_or_else(|| BracketError::InvalidSeatId(s.to_string()))?;
        let slot = chars
            .as_str()
            .parse::<Slot>()
            .map_err(|_| BracketError::InvalidSeatId(s.to_string()))?;
        Ok(SeatId::new(kind, slot))
    }
}

/// Sizes of a full binary bracket tree with a power-of-two leaf count
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    leaves: usize,
}

impl Shape {
    /// Shape for `leaves` round-0 seats; must be a power of two in `2..=MAX_LEAVES`
    pub fn new(leaves: usize) -> Result<Self, BracketError> {
        if leaves < 2 || leaves > MAX_LEAVES || !leaves.is_power_of_two() {
            return Err(BracketError::StateCorruption(format!(
                "{leaves} leaves is not a power of two between 2 and {MAX_LEAVES}"
            )));
        }
        Ok(Self { leaves })
    }

    pub fn leaves(&self) -> usize {
        self.leaves
    }

    /// Total slots in the tree
    pub fn nodes(&self) -> usize {
        2 * self.leaves - 1
    }

    /// Slots above the leaves (undecided future rounds)
    pub fn empties(&self) -> usize {
        self.leaves - 1
    }

    /// Number of columns, `floor(log2(nodes)) + 1`
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut width = self.leaves;
        while width > 1 {
            width /= 2;
            height += 1;
        }
        height
    }

    pub fn final_column(&self) -> u8 {
        (self.height() - 1) as u8
    }

    pub fn column_len(&self, col: u8) -> usize {
        self.leaves >> col
    }

    pub fn contains(&self, slot: Slot) -> bool {
        (slot.col as usize) < self.height() && (slot.row as usize) < self.column_len(slot.col)
    }

    /// Index of `slot` in the flat tree
    pub fn flat_index(&self, slot: Slot) -> usize {
        debug_assert!(self.contains(slot), "slot {slot} outside {self:?}");
        self.column_len(slot.col) - 1 + slot.row as usize
    }

    /// Grid slot of flat tree index `index`
    pub fn slot_at(&self, index: usize) -> Slot {
        debug_assert!(index < self.nodes());
        let mut col = 0u8;
        while index + 1 < self.column_len(col) {
            col += 1;
        }
        Slot::new(col, (index + 1 - self.column_len(col)) as u8)
    }

    /// Every slot, column by column, top row first
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        (0..self.height() as u8)
            .flat_map(move |col| (0..self.column_len(col) as u8).map(move |row| Slot::new(col, row)))
    }
}
