//! Match advancement: moving a player forward a round (win) or back (undo)
//!
//! Requests that do not meet a transition's preconditions leave the grid
//! untouched and come back as a `MoveOutcome` describing why. Only slots
//! outside the bracket and corrupt state are errors.

use std::fmt;

use crate::address::{SeatId, Slot};
use crate::bracket::Bracket;
use crate::error::{BracketError, Result};
use crate::grid::Grid;
use crate::seat::Seat;

/// Why a move request was a no-op
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blocked {
    /// Nobody sits in the slot
    EmptySlot,
    /// The seat is a remnant (or a bye, on undo)
    NotAPlayer,
    /// The grand-final winner cannot go further
    FinalColumn,
    /// The opponent's seat has not been filled yet
    NoOpponent,
    /// The match has already been won
    MatchDecided,
    /// Leaves have no earlier round to return to
    FirstColumn,
    /// The player has already moved on past this slot's match
    AlreadyAdvanced,
}

impl fmt::Display for Blocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Blocked::EmptySlot => "nobody sits there",
            Blocked::NotAPlayer => "that seat is not a player",
            Blocked::FinalColumn => "the champion has nowhere left to go",
            Blocked::NoOpponent => "the opponent is not decided yet",
            Blocked::MatchDecided => "the match already has a winner",
            Blocked::FirstColumn => "first-round seats have nothing to undo",
            Blocked::AlreadyAdvanced => "the player has already moved on",
        };
        f.write_str(reason)
    }
}

/// Result of a move request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Player moved from `from` to `to`, leaving a remnant behind
    Advanced { from: Slot, to: Slot },
    /// Player won the grand final
    Champion { name: String, slot: Slot },
    /// Player moved back from `from` to its origin `to`
    Reverted { from: Slot, to: Slot },
    /// Byes never advance
    CannotAdvanceBye,
    Blocked(Blocked),
}

impl MoveOutcome {
    /// Whether the grid changed
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            MoveOutcome::Advanced { .. } | MoveOutcome::Champion { .. } | MoveOutcome::Reverted { .. }
        )
    }
}

/// Resolve a seat reference: a full id (`p003`), a bare slot (`003`) or the
/// numeric node id (`3`, `104`). Only the position is used.
pub fn locate(reference: &str) -> Result<Slot> {
    let reference = reference.trim();
    if let Ok(id) = reference.parse::<SeatId>() {
        return Ok(id.slot);
    }
    if let Ok(slot) = reference.parse::<Slot>() {
        return Ok(slot);
    }
    reference
        .parse::<u16>()
        .ok()
        .and_then(Slot::from_node_number)
        .ok_or_else(|| BracketError::InvalidSeatId(reference.to_string()))
}

/// Win the match at `slot`: the player moves to the next round and a remnant
/// takes its place
pub fn advance_forward(grid: &mut Grid, slot: Slot) -> Result<MoveOutcome> {
    check_bounds(grid, slot)?;

    let seat = match grid.get(slot) {
        Some(seat) => seat,
        None => return Ok(MoveOutcome::Blocked(Blocked::EmptySlot)),
    };
    if seat.is_bye() {
        return Ok(MoveOutcome::CannotAdvanceBye);
    }
    if !seat.is_player() {
        return Ok(MoveOutcome::Blocked(Blocked::NotAPlayer));
    }

    let final_col = grid.final_slot().col;
    if slot.col >= final_col {
        return Ok(MoveOutcome::Blocked(Blocked::FinalColumn));
    }
    if grid.get(slot.sibling()).is_none() {
        return Ok(MoveOutcome::Blocked(Blocked::NoOpponent));
    }
    let destination = slot.parent();
    if grid.get(destination).is_some() {
        return Ok(MoveOutcome::Blocked(Blocked::MatchDecided));
    }

    let player = take_player(grid, slot)?;
    grid.put(slot, Seat::remnant_of(&player));
    let name = player.name().to_string();
    grid.put(destination, player);

    if destination.col == final_col {
        Ok(MoveOutcome::Champion {
            name,
            slot: destination,
        })
    } else {
        Ok(MoveOutcome::Advanced {
            from: slot,
            to: destination,
        })
    }
}

/// Undo the win that brought the player at `slot` here
///
/// Allowed from the final column, or from any later column whose own
/// destination slot is still empty. The origin is whichever of the two
/// feeding slots holds this player's remnant.
pub fn advance_backward(grid: &mut Grid, slot: Slot) -> Result<MoveOutcome> {
    check_bounds(grid, slot)?;

    let seat = match grid.get(slot) {
        Some(seat) => seat,
        None => return Ok(MoveOutcome::Blocked(Blocked::EmptySlot)),
    };
    if !seat.is_player() {
        return Ok(MoveOutcome::Blocked(Blocked::NotAPlayer));
    }

    // final column, or a later column whose destination is still open
    if slot != grid.final_slot() {
        if slot.col == 0 {
            return Ok(MoveOutcome::Blocked(Blocked::FirstColumn));
        }
        if grid.get(slot.parent()).is_some() {
            return Ok(MoveOutcome::Blocked(Blocked::AlreadyAdvanced));
        }
    }

    let (upper, lower) = match slot.children() {
        Some(children) => children,
        None => return Ok(MoveOutcome::Blocked(Blocked::FirstColumn)),
    };
    let origin = [upper, lower]
        .into_iter()
        .find(|&child| {
            grid.get(child)
                .is_some_and(|prev| prev.is_remnant() && prev.name() == seat.name())
        })
        .ok_or_else(|| {
            BracketError::StateCorruption(format!(
                "no remnant of {:?} feeds slot {}",
                seat.name(),
                slot
            ))
        })?;

    let player = take_player(grid, slot)?;
    grid.put(origin, player);

    Ok(MoveOutcome::Reverted {
        from: slot,
        to: origin,
    })
}

fn check_bounds(grid: &Grid, slot: Slot) -> Result<()> {
    if grid.contains(slot) {
        Ok(())
    } else {
        Err(BracketError::OutOfBounds(slot.to_string()))
    }
}

fn take_player(grid: &mut Grid, slot: Slot) -> Result<Seat> {
    grid.take(slot)
        .ok_or_else(|| BracketError::StateCorruption(format!("slot {slot} emptied mid-move")))
}

impl Bracket {
    /// Advance the seat named by `reference` (see [`locate`])
    pub fn advance(&mut self, reference: &str) -> Result<MoveOutcome> {
        let slot = locate(reference)?;
        let outcome = advance_forward(self.grid_mut(), slot)?;
        log_outcome(self.name(), "advance", slot, &outcome);
        Ok(outcome)
    }

    /// Undo the last win of the seat named by `reference`
    pub fn revert(&mut self, reference: &str) -> Result<MoveOutcome> {
        let slot = locate(reference)?;
        let outcome = advance_backward(self.grid_mut(), slot)?;
        log_outcome(self.name(), "revert", slot, &outcome);
        Ok(outcome)
    }
}

fn log_outcome(bracket: &str, action: &str, slot: Slot, outcome: &MoveOutcome) {
    match outcome {
        MoveOutcome::Advanced { from, to } => {
            tracing::info!("{}: advanced {} -> {}", bracket, from, to)
        }
        MoveOutcome::Champion { name, .. } => {
            tracing::info!("{}: {} is the new champion", bracket, name)
        }
        MoveOutcome::Reverted { from, to } => {
            tracing::info!("{}: reverted {} -> {}", bracket, from, to)
        }
        MoveOutcome::CannotAdvanceBye => {
            tracing::warn!("{}: cannot advance the bye at {}", bracket, slot)
        }
        MoveOutcome::Blocked(reason) => {
            tracing::warn!("{}: {} at {} ignored ({:?})", bracket, action, slot, reason)
        }
    }
}
