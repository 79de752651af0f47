//! Brackets Core - Single-elimination bracket engine
//!
//! This crate provides the bracket logic, with no I/O:
//! - Addressing (grid slots, flat tree indices, seat ids)
//! - Seeding order and bye allocation
//! - Bracket construction from a player list
//! - Grid projection and reconstruction
//! - Match advancement and undo
//! - Flat state codec for persistence

pub mod address;
pub mod seat;
pub mod seeding;
pub mod grid;
pub mod bracket;
pub mod builder;
pub mod advance;
pub mod codec;
pub mod error;

// Re-exports for convenient access
pub use address::{SeatId, Shape, Slot, MAX_LEAVES};
pub use seat::{Seat, SeatKind, Tier, BYE_NAME, BYE_SEED};
pub use seeding::{byes_needed, leaves_for, seed_order};
pub use grid::Grid;
pub use bracket::{Bracket, ElimType, Match};
pub use builder::BracketBuilder;
pub use advance::{advance_backward, advance_forward, locate, Blocked, MoveOutcome};
pub use codec::{deserialize, serialize, BracketState, BracketSummary};
pub use error::{BracketError, Result};

/// Most players a bracket accepts
pub const MAX_PLAYERS: usize = MAX_LEAVES;
