//! Seats: the occupants of bracket slots

use serde::{Deserialize, Serialize};

use crate::address::{SeatId, Slot};
use crate::error::BracketError;

/// Seed every bye carries, so byes sort after every real player
pub const BYE_SEED: i32 = 999;

/// Seed of a remnant; remnants never take part in seeding
pub const NO_SEED: i32 = -1;

/// Seed given to players rebuilt from a saved state
pub const RESTORED_SEED: i32 = 0;

/// Display name of every bye
pub const BYE_NAME: &str = "BYE";

/// What occupies a slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatKind {
    /// An active, undecided competitor
    Player,
    /// Padding seat that never advances
    Bye,
    /// Inert trace left where a player advanced from
    Remnant,
}

impl SeatKind {
    /// First character of the seat id
    pub fn prefix(self) -> char {
        match self {
            SeatKind::Player => 'p',
            SeatKind::Bye => 'b',
            SeatKind::Remnant => 'r',
        }
    }

    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'p' => Some(SeatKind::Player),
            'b' => Some(SeatKind::Bye),
            'r' => Some(SeatKind::Remnant),
            _ => None,
        }
    }
}

/// Sub-bracket a seat belongs to. Single elimination only uses `Winners`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Tier {
    #[default]
    Winners = 0,
    Losers = 1,
    Finalists = 2,
}

impl From<Tier> for i32 {
    fn from(tier: Tier) -> i32 {
        tier as i32
    }
}

impl TryFrom<i32> for Tier {
    type Error = BracketError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Tier::Winners),
            1 => Ok(Tier::Losers),
            2 => Ok(Tier::Finalists),
            other => Err(BracketError::StateCorruption(format!("unknown tier {other}"))),
        }
    }
}

/// A slot occupant
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    kind: SeatKind,
    name: String,
    seed: i32,
    tier: Tier,
    /// Unset until the grid projector places the seat
    slot: Option<Slot>,
}

impl Seat {
    /// A fresh competitor with its seeding rank (lower = stronger)
    pub fn player(name: impl Into<String>, seed: i32) -> Self {
        Self {
            kind: SeatKind::Player,
            name: name.into(),
            seed,
            tier: Tier::Winners,
            slot: None,
        }
    }

    pub fn bye() -> Self {
        Self {
            kind: SeatKind::Bye,
            name: BYE_NAME.to_string(),
            seed: BYE_SEED,
            tier: Tier::Winners,
            slot: None,
        }
    }

    /// The trace a player leaves behind when it advances out of its slot
    pub fn remnant_of(player: &Seat) -> Self {
        Self {
            kind: SeatKind::Remnant,
            name: player.name.clone(),
            seed: NO_SEED,
            tier: player.tier,
            slot: player.slot,
        }
    }

    /// Rebuild a seat from its persisted name, id and tier
    pub fn restore(name: impl Into<String>, id: SeatId, tier: Tier) -> Self {
        let (name, seed) = match id.kind {
            SeatKind::Player => (name.into(), RESTORED_SEED),
            SeatKind::Bye => (BYE_NAME.to_string(), BYE_SEED),
            SeatKind::Remnant => (name.into(), NO_SEED),
        };
        Self {
            kind: id.kind,
            name,
            seed,
            tier,
            slot: Some(id.slot),
        }
    }

    pub fn kind(&self) -> SeatKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    /// Type-prefixed id, once placed
    pub fn id(&self) -> Option<SeatId> {
        self.slot.map(|slot| SeatId::new(self.kind, slot))
    }

    pub fn is_player(&self) -> bool {
        self.kind == SeatKind::Player
    }

    pub fn is_bye(&self) -> bool {
        self.kind == SeatKind::Bye
    }

    pub fn is_remnant(&self) -> bool {
        self.kind == SeatKind::Remnant
    }

    /// Move the seat to `slot`; its id follows
    pub fn place(&mut self, slot: Slot) {
        self.slot = Some(slot);
    }

    pub fn set_tier(&mut self, tier: Tier) {
        self.tier = tier;
    }
}
