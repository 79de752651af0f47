//! Session: owns at most one live bracket and the RNG used to build it
//!
//! Level 1 - Orchestration (create, load, store) and Level 2 - Transitions

use rand_chacha::ChaCha8Rng;

use brackets_core::{Bracket, BracketBuilder, BracketError, BracketState, ElimType, MoveOutcome};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::store::{BracketId, BracketStore};

/// A bracket session
pub struct Session {
    config: SessionConfig,
    rng: ChaCha8Rng,
    bracket: Option<Bracket>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let rng = config.create_rng();
        Self {
            config,
            rng,
            bracket: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ========================================================================
    // LEVEL 1 - ORCHESTRATION
    // ========================================================================

    /// Build a fresh bracket, replacing the live one on success.
    ///
    /// `seeds` may be empty (everyone unseeded) or one entry per player.
    pub fn create_bracket(
        &mut self,
        elim_type: ElimType,
        name: &str,
        players: Vec<String>,
        seeds: Vec<Option<i32>>,
    ) -> SessionResult<&Bracket> {
        require_single(elim_type)?;
        let bracket = BracketBuilder::new(name, players)
            .with_seeds(seeds)
            .build(&mut self.rng)?;
        tracing::info!(
            "Created bracket {:?}: {} players, {} rounds",
            bracket.name(),
            bracket.num_players(),
            bracket.grid().height() - 1
        );
        Ok(&*self.bracket.insert(bracket))
    }

    /// Rebuild a bracket from its flat state, replacing the live one on success
    pub fn recreate_bracket(
        &mut self,
        elim_type: ElimType,
        name: &str,
        state: &BracketState,
    ) -> SessionResult<&Bracket> {
        require_single(elim_type)?;
        let bracket = Bracket::reconstruct(
            name,
            &state.date_created,
            &state.names,
            &state.ids,
            &state.tiers,
        )?;
        tracing::info!("Recreated bracket {:?} from {} seats", name, state.len());
        Ok(&*self.bracket.insert(bracket))
    }

    /// Save the live bracket; the store decides whether this is an insert or an update
    pub fn store(&self, store: &mut impl BracketStore) -> SessionResult<BracketId> {
        let bracket = self.bracket()?;
        let id = store.save(&bracket.summary(), &bracket.state())?;
        tracing::info!("Stored bracket {:?} as #{}", bracket.name(), id);
        Ok(id)
    }

    /// Replace the live bracket with a stored one
    pub fn load(&mut self, store: &impl BracketStore, bracket_id: BracketId) -> SessionResult<&Bracket> {
        let (record, state) = store.load(bracket_id)?;
        let elim_type = ElimType::try_from(record.elim_type)?;
        self.recreate_bracket(elim_type, &record.name, &state)
    }

    /// Remove a stored bracket; the live one is untouched
    pub fn delete(&mut self, store: &mut impl BracketStore, bracket_id: BracketId) -> SessionResult<bool> {
        let removed = store.delete(bracket_id)?;
        if removed {
            tracing::info!("Deleted bracket #{}", bracket_id);
        } else {
            tracing::warn!("Bracket #{} was not in the store", bracket_id);
        }
        Ok(removed)
    }

    /// Drop the live bracket
    pub fn close(&mut self) -> Option<Bracket> {
        self.bracket.take()
    }

    // ========================================================================
    // LEVEL 2 - TRANSITIONS
    // ========================================================================

    pub fn advance(&mut self, seat: &str) -> SessionResult<MoveOutcome> {
        Ok(self.bracket_mut()?.advance(seat)?)
    }

    pub fn revert(&mut self, seat: &str) -> SessionResult<MoveOutcome> {
        Ok(self.bracket_mut()?.revert(seat)?)
    }

    // ========================================================================
    // LEVEL 3 - ACCESS
    // ========================================================================

    pub fn bracket(&self) -> SessionResult<&Bracket> {
        self.bracket.as_ref().ok_or(SessionError::BracketNotCreated)
    }

    pub fn has_bracket(&self) -> bool {
        self.bracket.is_some()
    }

    /// Flat snapshot of the live bracket
    pub fn state(&self) -> SessionResult<BracketState> {
        Ok(self.bracket()?.state())
    }

    fn bracket_mut(&mut self) -> SessionResult<&mut Bracket> {
        self.bracket.as_mut().ok_or(SessionError::BracketNotCreated)
    }
}

fn require_single(elim_type: ElimType) -> SessionResult<()> {
    match elim_type {
        ElimType::Single => Ok(()),
        other => {
            tracing::warn!("Elimination type {:?} is not supported", other);
            Err(BracketError::InvalidEliminationType(other.code()).into())
        }
    }
}
