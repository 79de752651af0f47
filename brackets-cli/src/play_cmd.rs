//! Win and undo commands - apply one transition and save the result
//!
//! - Level 1: run() - orchestration
//! - Level 2: apply()
//! - Level 4: describe_outcome()

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use brackets_core::{Bracket, MoveOutcome};
use brackets_session::{Session, SessionConfig};

#[derive(Args)]
pub struct PlayArgs {
    /// Bracket name
    #[arg(long)]
    pub name: String,

    /// Seat id (`p003`), bare slot (`003`) or node number (`3`)
    #[arg(long)]
    pub seat: String,

    /// Output the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which way the seat moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Winner moves to the next round
    Forward,
    /// Winner returns to the seat it came from
    Backward,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Load, move, and save when the grid changed
pub fn run(args: PlayArgs, config: SessionConfig, direction: Direction) -> Result<()> {
    let mut store = crate::open_store(&config)?;
    let mut session = Session::new(config);
    crate::load_by_name(&mut session, &store, &args.name)?;

    let outcome = apply(&mut session, &args.seat, direction)
        .with_context(|| format!("Failed to move seat {:?} in {:?}", args.seat, args.name))?;

    if outcome.is_applied() {
        session.store(&mut store)?;
    }

    let bracket = session.bracket()?;
    let message = describe_outcome(bracket, &outcome);
    if args.json {
        #[derive(Serialize)]
        struct JsonOutcome<'a> {
            bracket: &'a str,
            seat: &'a str,
            applied: bool,
            message: &'a str,
        }
        let output = JsonOutcome {
            bracket: bracket.name(),
            seat: &args.seat,
            applied: outcome.is_applied(),
            message: &message,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn apply(session: &mut Session, seat: &str, direction: Direction) -> Result<MoveOutcome> {
    let outcome = match direction {
        Direction::Forward => session.advance(seat)?,
        Direction::Backward => session.revert(seat)?,
    };
    Ok(outcome)
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn describe_outcome(bracket: &Bracket, outcome: &MoveOutcome) -> String {
    let name_at = |slot| {
        bracket
            .grid()
            .get(slot)
            .map(|seat| seat.name().to_string())
            .unwrap_or_default()
    };
    match outcome {
        MoveOutcome::Advanced { from, to } => {
            format!("{} advances from {} to {}", name_at(*to), from, to)
        }
        MoveOutcome::Champion { name, .. } => {
            format!("{} wins {}!", name, bracket.name())
        }
        MoveOutcome::Reverted { from, to } => {
            format!("{} moves back from {} to {}", name_at(*to), from, to)
        }
        MoveOutcome::CannotAdvanceBye => "Cannot advance a bye".to_string(),
        MoveOutcome::Blocked(reason) => format!("Nothing changed: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brackets_core::{BracketBuilder, ElimType, Slot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session() -> Session {
        let mut session = Session::new(SessionConfig::default().with_seed(8));
        session
            .create_bracket(
                ElimType::Single,
                "Trio Cup",
                vec!["Ana".into(), "Ben".into(), "Cai".into()],
                vec![Some(1), Some(2), Some(3)],
            )
            .unwrap();
        session
    }

    #[test]
    fn test_apply_forward_then_back() {
        let mut session = session();
        let outcome = apply(&mut session, "p002", Direction::Forward).unwrap();
        let bracket = session.bracket().unwrap();
        assert_eq!(describe_outcome(bracket, &outcome), "Ben advances from 002 to 101");

        let outcome = apply(&mut session, "p101", Direction::Backward).unwrap();
        let bracket = session.bracket().unwrap();
        assert_eq!(describe_outcome(bracket, &outcome), "Ben moves back from 101 to 002");
    }

    #[test]
    fn test_describe_bye_and_blocked() {
        let mut session = session();
        let outcome = apply(&mut session, "b001", Direction::Forward).unwrap();
        assert_eq!(describe_outcome(session.bracket().unwrap(), &outcome), "Cannot advance a bye");

        let outcome = apply(&mut session, "p000", Direction::Backward).unwrap();
        assert!(!outcome.is_applied());
        assert!(describe_outcome(session.bracket().unwrap(), &outcome).starts_with("Nothing changed: "));
    }

    #[test]
    fn test_describe_champion() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut bracket = BracketBuilder::new("Pair", vec!["X".into(), "Y".into()])
            .build(&mut rng)
            .unwrap();
        let outcome = bracket.advance("p001").unwrap();
        let name = bracket.grid().get(Slot::new(1, 0)).unwrap().name().to_string();
        assert_eq!(describe_outcome(&bracket, &outcome), format!("{} wins Pair!", name));
    }

    #[test]
    fn test_unknown_seat_is_an_error() {
        let mut session = session();
        assert!(apply(&mut session, "x999", Direction::Forward).is_err());
    }
}
