//! Show command - print a saved bracket round by round
//!
//! - Level 1: run() - orchestration
//! - Level 4: render(), print_json() - formatting shared with other commands

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use brackets_core::{Bracket, BracketSummary, SeatId, Slot};
use brackets_session::{BracketId, Session, SessionConfig};

#[derive(Args)]
pub struct ShowArgs {
    /// Bracket name
    #[arg(long)]
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: ShowArgs, config: SessionConfig) -> Result<()> {
    let store = crate::open_store(&config)?;
    let mut session = Session::new(config);
    let id = crate::load_by_name(&mut session, &store, &args.name)?;

    let bracket = session.bracket()?;
    if args.json {
        print_json(bracket, id)?;
    } else {
        print!("{}", render(bracket));
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

/// Column listing followed by the matches still to be played
pub fn render(bracket: &Bracket) -> String {
    let grid = bracket.grid();
    let final_column = grid.shape().final_column();
    let mut lines = vec![format!(
        "{} - {} players, created {}",
        bracket.name(),
        bracket.num_players(),
        bracket.date_created()
    )];

    for col in 0..=final_column {
        lines.push(String::new());
        lines.push(if col == final_column {
            "Champion".to_string()
        } else {
            format!("Round {}", col + 1)
        });
        for (row, seat) in grid.column(col).unwrap_or_default().iter().enumerate() {
            let slot = Slot::new(col, row as u8);
            lines.push(match seat {
                Some(seat) => format!("  {}  {}", SeatId::new(seat.kind(), slot), seat.name()),
                None => format!("  {}  ---", slot),
            });
        }
    }

    let pending = bracket.pending_matches();
    lines.push(String::new());
    if pending.is_empty() {
        lines.push("No matches pending".to_string());
    } else {
        lines.push("Pending matches".to_string());
        for m in pending {
            lines.push(format!(
                "  Round {}: {} vs {}",
                m.round() + 1,
                describe(bracket, m.upper),
                describe(bracket, m.lower)
            ));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn describe(bracket: &Bracket, slot: Slot) -> String {
    match bracket.grid().get(slot) {
        Some(seat) => format!("{} ({})", seat.name(), SeatId::new(seat.kind(), slot)),
        None => slot.to_string(),
    }
}

#[derive(Serialize)]
struct JsonSeat {
    id: String,
    name: String,
    tier: i32,
}

#[derive(Serialize)]
struct JsonMatch {
    round: u8,
    upper: String,
    lower: String,
    destination: String,
}

#[derive(Serialize)]
struct JsonBracket {
    bracket_id: BracketId,
    #[serde(flatten)]
    summary: BracketSummary,
    seats: Vec<JsonSeat>,
    pending: Vec<JsonMatch>,
    champion: Option<String>,
}

pub fn print_json(bracket: &Bracket, bracket_id: BracketId) -> Result<()> {
    let grid = bracket.grid();
    let seat_id = |slot: Slot| {
        grid.get(slot)
            .map(|seat| SeatId::new(seat.kind(), slot).to_string())
            .unwrap_or_else(|| slot.to_string())
    };

    let output = JsonBracket {
        bracket_id,
        summary: bracket.summary(),
        seats: bracket
            .state()
            .triples()
            .map(|(name, id, tier)| JsonSeat {
                id: id.to_string(),
                name: name.to_string(),
                tier,
            })
            .collect(),
        pending: bracket
            .pending_matches()
            .into_iter()
            .map(|m| JsonMatch {
                round: m.round() + 1,
                upper: seat_id(m.upper),
                lower: seat_id(m.lower),
                destination: m.destination().to_string(),
            })
            .collect(),
        champion: bracket.champion().map(|seat| seat.name().to_string()),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
