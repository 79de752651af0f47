//! New command - build a bracket from a player list and save it
//!
//! - Level 1: run() - orchestration
//! - Level 2: parse_players()
//! - Level 3: parse_player()

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use clap::Args;

use brackets_core::{ElimType, MAX_PLAYERS};
use brackets_session::{BracketStore, Session, SessionConfig};

use crate::show_cmd;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct NewArgs {
    /// Bracket name
    #[arg(long)]
    pub name: String,

    /// Player, optionally with a seed (`Ana` or `Ana:1`); repeat for each player
    #[arg(long = "player", value_name = "NAME[:SEED]", required = true)]
    pub players: Vec<String>,

    /// Overwrite a saved bracket with the same name
    #[arg(long)]
    pub replace: bool,

    /// Output the new bracket as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: NewArgs, config: SessionConfig) -> Result<()> {
    let (players, seeds) = parse_players(&args.players)?;
    let mut store = crate::open_store(&config)?;

    if let Some(existing) = store.find(&args.name)? {
        if !args.replace {
            bail!(
                "Bracket {:?} already exists as #{} (use --replace to overwrite)",
                args.name,
                existing.bracket_id
            );
        }
        tracing::warn!("Replacing bracket {:?} (#{})", args.name, existing.bracket_id);
    }

    let mut session = Session::new(config);
    session
        .create_bracket(ElimType::Single, &args.name, players, seeds)
        .with_context(|| format!("Failed to build bracket {:?}", args.name))?;
    let id = session.store(&mut store)?;

    let bracket = session.bracket()?;
    if args.json {
        show_cmd::print_json(bracket, id)?;
    } else {
        println!("Saved {:?} as #{}\n", bracket.name(), id);
        print!("{}", show_cmd::render(bracket));
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn parse_players(entries: &[String]) -> Result<(Vec<String>, Vec<Option<i32>>)> {
    if entries.len() > MAX_PLAYERS {
        bail!("At most {} players fit in a bracket, got {}", MAX_PLAYERS, entries.len());
    }
    let parsed = entries
        .iter()
        .map(|entry| parse_player(entry))
        .collect::<Result<Vec<_>>>()?;

    let mut names = HashSet::new();
    let mut seeds = HashSet::new();
    for (name, seed) in &parsed {
        if !names.insert(name.as_str()) {
            bail!("Player {:?} is listed twice", name);
        }
        if let Some(seed) = *seed {
            if seed as usize > entries.len() {
                bail!("Seed {} is out of range for {} players", seed, entries.len());
            }
            if !seeds.insert(seed) {
                bail!("Seed {} is given to more than one player", seed);
            }
        }
    }
    Ok(parsed.into_iter().unzip())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// `NAME` or `NAME:SEED`; a suffix that is not a number stays part of the name
fn parse_player(entry: &str) -> Result<(String, Option<i32>)> {
    let (name, seed) = match entry.rsplit_once(':') {
        Some((name, seed)) => match seed.trim().parse::<i32>() {
            Ok(seed) if seed >= 1 => (name, Some(seed)),
            Ok(seed) => bail!("Seed for {:?} must be positive, got {}", name, seed),
            Err(_) => (entry, None),
        },
        None => (entry, None),
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Player name is empty in {:?}", entry);
    }
    Ok((name.to_string(), seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_plain() {
        assert_eq!(parse_player("Ana").unwrap(), ("Ana".to_string(), None));
        assert_eq!(parse_player("  Ben ").unwrap(), ("Ben".to_string(), None));
    }

    #[test]
    fn test_parse_player_with_seed() {
        assert_eq!(parse_player("Ana:1").unwrap(), ("Ana".to_string(), Some(1)));
        assert_eq!(parse_player("Team: Red:12").unwrap(), ("Team: Red".to_string(), Some(12)));
    }

    #[test]
    fn test_parse_player_non_numeric_suffix() {
        assert_eq!(parse_player("Team:Red").unwrap(), ("Team:Red".to_string(), None));
    }

    #[test]
    fn test_parse_player_rejects_bad_input() {
        assert!(parse_player("").is_err());
        assert!(parse_player(":3").is_err());
        assert!(parse_player("Ana:0").is_err());
        assert!(parse_player("Ana:-2").is_err());
    }

    #[test]
    fn test_parse_players_unzips() {
        let entries = vec!["A:2".to_string(), "B".to_string()];
        let (names, seeds) = parse_players(&entries).unwrap();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(seeds, vec![Some(2), None]);
    }

    #[test]
    fn test_parse_players_limit() {
        let entries: Vec<String> = (0..=MAX_PLAYERS).map(|i| format!("P{i}")).collect();
        assert!(parse_players(&entries).is_err());
    }

    fn entries(list: &[&str]) -> Vec<String> {
        list.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_parse_players_rejects_duplicate_names() {
        assert!(parse_players(&entries(&["Ana:1", "Ana:2"])).is_err());
        assert!(parse_players(&entries(&["Ana", " Ana "])).is_err());
    }

    #[test]
    fn test_parse_players_rejects_duplicate_seeds() {
        assert!(parse_players(&entries(&["Ana:1", "Ben:1"])).is_err());
        assert!(parse_players(&entries(&["Ana:1", "Ben:2", "Cai"])).is_ok());
    }

    #[test]
    fn test_parse_players_rejects_seed_out_of_range() {
        assert!(parse_players(&entries(&["Ana:1", "Ben:5000"])).is_err());
        assert!(parse_players(&entries(&["Ana:3", "Ben"])).is_err());
        assert!(parse_players(&entries(&["Ana:2", "Ben:1"])).is_ok());
    }
}
