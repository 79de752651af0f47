//! Bracket construction from a player list
//!
//! ## Steps
//!
//! 1. Give unseeded players a synthetic seed from the injected RNG
//! 2. Pad with byes, stable-sort all leaves by seed
//! 3. Lay the sorted leaves out in canonical seeding order
//! 4. Plant them in the leaf slots of the flat tree and project the grid

use chrono::{Local, NaiveDate};
use rand::Rng;

use crate::address::{Shape, MAX_LEAVES};
use crate::bracket::Bracket;
use crate::error::{BracketError, Result};
use crate::grid::Grid;
use crate::seat::{Seat, BYE_SEED};
use crate::seeding::{byes_needed, seed_order};

/// Format of `Bracket::date_created`
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Builds a fresh single-elimination bracket
#[derive(Clone, Debug)]
pub struct BracketBuilder {
    name: String,
    players: Vec<String>,
    seeds: Vec<Option<i32>>,
    created: Option<NaiveDate>,
}

impl BracketBuilder {
    /// Start a bracket called `name` for `players` (names already validated)
    pub fn new(name: impl Into<String>, players: Vec<String>) -> Self {
        Self {
            name: name.into(),
            players,
            seeds: Vec::new(),
            created: None,
        }
    }

    /// Seeds in player order; `None` marks an unseeded player.
    /// Leaving the list empty treats every player as unseeded.
    pub fn with_seeds(mut self, seeds: Vec<Option<i32>>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Stamp a fixed creation date instead of today's
    pub fn created_on(mut self, date: NaiveDate) -> Self {
        self.created = Some(date);
        self
    }

    /// Seed, sort and plant the players, then project the grid
    pub fn build<R: Rng>(self, rng: &mut R) -> Result<Bracket> {
        self.validate()?;

        let player_count = self.players.len();
        let byes = byes_needed(player_count);
        let leaves = assign_seeds(&self.players, &self.seeds, rng);
        let tree = plant(leaves, byes)?;
        let grid = Grid::project(tree)?;

        let created = self.created.unwrap_or_else(|| Local::now().date_naive());
        tracing::debug!(
            "Built bracket {:?}: {} players, {} byes, {} rounds",
            self.name,
            player_count,
            byes,
            grid.height() - 1
        );

        Ok(Bracket::from_parts(
            self.name,
            created.format(DATE_FORMAT).to_string(),
            player_count,
            grid,
        ))
    }

    fn validate(&self) -> Result<()> {
        let players = self.players.len();
        if players == 0 {
            return Err(BracketError::NoPlayers);
        }
        if players > MAX_LEAVES {
            return Err(BracketError::TooManyPlayers(players));
        }
        if !self.seeds.is_empty() && self.seeds.len() != players {
            return Err(BracketError::SeedCountMismatch {
                players,
                seeds: self.seeds.len(),
            });
        }
        Ok(())
    }
}

/// Turn names into player seats, drawing a seed in `[players + 1, BYE_SEED)`
/// for everyone unseeded. Collisions are tolerated.
fn assign_seeds<R: Rng>(players: &[String], seeds: &[Option<i32>], rng: &mut R) -> Vec<Seat> {
    let lowest_synthetic = players.len() as i32 + 1;
    players
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let seed = match seeds.get(i).copied().flatten() {
                Some(seed) => seed,
                None => {
                    let seed = rng.gen_range(lowest_synthetic..BYE_SEED);
                    tracing::debug!("Drew seed {} for unseeded player {:?}", seed, name);
                    seed
                }
            };
            Seat::player(name.as_str(), seed)
        })
        .collect()
}

/// Pad with byes, sort by seed and place the starting lineup in the leaf
/// slots of a flat tree. Slots above the leaves stay empty.
fn plant(mut leaves: Vec<Seat>, byes: usize) -> Result<Vec<Option<Seat>>> {
    leaves.extend((0..byes).map(|_| Seat::bye()));
    // stable: equal seeds keep insertion order
    leaves.sort_by_key(Seat::seed);

    let shape = Shape::new(leaves.len())?;
    let mut sorted: Vec<Option<Seat>> = leaves.into_iter().map(Some).collect();

    let mut tree: Vec<Option<Seat>> = vec![None; shape.empties()];
    tree.extend(seed_order(shape.leaves()).into_iter().map(|seed| sorted[seed - 1].take()));
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Slot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn leaf_names(bracket: &Bracket) -> Vec<String> {
        bracket
            .grid()
            .column(0)
            .unwrap()
            .iter()
            .map(|seat| seat.as_ref().unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_four_seeded_players() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let bracket = BracketBuilder::new("Cup", names(&["P1", "P2", "P3", "P4"]))
            .with_seeds(vec![Some(1), Some(2), Some(3), Some(4)])
            .build(&mut rng)
            .unwrap();

        assert_eq!(leaf_names(&bracket), vec!["P1", "P4", "P2", "P3"]);
        assert_eq!(bracket.num_players(), 4);
        assert_eq!(bracket.grid().height(), 3);
    }

    #[test]
    fn test_seeds_ignore_input_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let bracket = BracketBuilder::new("Cup", names(&["C", "A", "D", "B"]))
            .with_seeds(vec![Some(3), Some(1), Some(4), Some(2)])
            .build(&mut rng)
            .unwrap();

        assert_eq!(leaf_names(&bracket), vec!["A", "D", "B", "C"]);
    }

    #[test]
    fn test_byes_face_top_seeds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let players = names(&["S1", "S2", "S3", "S4", "S5"]);
        let seeds = (1..=5).map(Some).collect();
        let bracket = BracketBuilder::new("Cup", players)
            .with_seeds(seeds)
            .build(&mut rng)
            .unwrap();

        // order [1, 8, 4, 5, 2, 7, 3, 6]; seeds 6..8 are byes
        assert_eq!(
            leaf_names(&bracket),
            vec!["S1", "BYE", "S4", "S5", "S2", "BYE", "S3", "BYE"]
        );
        assert_eq!(bracket.grid().bye_count(), 3);
        assert_eq!(bracket.num_players(), 5);
    }

    #[test]
    fn test_single_player_gets_a_bye() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let bracket = BracketBuilder::new("Solo", names(&["Only"]))
            .build(&mut rng)
            .unwrap();

        assert_eq!(bracket.grid().leaves(), 2);
        assert_eq!(leaf_names(&bracket), vec!["Only", "BYE"]);
    }

    #[test]
    fn test_unseeded_players_get_synthetic_seeds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let seats = assign_seeds(&names(&["A", "B", "C"]), &[None, Some(1), None], &mut rng);

        assert_eq!(seats[1].seed(), 1);
        for seat in [&seats[0], &seats[2]] {
            assert!((4..BYE_SEED).contains(&seat.seed()), "seed {}", seat.seed());
        }
    }

    #[test]
    fn test_unseeded_build_is_deterministic_per_rng_seed() {
        let players = names(&["A", "B", "C", "D", "E", "F"]);
        let build = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            BracketBuilder::new("Cup", players.clone())
                .build(&mut rng)
                .unwrap()
        };
        assert_eq!(leaf_names(&build(42)), leaf_names(&build(42)));
    }

    #[test]
    fn test_equal_seeds_keep_insertion_order() {
        let tree = plant(
            vec![Seat::player("first", 5), Seat::player("second", 5)],
            0,
        )
        .unwrap();
        let names: Vec<_> = tree.iter().flatten().map(|seat| seat.name().to_string()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_inner_slots_start_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let bracket = BracketBuilder::new("Cup", names(&["A", "B", "C", "D"]))
            .build(&mut rng)
            .unwrap();

        assert!(bracket.grid().get(Slot::new(1, 0)).is_none());
        assert!(bracket.grid().get(Slot::new(1, 1)).is_none());
        assert!(bracket.champion().is_none());
    }

    #[test]
    fn test_created_date_format() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let date = NaiveDate::from_ymd_opt(2016, 3, 9).unwrap();
        let bracket = BracketBuilder::new("Cup", names(&["A", "B"]))
            .created_on(date)
            .build(&mut rng)
            .unwrap();
        assert_eq!(bracket.date_created(), "03/09/2016");
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            BracketBuilder::new("Empty", Vec::new()).build(&mut rng),
            Err(BracketError::NoPlayers)
        ));

        let crowd: Vec<String> = (0..65).map(|i| format!("P{i}")).collect();
        assert!(matches!(
            BracketBuilder::new("Crowd", crowd).build(&mut rng),
            Err(BracketError::TooManyPlayers(65))
        ));

        assert!(matches!(
            BracketBuilder::new("Odd", names(&["A", "B"]))
                .with_seeds(vec![Some(1)])
                .build(&mut rng),
            Err(BracketError::SeedCountMismatch { players: 2, seeds: 1 })
        ));
    }
}
