//! Seeding order and bye allocation
//!
//! Both are pure functions of the slot/player count.

/// Canonical seed-to-slot order for `slots` leaves (a power of two, >= 2)
///
/// Seed 1 meets seed `slots` in round one, seed 2 meets `slots - 1`, and the
/// top two seeds sit in opposite halves so they can only meet in the final.
///
/// `[1, 2] -> [1, 4, 2, 3] -> [1, 8, 4, 5, 2, 7, 3, 6]`
pub fn seed_order(slots: usize) -> Vec<usize> {
    debug_assert!(slots >= 2 && slots.is_power_of_two(), "seed_order needs a power of two");

    let mut order = vec![1, 2];
    while order.len() < slots {
        order = expand(&order);
    }
    order
}

/// Double the order: every seed keeps its position and gains its mirror opponent
fn expand(order: &[usize]) -> Vec<usize> {
    let size = order.len() * 2;
    let mut expanded = Vec::with_capacity(size);
    for &seed in order {
        expanded.push(seed);
        expanded.push(size - (seed - 1));
    }
    expanded
}

/// Number of byes needed to pad `player_count` up to a power of two
///
/// A lone player still needs an opponent slot, so 1 player gets 1 bye.
pub fn byes_needed(player_count: usize) -> usize {
    match player_count {
        0 => 0,
        1 => 1,
        n => n.next_power_of_two() - n,
    }
}

/// Leaf count for `player_count` players, byes included
pub fn leaves_for(player_count: usize) -> usize {
    player_count + byes_needed(player_count)
}
