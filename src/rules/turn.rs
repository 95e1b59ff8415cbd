//! Turn rotation.
//!
//! Pending skips are consumed in a single jump: with `skip_count = N` the turn
//! moves `N + 1` seats in the current direction. Skipped seats are never
//! visited.

use crate::core::{Direction, PlayerId};

/// The seat that plays after `current`, consuming `skip_count` skips.
///
/// ```
/// use rust_flip::core::{Direction, PlayerId};
/// use rust_flip::rules::next_seat;
///
/// let p = |i| PlayerId::new(i);
/// assert_eq!(next_seat(p(0), Direction::Clockwise, 0, 4), p(1));
/// assert_eq!(next_seat(p(0), Direction::Clockwise, 1, 4), p(2));
/// assert_eq!(next_seat(p(0), Direction::CounterClockwise, 0, 4), p(3));
/// ```
#[must_use]
pub fn next_seat(
    current: PlayerId,
    direction: Direction,
    skip_count: usize,
    player_count: usize,
) -> PlayerId {
    assert!(player_count > 0, "Must have at least 1 player");

    let n = player_count as isize;
    let jump = ((skip_count % player_count) as isize + 1) * direction.step();
    let next = (current.index() as isize + jump).rem_euclid(n);
    PlayerId::new(next as u8)
}

/// The seat immediately after `current`, ignoring skips.
///
/// This is who a draw-family card targets.
#[must_use]
pub fn next_in_line(current: PlayerId, direction: Direction, player_count: usize) -> PlayerId {
    next_seat(current, direction, 0, player_count)
}
