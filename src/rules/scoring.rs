//! Round scoring.
//!
//! The player who empties their hand collects the point value of every card
//! still held by the others. Losers' scores never change.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerId, PlayerMap};

/// Outcome of scoring a finished round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub winner: PlayerId,
    /// Points gained this round.
    pub points: u32,
    /// Winner's cumulative score after the round.
    pub total: u32,
    /// Whether `total` reached the target.
    pub game_over: bool,
}

/// Sum of the hand values of everyone except `winner`.
#[must_use]
pub fn round_points(players: &PlayerMap<Player>, winner: PlayerId) -> u32 {
    players
        .iter()
        .filter(|(id, _)| *id != winner)
        .map(|(_, player)| player.hand_value())
        .sum()
}

/// Credit the round to `winner` and check the target.
pub fn score_round(players: &mut PlayerMap<Player>, winner: PlayerId, target: u32) -> RoundScore {
    let points = round_points(players, winner);
    let player = &mut players[winner];
    player.add_score(points);
    let total = player.score();

    RoundScore {
        winner,
        points,
        total,
        game_over: total >= target,
    }
}
