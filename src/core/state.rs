//! Scalar game state.
//!
//! ## GameState
//!
//! Everything about the table that is not a card collection:
//! - Phase of the turn state machine
//! - Current seat, direction, pending skips
//! - Chosen wild color and active side
//! - Round/game winners and round bookkeeping
//!
//! Card collections (deck, pile, hands) live next to this in the engine's
//! table so that a snapshot is just "clone the scalars, clone the vectors".

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{Color, Side};

/// Turn state machine phases.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No round in progress yet (fresh engine).
    #[default]
    RoundSetup,
    /// Waiting for the current player to play or draw.
    AwaitingTurn,
    /// A wild was played; waiting for its color.
    AwaitingColorSelection,
    /// A hand was emptied; waiting for the next round to be requested.
    RoundOver,
    /// Someone reached the target score.
    GameOver,
}

impl Phase {
    /// Whether cards can currently be played or drawn.
    #[must_use]
    pub const fn is_round_active(self) -> bool {
        matches!(self, Phase::AwaitingTurn | Phase::AwaitingColorSelection)
    }
}

/// Play direction around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing seat index.
    #[default]
    Clockwise,
    /// Decreasing seat index.
    CounterClockwise,
}

impl Direction {
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat offset of one step in this direction.
    #[must_use]
    pub const fn step(self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Scalar state of the current game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    player_count: usize,

    pub phase: Phase,

    /// Whose turn it is.
    pub current: PlayerId,

    pub direction: Direction,

    /// Turns to bypass on the next advance.
    pub skip_count: usize,

    /// Color bound to the wild on top of the pile, if any.
    pub chosen_color: Option<Color>,

    /// Side every card is currently showing.
    pub side: Side,

    pub round_winner: Option<PlayerId>,

    pub game_winner: Option<PlayerId>,

    /// Rounds started in this game (first round is 1).
    pub round_number: u32,

    /// Seat that opened the current round.
    pub round_starter: PlayerId,
}

impl GameState {
    /// Create the state of a game that has not started yet.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");

        Self {
            player_count,
            phase: Phase::RoundSetup,
            current: PlayerId::new(0),
            direction: Direction::Clockwise,
            skip_count: 0,
            chosen_color: None,
            side: Side::Light,
            round_winner: None,
            game_winner: None,
            round_number: 0,
            round_starter: PlayerId::new(0),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Whether a wild color is being waited on.
    #[must_use]
    pub fn color_selection_pending(&self) -> bool {
        self.phase == Phase::AwaitingColorSelection
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        matches!(self.phase, Phase::RoundOver | Phase::GameOver)
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Reset per-round scalars for a round opened by `starter`.
    pub fn begin_round(&mut self, starter: PlayerId) {
        self.phase = Phase::AwaitingTurn;
        self.current = starter;
        self.round_starter = starter;
        self.direction = Direction::Clockwise;
        self.skip_count = 0;
        self.chosen_color = None;
        self.side = Side::Light;
        self.round_winner = None;
        self.round_number += 1;
    }
}
