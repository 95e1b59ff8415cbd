//! Engine configuration.
//!
//! `EngineConfig` holds the tunable numbers of a game. The defaults are the
//! standard rules: 7-card hands, first to 500 points.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use crate::ai::DEFAULT_AI_DELAY;

/// Standard number of cards dealt to each player.
pub const DEFAULT_HAND_SIZE: usize = 7;

/// Standard score that ends the game.
pub const DEFAULT_TARGET_SCORE: u32 = 500;

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cards dealt to each player at round start.
    pub hand_size: usize,

    /// Cumulative score at which the game ends.
    pub target_score: u32,

    /// Maximum number of undo snapshots kept. Oldest are evicted first.
    pub undo_depth: usize,

    /// Seed for every shuffle in the game.
    pub seed: u64,

    /// Default thinking delay for computer players.
    pub ai_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            target_score: DEFAULT_TARGET_SCORE,
            undo_depth: 64,
            seed: 42,
            ai_delay: DEFAULT_AI_DELAY,
        }
    }
}

impl EngineConfig {
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    pub fn with_undo_depth(mut self, depth: usize) -> Self {
        self.undo_depth = depth;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_ai_delay(mut self, delay: Duration) -> Self {
        self.ai_delay = delay;
        self
    }

    /// Check the values against what a 112-card deck can support.
    pub fn validate(&self, player_count: usize) -> EngineResult<()> {
        if !(2..=4).contains(&player_count) {
            return Err(EngineError::InvalidPlayerCount(player_count));
        }
        if self.hand_size == 0 {
            return Err(EngineError::InvalidConfig("hand size must be at least 1".into()));
        }
        // Leave at least one card for the pile and a handful to draw from.
        if self.hand_size * player_count > 100 {
            return Err(EngineError::InvalidConfig(format!(
                "{} cards for {} players does not fit in the deck",
                self.hand_size, player_count
            )));
        }
        if self.target_score == 0 {
            return Err(EngineError::InvalidConfig("target score must be positive".into()));
        }
        Ok(())
    }
}
