//! Core engine types: players, scalar state, RNG, configuration, errors.
//!
//! These are the building blocks the rest of the engine shares. They know
//! nothing about turn sequencing; that lives in `rules` and `engine`.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{EngineConfig, DEFAULT_HAND_SIZE, DEFAULT_TARGET_SCORE};
pub use error::{EngineError, EngineResult};
pub use player::{Hand, Player, PlayerId, PlayerKind, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{Direction, GameState, Phase};
