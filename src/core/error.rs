//! Engine error type.
//!
//! Errors are for rejected requests: the engine state is left untouched
//! whenever one of these is returned. Normal gameplay results (a draw that
//! found nothing, a stale AI callback) are reported as outcome values instead.

use thiserror::Error;

use super::state::Phase;
use crate::cards::{Card, Color, Side};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("a game needs 2 to 4 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Hand positions are 1-based.
    #[error("hand position {index} is out of range (hand holds {len} cards)")]
    HandIndexOutOfRange { index: usize, len: usize },

    #[error("{card} cannot be played on {top}")]
    IllegalMove { card: Card, top: Card },

    #[error("action requires phase {expected:?}, engine is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("{color} is not a {side} color")]
    InvalidColor { color: Color, side: Side },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,

    #[error("the current player is not computer-controlled")]
    NotAiTurn,

    #[error("save format version {0} is not supported")]
    UnsupportedSave(u32),

    #[error("save data could not be encoded or decoded: {0}")]
    Codec(#[from] bincode::Error),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
