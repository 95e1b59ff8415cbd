//! # rust-flip
//!
//! Engine for a dual-sided matching card game for 2-4 players.
//!
//! Every card carries a light face and a dark face. Players take turns
//! matching the top of the play pile by color or type; action cards skip,
//! reverse, force draws, or flip every card on the table to its other face.
//! Emptying your hand wins the round and scores the cards left in your
//! opponents' hands. First to the target score (500 by default) wins.
//!
//! ## Design Principles
//!
//! 1. **One State Object**: The engine owns deck, pile, hands and scalars.
//!    Everything outside reads through accessors or events.
//!
//! 2. **Cheap Snapshots**: Card collections are `im` vectors, so undo
//!    history is a list of structural clones.
//!
//! 3. **Deterministic**: One seeded RNG drives every shuffle; its position
//!    is part of the save file.
//!
//! ## Modules
//!
//! - `cards`: Faces, colors, sides and card types
//! - `core`: Players, scalar state, configuration, RNG, errors
//! - `zones`: Deck and play pile
//! - `rules`: Turn advance and round scoring
//! - `effects`: Card effects and their resolution
//! - `ai`: Computer strategies and turn pacing
//! - `engine`: The game API, undo/redo, events, save/load

pub mod ai;
pub mod cards;
pub mod core;
pub mod effects;
pub mod engine;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Direction, EngineConfig, EngineError, EngineResult, GameRng, GameRngState, GameState, Phase,
    Player, PlayerId, PlayerKind, PlayerMap,
};

pub use crate::cards::{Card, CardType, Color, Face, Side};

pub use crate::zones::{Deck, PlayPile, STANDARD_DECK_SIZE};

pub use crate::rules::{next_seat, score_round, RoundScore};

pub use crate::effects::{Effect, EffectOutcome, EffectResolver};

pub use crate::ai::{AiStrategy, AiTurnOutcome, BaselineStrategy, CardChoice, TurnToken};

pub use crate::engine::{
    Affordances, DrawOutcome, Engine, EngineBuilder, Event, EventKind, Observer, PlayOutcome,
    Snapshot, TracingObserver,
};
