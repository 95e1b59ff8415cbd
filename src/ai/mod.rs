//! Computer players.
//!
//! - `AiStrategy`: decision contract (card choice, wild color, delay)
//! - `BaselineStrategy`: first legal card, majority color for wilds
//! - `TableView`: read-only table access for strategies
//! - `ScheduledAiTurn` / `TurnToken`: delayed, cancellable-by-staleness turns

mod baseline;
mod pacing;
mod strategy;

pub use baseline::{BaselineStrategy, DEFAULT_AI_DELAY};
pub use pacing::{AiTurnOutcome, ScheduledAiTurn, TurnToken};
pub use strategy::{AiStrategy, CardChoice, TableView};
