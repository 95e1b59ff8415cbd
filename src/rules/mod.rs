//! Pure game rules.
//!
//! - Turn rotation with skip consumption
//! - Round scoring against the target
//!
//! Nothing here touches the engine's event or history machinery, so the
//! functions can be tested and reused in isolation.

pub mod scoring;
pub mod turn;

pub use scoring::{round_points, score_round, RoundScore};
pub use turn::{next_in_line, next_seat};
