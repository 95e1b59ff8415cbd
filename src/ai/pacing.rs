//! AI turn pacing.
//!
//! Computer seats do not act the instant their turn begins. The engine
//! records a `ScheduledAiTurn` stamped with a `TurnToken`; the host waits for
//! the delay and hands the token back. Every mutation of the engine moves the
//! epoch forward, so a token issued before an undo, a new round or any other
//! change no longer matches and the callback is ignored.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::cards::Color;
use crate::core::PlayerId;
use crate::engine::{DrawOutcome, PlayOutcome};

/// Identifies the engine state an AI turn was scheduled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnToken(pub(crate) u64);

impl TurnToken {
    #[must_use]
    pub const fn epoch(self) -> u64 {
        self.0
    }
}

/// A pending computer turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledAiTurn {
    pub token: TurnToken,
    pub player: PlayerId,
    pub delay: Duration,
    pub scheduled_at: Instant,
}

impl ScheduledAiTurn {
    /// When the turn should fire.
    #[must_use]
    pub fn due_at(&self) -> Instant {
        self.scheduled_at + self.delay
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due_at()
    }
}

/// What a fired AI turn did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiTurnOutcome {
    /// A card was played (wild colors are already applied).
    Played(PlayOutcome),
    /// The strategy chose to draw, or had nothing legal.
    Drew(DrawOutcome),
    /// A pending wild color was supplied (e.g. after an undo).
    ChoseColor(Color),
    /// The token no longer matches the engine state; nothing happened.
    Stale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_at() {
        let now = Instant::now();
        let turn = ScheduledAiTurn {
            token: TurnToken(3),
            player: PlayerId::new(1),
            delay: Duration::from_millis(250),
            scheduled_at: now,
        };

        assert!(!turn.is_due(now));
        assert!(!turn.is_due(now + Duration::from_millis(249)));
        assert!(turn.is_due(now + Duration::from_millis(250)));
        assert_eq!(turn.token.epoch(), 3);
    }
}
