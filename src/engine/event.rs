//! Engine events and observers.
//!
//! Every state-changing operation produces one or more `Event`s, dispatched
//! synchronously to the registered observers after the mutation is complete.
//! An event is a self-contained picture of what changed: it carries the
//! scalar table state alongside the transient details (message, affordances,
//! the card involved).
//!
//! Transient details are reset after each dispatch, except for `Status`
//! events, which report something without changing what the UI should offer.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{Card, Color, Side};
use crate::core::{Direction, GameState, PlayerId};

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    RoundStarted,
    CardPlayed,
    CardDrawn,
    /// A wild is waiting for its color.
    ColorRequested,
    ColorChosen,
    /// A player was made to draw and lose their turn.
    CardsForced,
    DirectionChanged,
    /// Every card on the table turned over.
    TableFlipped,
    /// A player's turn was bypassed.
    TurnSkipped,
    TurnChanged,
    AiThinking,
    RoundOver,
    GameOver,
    Undone,
    Redone,
    GameLoaded,
    /// Informational message only; nothing about the table changed.
    Status,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// What a front end should offer the user right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Affordances {
    pub choose_color: bool,
    pub new_round: bool,
    pub new_game: bool,
}

impl Affordances {
    #[must_use]
    pub const fn choose_color() -> Self {
        Self {
            choose_color: true,
            new_round: false,
            new_game: false,
        }
    }

    #[must_use]
    pub const fn new_round() -> Self {
        Self {
            choose_color: false,
            new_round: true,
            new_game: false,
        }
    }

    #[must_use]
    pub const fn new_game() -> Self {
        Self {
            choose_color: false,
            new_round: false,
            new_game: true,
        }
    }

    #[must_use]
    pub fn any(&self) -> bool {
        self.choose_color || self.new_round || self.new_game
    }
}

/// Immutable record of a state transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub current_player: PlayerId,
    /// Round winner on `RoundOver`, game winner on `GameOver`.
    pub winner: Option<PlayerId>,
    /// Card relevant to the event (played, drawn, or the wild being resolved).
    pub card: Option<Card>,
    pub message: Option<String>,
    pub direction: Direction,
    pub affordances: Affordances,
    pub chosen_color: Option<Color>,
    pub side: Side,
}

/// Receives engine events.
pub trait Observer {
    fn on_event(&mut self, event: &Event);
}

impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn on_event(&mut self, event: &Event) {
        self(event);
    }
}

/// Observer that writes every event to the `tracing` log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&mut self, event: &Event) {
        let message = event.message.as_deref().unwrap_or("");
        match event.kind {
            EventKind::RoundOver | EventKind::GameOver | EventKind::RoundStarted => {
                info!(
                    kind = %event.kind,
                    player = %event.current_player,
                    winner = ?event.winner,
                    "{message}"
                );
            }
            _ => {
                debug!(
                    kind = %event.kind,
                    player = %event.current_player,
                    card = ?event.card,
                    chosen_color = ?event.chosen_color,
                    side = %event.side,
                    "{message}"
                );
            }
        }
    }
}

/// Observer list plus the transient fields of the next event.
#[derive(Default)]
pub(crate) struct EventBus {
    observers: Vec<Box<dyn Observer>>,
    message: Option<String>,
    affordances: Affordances,
    card: Option<Card>,
}

impl EventBus {
    pub(crate) fn register(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    pub(crate) fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub(crate) fn set_affordances(&mut self, affordances: Affordances) {
        self.affordances = affordances;
    }

    pub(crate) fn set_card(&mut self, card: Card) {
        self.card = Some(card);
    }

    /// Build an event from the pending transient fields and dispatch it.
    pub(crate) fn emit(&mut self, kind: EventKind, state: &GameState) {
        let winner = match kind {
            EventKind::RoundOver => state.round_winner,
            EventKind::GameOver => state.game_winner,
            _ => None,
        };
        let event = Event {
            kind,
            current_player: state.current,
            winner,
            card: self.card,
            message: self.message.take(),
            direction: state.direction,
            affordances: self.affordances,
            chosen_color: state.chosen_color,
            side: state.side,
        };
        self.dispatch(&event);
        self.affordances = Affordances::default();
        self.card = None;
    }

    /// Dispatch a `Status` event. Pending transient fields are kept.
    pub(crate) fn status(&mut self, message: impl Into<String>, state: &GameState) {
        let event = Event {
            kind: EventKind::Status,
            current_player: state.current,
            winner: None,
            card: self.card,
            message: Some(message.into()),
            direction: state.direction,
            affordances: self.affordances,
            chosen_color: state.chosen_color,
            side: state.side,
        };
        self.dispatch(&event);
    }

    fn dispatch(&mut self, event: &Event) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("message", &self.message)
            .field("affordances", &self.affordances)
            .field("card", &self.card)
            .finish()
    }
}
