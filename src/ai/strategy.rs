//! AI strategy contract.
//!
//! Strategies are consulted by the engine when a computer seat is due to act.
//! They only *decide*; the engine validates and applies the decision exactly
//! as it would for a human.

use std::fmt;
use std::time::Duration;

use crate::cards::{Card, Color, Side};
use crate::core::{Direction, Player, PlayerId};
use crate::engine::Table;

/// A strategy's decision for its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardChoice {
    /// Play the card at this 1-based hand position.
    Play(usize),
    /// Draw instead of playing.
    Draw,
}

/// Read-only view of the table handed to strategies.
#[derive(Clone, Copy)]
pub struct TableView<'a> {
    table: &'a Table,
}

impl<'a> TableView<'a> {
    pub(crate) fn new(table: &'a Table) -> Self {
        Self { table }
    }

    #[must_use]
    pub fn top(&self) -> Option<&'a Card> {
        self.table.top()
    }

    /// Color bound to a wild on top of the pile.
    #[must_use]
    pub fn chosen_color(&self) -> Option<Color> {
        self.table.state.chosen_color
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.table.state.side
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.table.state.direction
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.table.player_count()
    }

    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> usize {
        self.table.players[player].hand_size()
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.table.deck.len()
    }

    /// Whether `card` would be accepted on the current pile.
    #[must_use]
    pub fn is_legal(&self, card: &Card) -> bool {
        self.table.is_legal(card)
    }
}

impl fmt::Debug for TableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("top", &self.top())
            .field("chosen_color", &self.chosen_color())
            .field("side", &self.side())
            .finish()
    }
}

/// Decision policy for a computer seat.
pub trait AiStrategy: fmt::Debug + Send {
    /// Pick a card to play, or decide to draw.
    fn choose_card(&self, player: &Player, top: &Card, view: &TableView<'_>) -> CardChoice;

    /// Pick the color for a wild played on `side`.
    fn choose_wild_color(&self, player: &Player, side: Side) -> Color;

    /// How long the engine should wait before acting for this seat.
    fn delay(&self) -> Duration;

    fn set_delay(&mut self, delay: Duration);
}
