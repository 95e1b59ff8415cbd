//! Baseline computer policy.
//!
//! Plays the first legal card in hand; draws when nothing fits. For wilds it
//! names the color it holds most of, falling back to the side's default.

use std::time::Duration;

use rustc_hash::FxHashMap;

use super::strategy::{AiStrategy, CardChoice, TableView};
use crate::cards::{Card, Color, Side};
use crate::core::Player;

/// Default thinking delay.
pub const DEFAULT_AI_DELAY: Duration = Duration::from_millis(800);

/// First-legal-card policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaselineStrategy {
    delay: Duration,
}

impl Default for BaselineStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_AI_DELAY)
    }
}

impl BaselineStrategy {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl AiStrategy for BaselineStrategy {
    fn choose_card(&self, player: &Player, _top: &Card, view: &TableView<'_>) -> CardChoice {
        player
            .hand()
            .iter()
            .position(|card| view.is_legal(card))
            .map_or(CardChoice::Draw, |pos| CardChoice::Play(pos + 1))
    }

    fn choose_wild_color(&self, player: &Player, side: Side) -> Color {
        let mut counts: FxHashMap<Color, usize> = FxHashMap::default();
        for card in player.hand().iter() {
            let color = card.color();
            if color.is_choosable_on(side) {
                *counts.entry(color).or_default() += 1;
            }
        }

        // Palette order breaks ties so the choice is deterministic.
        let mut best = side.default_color();
        let mut best_count = 0;
        for color in side.palette() {
            let count = counts.get(&color).copied().unwrap_or(0);
            if count > best_count {
                best = color;
                best_count = count;
            }
        }
        best
    }

    fn delay(&self) -> Duration {
        self.delay
    }

    fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}
