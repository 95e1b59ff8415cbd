//! The play pile: a stack of played cards whose top is the match target.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Stack of played cards. Top = end of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayPile {
    cards: Vector<Card>,
}

impl PlayPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// The current match target.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Remove every card except the top one and return them, bottom first.
    ///
    /// Returns an empty vector when the pile holds one card or none.
    pub fn take_under_top(&mut self) -> Vec<Card> {
        if self.cards.len() <= 1 {
            return Vec::new();
        }
        let top = self.cards.split_off(self.cards.len() - 1);
        let under = std::mem::replace(&mut self.cards, top);
        under.into_iter().collect()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Flip every card in the pile.
    pub fn flip_all(&mut self) {
        for card in self.cards.iter_mut() {
            card.flip();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
