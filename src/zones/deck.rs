//! The draw pile.
//!
//! The deck is an ordered sequence of cards with the top at the end. It is
//! built from a fixed recipe; only the order is random.
//!
//! ## Recipe
//!
//! Light faces, per light color: numbers 1-9 twice, two each of Draw One,
//! Reverse, Skip and Flip. Plus four Wild and four Wild Draw Two.
//!
//! Dark faces, per dark color: numbers 1-9 twice, two each of Draw Five,
//! Reverse, Skip Everyone and Flip. Plus four Wild and four Wild Draw Color.
//!
//! The i-th light face is printed on the back of the i-th dark face, giving
//! 112 cards.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardType, Color, Face};
use crate::core::GameRng;

/// Number of cards in a standard deck.
pub const STANDARD_DECK_SIZE: usize = 112;

/// Ordered draw pile. Top of the deck = end of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck from cards in order (last element is the top).
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// The fixed card recipe, in recipe order.
    #[must_use]
    pub fn recipe() -> Vec<Card> {
        let light = faces(
            Color::LIGHT,
            [CardType::DrawOne, CardType::Reverse, CardType::Skip, CardType::Flip],
            [CardType::Wild, CardType::WildDrawTwo],
        );
        let dark = faces(
            Color::DARK,
            [CardType::DrawFive, CardType::Reverse, CardType::SkipEveryone, CardType::Flip],
            [CardType::Wild, CardType::WildDrawColor],
        );
        debug_assert_eq!(light.len(), dark.len());

        light
            .into_iter()
            .zip(dark)
            .map(|(l, d)| Card::new(l, d))
            .collect()
    }

    /// A freshly shuffled standard deck, every card showing its light face.
    #[must_use]
    pub fn standard(rng: &mut GameRng) -> Self {
        let mut deck = Self::from_cards(Self::recipe());
        deck.shuffle(rng);
        deck
    }

    /// Build a deck whose round-robin deal produces `hands`, followed by
    /// `pile_seed` as the first card turned up, then `remaining` in draw order.
    ///
    /// All hands must have the same length. Useful for staged rounds.
    #[must_use]
    pub fn arranged(hands: &[Vec<Card>], pile_seed: Card, remaining: Vec<Card>) -> Self {
        let hand_size = hands.first().map_or(0, Vec::len);
        assert!(
            hands.iter().all(|h| h.len() == hand_size),
            "All arranged hands must have the same size"
        );

        let mut draw_order = Vec::with_capacity(hands.len() * hand_size + 1 + remaining.len());
        for round in 0..hand_size {
            for hand in hands {
                draw_order.push(hand[round]);
            }
        }
        draw_order.push(pile_seed);
        draw_order.extend(remaining);

        // Draws come off the end.
        draw_order.reverse();
        Self::from_cards(draw_order)
    }

    /// Remove and return the top card, or `None` when empty.
    pub fn draw_card_from_deck(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Put a card back on top.
    pub fn put_back(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Add several cards on top, in order.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Uniformly re-randomize the order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.cards.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    /// Flip every card in the deck.
    pub fn flip_all(&mut self) {
        for card in self.cards.iter_mut() {
            card.flip();
        }
    }

    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
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

/// Build one side's faces in recipe order.
fn faces(palette: [Color; 4], actions: [CardType; 4], wilds: [CardType; 2]) -> Vec<Face> {
    let mut out = Vec::with_capacity(STANDARD_DECK_SIZE);
    for color in palette {
        for n in 1..=9u8 {
            out.push(Face::new(color, CardType::Number(n)));
            out.push(Face::new(color, CardType::Number(n)));
        }
        for action in actions {
            out.push(Face::new(color, action));
            out.push(Face::new(color, action));
        }
    }
    for wild in wilds {
        for _ in 0..4 {
            out.push(Face::wild(wild));
        }
    }
    out
}
