//! Dual-sided cards.
//!
//! A `Card` is a two-slot record: one `Face` for the light side, one for the
//! dark side, and a flag saying which one is active. All accessors read
//! through the active face, so flipping a card changes what it *is* without
//! creating a new value.

use serde::{Deserialize, Serialize};

use super::color::{Color, Side};
use super::kind::CardType;
use crate::effects::Effect;

/// One printed face of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Face {
    pub color: Color,
    pub kind: CardType,
}

impl Face {
    #[must_use]
    pub const fn new(color: Color, kind: CardType) -> Self {
        Self { color, kind }
    }

    /// A wild-family face (color is always the wild sentinel).
    #[must_use]
    pub const fn wild(kind: CardType) -> Self {
        Self { color: Color::Wild, kind }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.color.is_wild() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} {}", self.color, self.kind)
        }
    }
}

/// A physical card with a light face and a dark face.
///
/// ## Example
///
/// ```
/// use rust_flip::cards::{Card, CardType, Color, Face};
///
/// let mut card = Card::new(
///     Face::new(Color::Red, CardType::Number(5)),
///     Face::new(Color::Teal, CardType::Skip),
/// );
/// assert_eq!(card.color(), Color::Red);
///
/// card.flip();
/// assert_eq!(card.color(), Color::Teal);
/// assert_eq!(card.kind(), CardType::Skip);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    light: Face,
    dark: Face,
    active: Side,
}

impl Card {
    /// Create a card showing its light face.
    #[must_use]
    pub const fn new(light: Face, dark: Face) -> Self {
        Self {
            light,
            dark,
            active: Side::Light,
        }
    }

    /// Toggle which face is active.
    pub fn flip(&mut self) {
        self.active = self.active.flipped();
    }

    #[must_use]
    pub const fn active_side(&self) -> Side {
        self.active
    }

    /// The currently active face.
    #[must_use]
    pub const fn face(&self) -> Face {
        match self.active {
            Side::Light => self.light,
            Side::Dark => self.dark,
        }
    }

    #[must_use]
    pub const fn light(&self) -> Face {
        self.light
    }

    #[must_use]
    pub const fn dark(&self) -> Face {
        self.dark
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.face().color
    }

    #[must_use]
    pub const fn kind(&self) -> CardType {
        self.face().kind
    }

    #[must_use]
    pub const fn points(&self) -> u32 {
        self.kind().points()
    }

    #[must_use]
    pub const fn is_wild(&self) -> bool {
        self.kind().is_wild()
    }

    /// Check if this card may be played on `other`.
    ///
    /// True when the active colors match, the active types match, or this card
    /// is a wild (wilds are always playable).
    #[must_use]
    pub fn playable_on_top(&self, other: &Card) -> bool {
        self.is_wild() || self.color() == other.color() || self.kind() == other.kind()
    }

    /// The effect of the active face when played.
    #[must_use]
    pub fn effect(&self) -> Effect {
        Effect::for_type(self.kind())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.face())
    }
}
