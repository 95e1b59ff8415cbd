//! Card colors and card sides.
//!
//! Every card has a light face and a dark face. Each light color has a fixed
//! dark counterpart, so a color chosen on one side can be translated to the
//! other palette.

use serde::{Deserialize, Serialize};

/// Which face of the cards is currently being read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Light,
    Dark,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Side::Light => Side::Dark,
            Side::Dark => Side::Light,
        }
    }

    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(self, Side::Light)
    }

    /// The four playable colors of this side, in canonical order.
    #[must_use]
    pub const fn palette(self) -> [Color; 4] {
        match self {
            Side::Light => Color::LIGHT,
            Side::Dark => Color::DARK,
        }
    }

    /// Fallback color used when no better choice exists.
    #[must_use]
    pub const fn default_color(self) -> Color {
        self.palette()[0]
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Light => write!(f, "light"),
            Side::Dark => write!(f, "dark"),
        }
    }
}

/// A card color.
///
/// `Wild` is the sentinel color carried by wild faces; it never counts as a
/// color match on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    // Light palette
    Red,
    Yellow,
    Green,
    Blue,
    // Dark palette
    Pink,
    Teal,
    Orange,
    Purple,
    Wild,
}

impl Color {
    /// Light palette in canonical order.
    pub const LIGHT: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Dark palette; `DARK[i]` is the counterpart of `LIGHT[i]`.
    pub const DARK: [Color; 4] = [Color::Pink, Color::Teal, Color::Orange, Color::Purple];

    /// The side this color belongs to. `None` for the wild sentinel.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Color::Red | Color::Yellow | Color::Green | Color::Blue => Some(Side::Light),
            Color::Pink | Color::Teal | Color::Orange | Color::Purple => Some(Side::Dark),
            Color::Wild => None,
        }
    }

    /// The fixed counterpart on the other side.
    ///
    /// ```
    /// use rust_flip::cards::Color;
    ///
    /// assert_eq!(Color::Red.counterpart(), Color::Pink);
    /// assert_eq!(Color::Pink.counterpart(), Color::Red);
    /// assert_eq!(Color::Wild.counterpart(), Color::Wild);
    /// ```
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Color::Red => Color::Pink,
            Color::Yellow => Color::Teal,
            Color::Green => Color::Orange,
            Color::Blue => Color::Purple,
            Color::Pink => Color::Red,
            Color::Teal => Color::Yellow,
            Color::Orange => Color::Green,
            Color::Purple => Color::Blue,
            Color::Wild => Color::Wild,
        }
    }

    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Color::Wild)
    }

    /// Check whether this color can be chosen for a wild on the given side.
    #[must_use]
    pub fn is_choosable_on(self, side: Side) -> bool {
        self.side() == Some(side)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Pink => "pink",
            Color::Teal => "teal",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::Wild => "wild",
        };
        f.write_str(name)
    }
}
