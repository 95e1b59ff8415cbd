//! Card types and their scoring values.

use serde::{Deserialize, Serialize};

/// The type printed on one face of a card.
///
/// Light faces use `DrawOne`, `Skip` and `WildDrawTwo`; dark faces use the
/// harsher `DrawFive`, `SkipEveryone` and `WildDrawColor`. The remaining
/// types appear on both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Number card, 1 through 9.
    Number(u8),
    DrawOne,
    DrawFive,
    Reverse,
    Skip,
    SkipEveryone,
    Flip,
    Wild,
    WildDrawTwo,
    WildDrawColor,
}

impl CardType {
    /// Point value counted against a player still holding this card.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            CardType::Number(n) => n as u32,
            CardType::DrawOne => 10,
            CardType::DrawFive => 20,
            CardType::Reverse => 20,
            CardType::Skip => 20,
            CardType::SkipEveryone => 30,
            CardType::Flip => 20,
            CardType::Wild => 40,
            CardType::WildDrawTwo => 50,
            CardType::WildDrawColor => 60,
        }
    }

    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self, CardType::Number(_))
    }

    /// Wild family: always playable, asks for a color.
    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, CardType::Wild | CardType::WildDrawTwo | CardType::WildDrawColor)
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardType::Number(n) => write!(f, "{n}"),
            CardType::DrawOne => f.write_str("draw one"),
            CardType::DrawFive => f.write_str("draw five"),
            CardType::Reverse => f.write_str("reverse"),
            CardType::Skip => f.write_str("skip"),
            CardType::SkipEveryone => f.write_str("skip everyone"),
            CardType::Flip => f.write_str("flip"),
            CardType::Wild => f.write_str("wild"),
            CardType::WildDrawTwo => f.write_str("wild draw two"),
            CardType::WildDrawColor => f.write_str("wild draw color"),
        }
    }
}
