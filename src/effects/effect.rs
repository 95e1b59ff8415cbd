//! Effect definitions.
//!
//! Each card face maps to exactly one `Effect`. The effect is a plain value;
//! `EffectResolver` is what applies it to the table.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardType};
use crate::core::PlayerId;

/// What a face does when it is played.
///
/// ## Turn Effects
///
/// - `Reverse`: flip the play direction
/// - `SkipNext` / `SkipEveryone`: add pending skips
///
/// ## Draw Effects
///
/// - `Draw`: the next player draws `count` and loses their turn
///
/// ## Table Effects
///
/// - `Flip`: every card on the table turns to its other face
///
/// ## Wild Effects
///
/// These wait for a color before they resolve.
/// - `ChooseColor`: only binds the color
/// - `ChooseColorThenDraw`: next player draws `count` and loses their turn
/// - `ChooseColorThenDrawUntilMatch`: next player draws until a card of the
///   chosen color shows up, then loses their turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    None,
    Reverse,
    SkipNext,
    SkipEveryone,
    Draw { count: usize },
    Flip,
    ChooseColor,
    ChooseColorThenDraw { count: usize },
    ChooseColorThenDrawUntilMatch,
}

impl Effect {
    /// The effect printed on a face of the given type.
    #[must_use]
    pub const fn for_type(kind: CardType) -> Self {
        match kind {
            CardType::Number(_) => Effect::None,
            CardType::Reverse => Effect::Reverse,
            CardType::Skip => Effect::SkipNext,
            CardType::SkipEveryone => Effect::SkipEveryone,
            CardType::DrawOne => Effect::Draw { count: 1 },
            CardType::DrawFive => Effect::Draw { count: 5 },
            CardType::Flip => Effect::Flip,
            CardType::Wild => Effect::ChooseColor,
            CardType::WildDrawTwo => Effect::ChooseColorThenDraw { count: 2 },
            CardType::WildDrawColor => Effect::ChooseColorThenDrawUntilMatch,
        }
    }

    /// Whether the effect needs a chosen color before it can resolve.
    #[must_use]
    pub const fn needs_color(self) -> bool {
        matches!(
            self,
            Effect::ChooseColor
                | Effect::ChooseColorThenDraw { .. }
                | Effect::ChooseColorThenDrawUntilMatch
        )
    }

    /// Whether the effect makes another player draw.
    #[must_use]
    pub const fn forces_draw(self) -> bool {
        matches!(
            self,
            Effect::Draw { .. }
                | Effect::ChooseColorThenDraw { .. }
                | Effect::ChooseColorThenDrawUntilMatch
        )
    }
}

/// What resolving an effect actually did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    /// Player forced to draw, if any.
    pub target: Option<PlayerId>,

    /// Cards the target received, in draw order. Kept even when the draw
    /// ran out part-way.
    pub drawn: SmallVec<[Card; 5]>,

    /// Draw pile and reshuffle source both ran dry mid-effect.
    pub exhausted: bool,
}

impl EffectOutcome {
    /// True unless the effect was cut short by an empty deck.
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.exhausted
    }
}
