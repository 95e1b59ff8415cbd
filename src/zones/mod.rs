//! Card locations shared by the whole table.
//!
//! - `Deck`: the draw pile, built from the fixed recipe
//! - `PlayPile`: played cards, top is the current match target
//!
//! Hands live on `Player`. A card is always in exactly one of these places.

mod deck;
mod pile;

pub use deck::{Deck, STANDARD_DECK_SIZE};
pub use pile::PlayPile;
