//! Card system: colors, types and dual-sided cards.
//!
//! ## Key Types
//!
//! - `Color` / `Side`: the two palettes and the wild sentinel
//! - `CardType`: number, action and wild types with point values
//! - `Face`: one printed side (color + type)
//! - `Card`: light face + dark face + active-side flag
//!
//! Cards never change identity during a round. The global flip effect only
//! toggles which face every card reports.

pub mod card;
pub mod color;
pub mod kind;

pub use card::{Card, Face};
pub use color::{Color, Side};
pub use kind::CardType;
