//! Effect system for card actions.
//!
//! - `Effect`: what a face does, derived from its `CardType`
//! - `EffectOutcome`: what resolving it actually did
//! - `EffectResolver`: applies effects to the table
//!
//! Splitting "what" from "apply" keeps cards as plain `Copy` values while the
//! table owns all mutation.

mod effect;
mod resolver;

pub use effect::{Effect, EffectOutcome};
pub use resolver::EffectResolver;
