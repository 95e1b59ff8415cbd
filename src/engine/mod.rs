//! The engine: table state, turn flow, history, events and persistence.
//!
//! - `Table`: owned state (scalars, deck, pile, seats, RNG)
//! - `Engine` / `EngineBuilder`: the public game API
//! - `UndoHistory` / `Snapshot`: bounded undo and redo
//! - `Event` / `Observer`: post-mutation notifications
//! - `Engine::save` / `Engine::load`: bincode save blobs

mod event;
mod game;
mod history;
mod persist;
mod table;

pub use event::{Affordances, Event, EventKind, Observer, TracingObserver};
pub use game::{DrawOutcome, Engine, EngineBuilder, PlayOutcome};
pub use history::{Snapshot, UndoHistory};
pub use persist::SAVE_FORMAT_VERSION;
pub use table::Table;
