//! Undo/redo history.
//!
//! A `Snapshot` is the minimal state set needed to put the table back: the
//! scalar `GameState`, the deck, the pile, every hand and every score. Card
//! collections are `im::Vector`s, so cloning one shares structure with the
//! live table and later mutations never reach back into a stored snapshot.
//!
//! Any mutating action records a snapshot and clears the redo stack. Both
//! stacks are bounded; the oldest entries are dropped first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Hand, PlayerMap};
use crate::zones::{Deck, PlayPile};

/// Restorable copy of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub deck: Deck,
    pub pile: PlayPile,
    pub hands: PlayerMap<Hand>,
    pub scores: PlayerMap<u32>,
}

/// Bounded undo and redo stacks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoHistory {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
    depth: usize,
}

impl UndoHistory {
    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            depth,
        }
    }

    /// Store the state as it was before a new action. Clears redo.
    pub fn record(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.undo, snapshot, self.depth);
        self.redo.clear();
    }

    /// Step back. `current` moves to the redo stack.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        push_bounded(&mut self.redo, current, self.depth);
        Some(previous)
    }

    /// Step forward again. `current` moves to the undo stack.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop_back()?;
        push_bounded(&mut self.undo, current, self.depth);
        Some(next)
    }

    /// Every stored snapshot, undo stack first.
    pub(crate) fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.undo.iter().chain(self.redo.iter())
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot, depth: usize) {
    if depth == 0 {
        return;
    }
    if stack.len() == depth {
        stack.pop_front();
    }
    stack.push_back(snapshot);
}
