//! Player identification, per-player storage and the `Player` record.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are 0-based; hand positions are 1-based.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//!
//! ## Player
//!
//! Name, hand, score and an optional AI delegate.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{EngineError, EngineResult};
use crate::ai::AiStrategy;
use crate::cards::Card;

/// Seat identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_flip::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use rust_flip::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<u32> = PlayerMap::with_value(3, 0);
/// scores[PlayerId::new(1)] += 40;
/// assert_eq!(scores[PlayerId::new(1)], 40);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Build a map from an existing vector, one entry per seat.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Build a new map by projecting every entry.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A player's hand. Persistent vector so snapshots share structure.
pub type Hand = Vector<Card>;

/// Who makes decisions for a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Computer,
}

/// A seat at the table.
///
/// Owns the hand and the running score. Computer seats carry an
/// `AiStrategy`; the strategy itself is never serialized.
#[derive(Debug, Serialize, Deserialize)]
pub struct Player {
    name: String,
    hand: Hand,
    score: u32,
    kind: PlayerKind,
    #[serde(skip)]
    strategy: Option<Box<dyn AiStrategy>>,
}

impl Player {
    /// A human-controlled player.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            score: 0,
            kind: PlayerKind::Human,
            strategy: None,
        }
    }

    /// A computer-controlled player driven by `strategy`.
    pub fn computer(name: impl Into<String>, strategy: Box<dyn AiStrategy>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
            score: 0,
            kind: PlayerKind::Computer,
            strategy: Some(strategy),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    #[must_use]
    pub fn is_ai(&self) -> bool {
        self.kind == PlayerKind::Computer
    }

    #[must_use]
    pub fn strategy(&self) -> Option<&dyn AiStrategy> {
        self.strategy.as_deref()
    }

    pub fn strategy_mut(&mut self) -> Option<&mut (dyn AiStrategy + 'static)> {
        self.strategy.as_deref_mut()
    }

    /// Attach a strategy, turning this seat into a computer seat.
    pub fn set_strategy(&mut self, strategy: Box<dyn AiStrategy>) {
        self.kind = PlayerKind::Computer;
        self.strategy = Some(strategy);
    }

    // === Hand ===

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Add a card to the end of the hand.
    pub fn draw_card_to_hand(&mut self, card: Card) {
        self.hand.push_back(card);
    }

    /// Look at the card at 1-based `index`.
    pub fn get_card_in_hand(&self, index: usize) -> EngineResult<&Card> {
        let pos = self.position(index)?;
        Ok(&self.hand[pos])
    }

    /// Remove and return the card at 1-based `index`.
    pub fn remove_card(&mut self, index: usize) -> EngineResult<Card> {
        let pos = self.position(index)?;
        Ok(self.hand.remove(pos))
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }

    /// Replace the whole hand (used when restoring a snapshot).
    pub fn replace_hand(&mut self, hand: Hand) {
        self.hand = hand;
    }

    /// Sum of the active-side point values of the cards in hand.
    #[must_use]
    pub fn hand_value(&self) -> u32 {
        self.hand.iter().map(Card::points).sum()
    }

    pub(crate) fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    fn position(&self, index: usize) -> EngineResult<usize> {
        if index == 0 || index > self.hand.len() {
            return Err(EngineError::HandIndexOutOfRange {
                index,
                len: self.hand.len(),
            });
        }
        Ok(index - 1)
    }

    // === Score ===

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add points. Scores only grow during a game.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn reset_score(&mut self) {
        self.score = 0;
    }

    pub(crate) fn restore_score(&mut self, score: u32) {
        self.score = score;
    }
}
