//! The table: everything the engine owns during a game.
//!
//! ## Contents
//!
//! - `GameState` scalars (phase, current seat, direction, skips, colors)
//! - `Deck` and `PlayPile`
//! - Seats (`Player`s with their hands and scores)
//! - The deterministic RNG used for every shuffle
//!
//! Card moves between deck, pile and hands are single operations here, so a
//! card is never in two places or in none.

use tracing::debug;

use super::history::Snapshot;
use crate::cards::Card;
use crate::core::{
    EngineError, EngineResult, GameRng, GameRngState, GameState, Hand, Player, PlayerId, PlayerMap,
};
use crate::rules::next_seat;
use crate::zones::{Deck, PlayPile};

/// A round's cards, dealt but not yet on the table.
#[derive(Debug)]
pub(crate) struct RoundDeal {
    deck: Deck,
    hands: Vec<Hand>,
    seed: Card,
    rng: GameRng,
}

/// Complete game state including private hands.
#[derive(Debug)]
pub struct Table {
    pub(crate) state: GameState,
    pub(crate) deck: Deck,
    pub(crate) pile: PlayPile,
    pub(crate) players: PlayerMap<Player>,
    rng: GameRng,
}

impl Table {
    pub(crate) fn new(players: PlayerMap<Player>, rng: GameRng) -> Self {
        Self {
            state: GameState::new(players.player_count()),
            deck: Deck::new(),
            pile: PlayPile::new(),
            players,
            rng,
        }
    }

    pub(crate) fn from_parts(
        state: GameState,
        deck: Deck,
        pile: PlayPile,
        players: PlayerMap<Player>,
        rng: GameRng,
    ) -> Self {
        Self {
            state,
            deck,
            pile,
            players,
            rng,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn pile(&self) -> &PlayPile {
        &self.pile
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The current match target.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.pile.top()
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.state.current]
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Whether `card` may be played on the pile right now.
    ///
    /// Besides the card-level color/type match, a wild on top accepts any
    /// card of its bound color, or anything at all when no color is bound
    /// (a wild turned face-up by a flip).
    #[must_use]
    pub fn is_legal(&self, card: &Card) -> bool {
        let Some(top) = self.top() else {
            return true;
        };
        if card.playable_on_top(top) {
            return true;
        }
        if top.is_wild() {
            return self.state.chosen_color.map_or(true, |color| card.color() == color);
        }
        false
    }

    // === Card Movement ===

    /// Move the top card of the deck into `player`'s hand, reshuffling the
    /// pile into the deck first if needed.
    ///
    /// Returns `None` when both the deck and the reshuffle source are empty.
    pub(crate) fn draw_for(&mut self, player: PlayerId) -> Option<Card> {
        let card = match self.deck.draw_card_from_deck() {
            Some(card) => card,
            None => {
                if !self.reshuffle() {
                    return None;
                }
                self.deck.draw_card_from_deck()?
            }
        };
        self.players[player].draw_card_to_hand(card);
        Some(card)
    }

    /// Move every pile card except the top into the deck and shuffle it.
    ///
    /// No-op returning false when the pile holds one card or none.
    pub(crate) fn reshuffle(&mut self) -> bool {
        let reclaimed = self.pile.take_under_top();
        if reclaimed.is_empty() {
            return false;
        }
        debug!(cards = reclaimed.len(), "reshuffling play pile into deck");
        self.deck.extend(reclaimed);
        self.deck.shuffle(&mut self.rng);
        true
    }

    /// Turn every card on the table to its other face.
    pub(crate) fn flip_all(&mut self) {
        self.deck.flip_all();
        self.pile.flip_all();
        for (_, player) in self.players.iter_mut() {
            for card in player.hand_mut().iter_mut() {
                card.flip();
            }
        }
        self.state.side = self.state.side.flipped();
        // A color bound to the old top no longer applies to the new face.
        self.state.chosen_color = None;
    }

    /// Pass the turn, consuming pending skips. Returns the new current seat.
    pub(crate) fn advance_turn(&mut self) -> PlayerId {
        let next = next_seat(
            self.state.current,
            self.state.direction,
            self.state.skip_count,
            self.player_count(),
        );
        self.state.current = next;
        self.state.skip_count = 0;
        next
    }

    // === Round Setup ===

    /// Deal a round from `staged` (or a fresh shuffled deck) and pick the
    /// first number card for the pile, without touching the table. On error
    /// nothing has changed, not even the RNG position.
    pub(crate) fn deal_round(
        &self,
        staged: Option<Deck>,
        hand_size: usize,
    ) -> EngineResult<RoundDeal> {
        let mut rng = self.rng.clone();
        let mut deck = match staged {
            Some(deck) => deck,
            None => Deck::standard(&mut rng),
        };

        let seats = self.player_count();
        let needed = hand_size * seats + 1;
        if deck.len() < needed {
            return Err(EngineError::InvalidConfig(format!(
                "deck holds {} cards, dealing needs at least {}",
                deck.len(),
                needed
            )));
        }

        let mut hands = vec![Hand::new(); seats];
        for _ in 0..hand_size {
            for hand in &mut hands {
                if let Some(card) = deck.draw_card_from_deck() {
                    hand.push_back(card);
                }
            }
        }

        if !deck.iter().any(|card| card.kind().is_number()) {
            return Err(EngineError::InvalidConfig(
                "deck has no number card to start the pile".into(),
            ));
        }

        let seed = loop {
            let card = deck.draw_card_from_deck().ok_or_else(|| {
                EngineError::InvalidConfig("deck ran out while seeding the pile".into())
            })?;
            if card.kind().is_number() {
                break card;
            }
            debug!(%card, "action card turned up while seeding the pile; reshuffling");
            deck.put_back(card);
            deck.shuffle(&mut rng);
        };

        Ok(RoundDeal {
            deck,
            hands,
            seed,
            rng,
        })
    }

    /// Install a deal from [`Table::deal_round`] and open the round.
    pub(crate) fn commit_round(&mut self, deal: RoundDeal, starter: PlayerId) -> Card {
        let RoundDeal {
            deck,
            hands,
            seed,
            rng,
        } = deal;

        for ((_, player), hand) in self.players.iter_mut().zip(hands) {
            player.replace_hand(hand);
        }
        self.pile.clear();
        self.pile.push(seed);
        self.deck = deck;
        self.rng = rng;
        self.state.begin_round(starter);
        seed
    }

    // === Snapshots ===

    /// Capture the minimal state set: scalars, deck, pile, hands and scores.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state.clone(),
            deck: self.deck.clone(),
            pile: self.pile.clone(),
            hands: self.players.map(|p| p.hand().clone()),
            scores: self.players.map(Player::score),
        }
    }

    /// Put the table back to a captured state.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        let Snapshot {
            state,
            deck,
            pile,
            hands,
            scores,
        } = snapshot;

        self.state = state;
        self.deck = deck;
        self.pile = pile;
        for (id, player) in self.players.iter_mut() {
            player.replace_hand(hands[id].clone());
            player.restore_score(scores[id]);
        }
    }
}
