//! The game engine.
//!
//! `Engine` owns the table and drives the turn state machine:
//!
//! ```text
//! RoundSetup -> AwaitingTurn <-> AwaitingColorSelection
//!                    |
//!                    v
//!               RoundOver -> GameOver
//! ```
//!
//! Every mutating operation first records an undo snapshot and moves the
//! AI epoch forward, then mutates, then emits events. Rejected requests
//! return an `EngineError`, emit a `Status` event and change nothing.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::event::{Affordances, EventBus, EventKind, Observer};
use super::history::{Snapshot, UndoHistory};
use super::table::Table;
use crate::ai::{
    AiStrategy, AiTurnOutcome, BaselineStrategy, CardChoice, ScheduledAiTurn, TableView, TurnToken,
};
use crate::cards::{Card, Color, Side};
use crate::core::{
    Direction, EngineConfig, EngineError, EngineResult, GameRng, GameState, Phase, Player,
    PlayerId, PlayerMap,
};
use crate::effects::{Effect, EffectOutcome, EffectResolver};
use crate::rules::{next_in_line, score_round, RoundScore};
use crate::zones::Deck;

/// Result of an accepted play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The card's effect resolved and the turn passed to `next`.
    Resolved {
        card: Card,
        effect: EffectOutcome,
        next: PlayerId,
    },
    /// A wild is on the pile; `complete_color_selection` finishes the play.
    AwaitingColor { card: Card },
    /// The play emptied the player's hand.
    RoundWon { card: Card, score: RoundScore },
}

/// Result of a voluntary draw. The turn passes either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    Drew { card: Card, next: PlayerId },
    /// Deck and reshuffle source were both empty.
    Exhausted { next: PlayerId },
}

/// What the AI decided, computed before any mutation.
enum AiDecision {
    Play { index: usize, color: Option<Color> },
    Draw,
    Color(Color),
}

#[derive(Debug)]
enum Seat {
    Human(String),
    Computer(String, Option<Box<dyn AiStrategy>>),
}

/// Builder for an `Engine`.
///
/// ```
/// use rust_flip::engine::EngineBuilder;
/// use rust_flip::core::Phase;
///
/// let mut engine = EngineBuilder::new().human("Ada").computer("Bot").build().unwrap();
/// assert_eq!(engine.phase(), Phase::RoundSetup);
///
/// engine.start_new_game().unwrap();
/// assert_eq!(engine.phase(), Phase::AwaitingTurn);
/// assert_eq!(engine.player(engine.current_player()).hand_size(), 7);
/// ```
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    seats: Vec<Seat>,
    staged_deck: Option<Deck>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a human seat.
    pub fn human(mut self, name: impl Into<String>) -> Self {
        self.seats.push(Seat::Human(name.into()));
        self
    }

    /// Add a computer seat using the baseline policy at the configured delay.
    pub fn computer(mut self, name: impl Into<String>) -> Self {
        self.seats.push(Seat::Computer(name.into(), None));
        self
    }

    /// Add a computer seat with its own strategy.
    pub fn computer_with(mut self, name: impl Into<String>, strategy: Box<dyn AiStrategy>) -> Self {
        self.seats.push(Seat::Computer(name.into(), Some(strategy)));
        self
    }

    /// Deal the first round from `deck` instead of a shuffled standard deck.
    pub fn staged_deck(mut self, deck: Deck) -> Self {
        self.staged_deck = Some(deck);
        self
    }

    /// Validate the configuration and create the engine in `RoundSetup`.
    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate(self.seats.len())?;

        let ai_delay = self.config.ai_delay;
        let players: Vec<Player> = self
            .seats
            .into_iter()
            .map(|seat| match seat {
                Seat::Human(name) => Player::human(name),
                Seat::Computer(name, strategy) => Player::computer(
                    name,
                    strategy.unwrap_or_else(|| {
                        Box::new(BaselineStrategy::new(ai_delay)) as Box<dyn AiStrategy>
                    }),
                ),
            })
            .collect();

        let table = Table::new(PlayerMap::from_vec(players), GameRng::new(self.config.seed));
        let history = UndoHistory::new(self.config.undo_depth);
        let mut engine = Engine::from_parts(self.config, table, history);
        engine.staged_deck = self.staged_deck;
        Ok(engine)
    }
}

/// Matching card game engine.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    table: Table,
    history: UndoHistory,
    bus: EventBus,
    /// Bumped on every mutation; AI tokens from older epochs are stale.
    epoch: u64,
    pending_ai: Option<ScheduledAiTurn>,
    staged_deck: Option<Deck>,
}

impl Engine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub(crate) fn from_parts(config: EngineConfig, table: Table, history: UndoHistory) -> Self {
        Self {
            config,
            table,
            history,
            bus: EventBus::default(),
            epoch: 0,
            pending_ai: None,
            staged_deck: None,
        }
    }

    pub(crate) fn history(&self) -> &UndoHistory {
        &self.history
    }

    // === Observers ===

    pub fn register_observer(&mut self, observer: impl Observer + 'static) {
        self.bus.register(Box::new(observer));
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.table.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.table.state.phase
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.table.state.current
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.table.players[id]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.table.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.table.player_count()
    }

    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.table.top().copied()
    }

    #[must_use]
    pub fn chosen_color(&self) -> Option<Color> {
        self.table.state.chosen_color
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.table.state.direction
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.table.state.side
    }

    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.table.players.map(Player::score)
    }

    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.table.deck.len()
    }

    #[must_use]
    pub fn pile_size(&self) -> usize {
        self.table.pile.len()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Independent copy of the current table state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.table.snapshot()
    }

    /// Read-only view, as handed to strategies.
    #[must_use]
    pub fn view(&self) -> TableView<'_> {
        TableView::new(&self.table)
    }

    /// Whether the current player's card at 1-based `index` may be played.
    #[must_use]
    pub fn is_playable(&self, index: usize) -> bool {
        self.table.state.phase == Phase::AwaitingTurn
            && self.table.players[self.table.state.current]
                .get_card_in_hand(index)
                .map_or(false, |card| self.table.is_legal(card))
    }

    // === Setup ===

    /// Use `deck` for the next round dealt instead of a shuffled one. A deck
    /// that cannot be dealt stays staged until it is replaced.
    pub fn stage_deck(&mut self, deck: Deck) {
        self.staged_deck = Some(deck);
    }

    /// Replace a seat's strategy (making it a computer seat).
    pub fn set_strategy(&mut self, player: PlayerId, strategy: Box<dyn AiStrategy>) {
        self.table.players[player].set_strategy(strategy);
        self.touch();
        self.schedule_ai();
    }

    /// Change a computer seat's thinking delay. Returns false for humans.
    ///
    /// A turn already pending for that seat keeps its token and start time
    /// and becomes due after the new delay.
    pub fn set_ai_delay(&mut self, player: PlayerId, delay: Duration) -> bool {
        let Some(strategy) = self.table.players[player].strategy_mut() else {
            return false;
        };
        strategy.set_delay(delay);
        if let Some(turn) = self.pending_ai.as_mut().filter(|turn| turn.player == player) {
            debug!(player = %player, ?delay, "pending AI turn rescheduled");
            turn.delay = delay;
        }
        true
    }

    // === Game Flow ===

    /// Reset all scores and deal the first round. Valid in any phase.
    ///
    /// If the round cannot be dealt the game is left exactly as it was.
    pub fn start_new_game(&mut self) -> EngineResult<()> {
        self.begin_round(PlayerId::new(0), true)
    }

    /// Deal the next round. Only valid after a round ended without a game
    /// winner.
    pub fn start_new_round(&mut self) -> EngineResult<()> {
        self.expect_phase(Phase::RoundOver)?;
        let starter = next_in_line(
            self.table.state.round_starter,
            Direction::Clockwise,
            self.table.player_count(),
        );
        self.begin_round(starter, false)
    }

    fn begin_round(&mut self, starter: PlayerId, new_game: bool) -> EngineResult<()> {
        let deal = match self.table.deal_round(self.staged_deck.clone(), self.config.hand_size) {
            Ok(deal) => deal,
            Err(err) => return self.reject(err),
        };

        self.staged_deck = None;
        self.touch();
        self.history.clear();
        if new_game {
            for (_, player) in self.table.players.iter_mut() {
                player.reset_score();
            }
            self.table.state = GameState::new(self.table.player_count());
            info!(players = self.table.player_count(), "new game");
        }
        let seed = self.table.commit_round(deal, starter);

        let round = self.table.state.round_number;
        info!(round, %starter, %seed, "round started");
        self.bus.set_card(seed);
        self.bus.set_message(format!(
            "Round {round} begins with {seed}; {} goes first",
            self.table.players[starter].name()
        ));
        self.emit(EventKind::RoundStarted);
        self.schedule_ai();
        Ok(())
    }

    // === Player Actions ===

    /// Play the current player's card at 1-based `index`.
    pub fn play_card(&mut self, index: usize) -> EngineResult<PlayOutcome> {
        self.play(index, None)
    }

    /// Draw one card for the current player; their turn ends.
    pub fn draw_card(&mut self) -> EngineResult<DrawOutcome> {
        self.expect_phase(Phase::AwaitingTurn)?;
        self.checkpoint();

        let current = self.table.state.current;
        let drawn = self.table.draw_for(current);
        let name = self.table.players[current].name().to_owned();
        match drawn {
            Some(card) => {
                debug!(player = %current, %card, "card drawn");
                self.bus.set_card(card);
                self.bus.set_message(format!("{name} draws a card"));
                self.emit(EventKind::CardDrawn);
            }
            None => {
                warn!(player = %current, "nothing left to draw");
                self.status(format!("No cards left to draw; {name} passes"));
            }
        }

        let next = self.pass_turn();
        Ok(match drawn {
            Some(card) => DrawOutcome::Drew { card, next },
            None => DrawOutcome::Exhausted { next },
        })
    }

    /// Supply the color for the wild on top of the pile.
    pub fn complete_color_selection(&mut self, color: Color) -> EngineResult<PlayOutcome> {
        self.expect_phase(Phase::AwaitingColorSelection)?;
        self.check_color(color)?;
        let Some(card) = self.table.top().copied() else {
            return self.reject(EngineError::WrongPhase {
                expected: Phase::AwaitingColorSelection,
                actual: Phase::RoundSetup,
            });
        };

        self.checkpoint();
        self.table.state.phase = Phase::AwaitingTurn;
        Ok(self.bind_color_and_resolve(card, color))
    }

    fn play(&mut self, index: usize, preset: Option<Color>) -> EngineResult<PlayOutcome> {
        self.expect_phase(Phase::AwaitingTurn)?;

        let current = self.table.state.current;
        let card = match self.table.players[current].get_card_in_hand(index) {
            Ok(card) => *card,
            Err(err) => return self.reject(err),
        };
        if let Some(&top) = self.table.top() {
            if !self.table.is_legal(&card) {
                return self.reject(EngineError::IllegalMove { card, top });
            }
        }
        if let Some(color) = preset {
            self.check_color(color)?;
        }

        self.checkpoint();
        let card = self.table.players[current].remove_card(index)?;
        self.table.pile.push(card);
        self.table.state.chosen_color = None;
        debug!(player = %current, %card, "card played");

        let name = self.table.players[current].name().to_owned();
        if self.table.players[current].hand_size() == 0 {
            self.bus.set_card(card);
            self.bus.set_message(format!("{name} plays {card}, their last card"));
            self.emit(EventKind::CardPlayed);
            return Ok(self.finish_round(current, card));
        }

        let effect = card.effect();
        if effect.needs_color() && preset.is_none() {
            self.table.state.phase = Phase::AwaitingColorSelection;
            self.bus.set_card(card);
            self.bus.set_affordances(Affordances::choose_color());
            self.bus.set_message(format!("{name} plays {card}; choose a color"));
            self.emit(EventKind::ColorRequested);
            return Ok(PlayOutcome::AwaitingColor { card });
        }

        self.bus.set_card(card);
        self.bus.set_message(format!("{name} plays {card}"));
        self.emit(EventKind::CardPlayed);

        match preset {
            Some(color) if effect.needs_color() => Ok(self.bind_color_and_resolve(card, color)),
            _ => Ok(self.resolve_and_advance(card, effect)),
        }
    }

    fn bind_color_and_resolve(&mut self, card: Card, color: Color) -> PlayOutcome {
        self.table.state.chosen_color = Some(color);
        debug!(%color, "wild color chosen");
        self.bus.set_card(card);
        self.bus.set_message(format!("Color is now {color}"));
        self.emit(EventKind::ColorChosen);
        self.resolve_and_advance(card, card.effect())
    }

    fn resolve_and_advance(&mut self, card: Card, effect: Effect) -> PlayOutcome {
        let actor = self.table.state.current;
        let outcome = EffectResolver::resolve(&mut self.table, effect);
        self.report_effect(actor, effect, &outcome);
        let next = self.pass_turn();
        PlayOutcome::Resolved {
            card,
            effect: outcome,
            next,
        }
    }

    fn report_effect(&mut self, actor: PlayerId, effect: Effect, outcome: &EffectOutcome) {
        let player_count = self.table.player_count();
        match effect {
            Effect::Reverse => {
                let direction = match self.table.state.direction {
                    Direction::Clockwise => "clockwise",
                    Direction::CounterClockwise => "counter-clockwise",
                };
                self.bus.set_message(format!("Play now goes {direction}"));
                self.emit(EventKind::DirectionChanged);
            }
            Effect::SkipNext => {
                let skipped = next_in_line(actor, self.table.state.direction, player_count);
                self.bus
                    .set_message(format!("{} is skipped", self.table.players[skipped].name()));
                self.emit(EventKind::TurnSkipped);
            }
            Effect::SkipEveryone => {
                self.bus.set_message("Everyone else is skipped");
                self.emit(EventKind::TurnSkipped);
            }
            Effect::Flip => {
                self.bus
                    .set_message(format!("The table flips to the {} side", self.table.state.side));
                self.emit(EventKind::TableFlipped);
            }
            _ if effect.forces_draw() => {
                if let Some(target) = outcome.target {
                    self.bus.set_message(format!(
                        "{} draws {} and loses their turn",
                        self.table.players[target].name(),
                        outcome.drawn.len()
                    ));
                    self.emit(EventKind::CardsForced);
                }
                if outcome.exhausted {
                    self.status(format!(
                        "Draw pile exhausted after {} cards",
                        outcome.drawn.len()
                    ));
                }
            }
            _ => {}
        }
    }

    fn pass_turn(&mut self) -> PlayerId {
        let next = self.table.advance_turn();
        self.bus
            .set_message(format!("{}'s turn", self.table.players[next].name()));
        self.emit(EventKind::TurnChanged);
        self.schedule_ai();
        next
    }

    fn finish_round(&mut self, winner: PlayerId, card: Card) -> PlayOutcome {
        let score = score_round(&mut self.table.players, winner, self.config.target_score);
        let name = self.table.players[winner].name().to_owned();

        self.table.state.round_winner = Some(winner);
        self.table.state.phase = Phase::RoundOver;
        info!(%winner, points = score.points, total = score.total, "round over");
        self.bus.set_message(format!(
            "{name} wins the round and scores {} points ({} total)",
            score.points, score.total
        ));
        if !score.game_over {
            self.bus.set_affordances(Affordances::new_round());
        }
        self.emit(EventKind::RoundOver);

        if score.game_over {
            self.table.state.phase = Phase::GameOver;
            self.table.state.game_winner = Some(winner);
            info!(%winner, total = score.total, "game over");
            self.bus
                .set_message(format!("{name} wins the game with {} points", score.total));
            self.bus.set_affordances(Affordances::new_game());
            self.emit(EventKind::GameOver);
        }

        PlayOutcome::RoundWon { card, score }
    }

    // === Undo / Redo ===

    pub fn undo(&mut self) -> EngineResult<()> {
        let current = self.table.snapshot();
        let Some(previous) = self.history.undo(current) else {
            return self.reject(EngineError::NothingToUndo);
        };
        self.table.restore(previous);
        self.touch();
        debug!(undo = self.history.undo_len(), redo = self.history.redo_len(), "undo");

        self.bus.set_message("Undid the last action");
        self.bus.set_affordances(phase_affordances(self.table.state.phase));
        self.emit(EventKind::Undone);
        self.schedule_ai();
        Ok(())
    }

    pub fn redo(&mut self) -> EngineResult<()> {
        let current = self.table.snapshot();
        let Some(next) = self.history.redo(current) else {
            return self.reject(EngineError::NothingToRedo);
        };
        self.table.restore(next);
        self.touch();
        debug!(undo = self.history.undo_len(), redo = self.history.redo_len(), "redo");

        self.bus.set_message("Redid the last undone action");
        self.bus.set_affordances(phase_affordances(self.table.state.phase));
        self.emit(EventKind::Redone);
        self.schedule_ai();
        Ok(())
    }

    // === AI Pacing ===

    /// The computer turn waiting to fire, if any.
    #[must_use]
    pub fn pending_ai_turn(&self) -> Option<ScheduledAiTurn> {
        self.pending_ai
    }

    /// Fire a scheduled computer turn. Stale tokens do nothing.
    pub fn run_ai_turn(&mut self, token: TurnToken) -> EngineResult<AiTurnOutcome> {
        let fresh = token.epoch() == self.epoch
            && self.pending_ai.map_or(false, |turn| turn.token == token);
        if !fresh {
            debug!(token = token.epoch(), epoch = self.epoch, "ignoring stale AI turn");
            return Ok(AiTurnOutcome::Stale);
        }
        self.pending_ai = None;

        match self.decide_ai()? {
            AiDecision::Color(color) => {
                self.complete_color_selection(color)?;
                Ok(AiTurnOutcome::ChoseColor(color))
            }
            AiDecision::Draw => Ok(AiTurnOutcome::Drew(self.draw_card()?)),
            AiDecision::Play { index, color } => {
                Ok(AiTurnOutcome::Played(self.play(index, color)?))
            }
        }
    }

    /// Fire the pending computer turn if it is due at `now`.
    pub fn tick(&mut self, now: Instant) -> EngineResult<Option<AiTurnOutcome>> {
        match self.pending_ai {
            Some(turn) if turn.is_due(now) => self.run_ai_turn(turn.token).map(Some),
            _ => Ok(None),
        }
    }

    /// Fire pending computer turns back-to-back, ignoring delays, until a
    /// human is up, the round ends, or `max_turns` have run.
    pub fn drive_ai(&mut self, max_turns: usize) -> EngineResult<usize> {
        let mut fired = 0;
        while fired < max_turns {
            let Some(turn) = self.pending_ai else {
                break;
            };
            self.run_ai_turn(turn.token)?;
            fired += 1;
        }
        Ok(fired)
    }

    fn decide_ai(&self) -> EngineResult<AiDecision> {
        let id = self.table.state.current;
        let player = &self.table.players[id];
        let strategy = player.strategy().ok_or(EngineError::NotAiTurn)?;
        let side = self.table.state.side;

        if self.table.state.color_selection_pending() {
            let color = checked_ai_color(strategy.choose_wild_color(player, side), side);
            return Ok(AiDecision::Color(color));
        }

        let Some(top) = self.table.top() else {
            return Ok(AiDecision::Draw);
        };
        let view = TableView::new(&self.table);
        let decision = match strategy.choose_card(player, top, &view) {
            CardChoice::Draw => AiDecision::Draw,
            CardChoice::Play(index) => match player.get_card_in_hand(index) {
                Ok(card) if self.table.is_legal(card) => AiDecision::Play {
                    index,
                    color: card
                        .is_wild()
                        .then(|| checked_ai_color(strategy.choose_wild_color(player, side), side)),
                },
                _ => {
                    warn!(
                        player = %id,
                        index,
                        "strategy chose an unplayable card; drawing instead"
                    );
                    AiDecision::Draw
                }
            },
        };
        Ok(decision)
    }

    fn schedule_ai(&mut self) {
        if !self.table.state.phase.is_round_active() {
            return;
        }
        let id = self.table.state.current;
        let player = &self.table.players[id];
        let Some(strategy) = player.strategy() else {
            return;
        };

        let turn = ScheduledAiTurn {
            token: TurnToken(self.epoch),
            player: id,
            delay: strategy.delay(),
            scheduled_at: Instant::now(),
        };
        let message = format!("{} is thinking", player.name());
        debug!(player = %id, delay = ?turn.delay, epoch = self.epoch, "AI turn scheduled");

        self.pending_ai = Some(turn);
        self.bus.set_message(message);
        self.emit(EventKind::AiThinking);
    }

    // === Internals ===

    /// Record the pre-action state and invalidate outstanding AI tokens.
    fn checkpoint(&mut self) {
        let snapshot = self.table.snapshot();
        self.history.record(snapshot);
        self.touch();
    }

    fn touch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending_ai = None;
    }

    fn emit(&mut self, kind: EventKind) {
        self.bus.emit(kind, &self.table.state);
    }

    fn status(&mut self, message: impl Into<String>) {
        self.bus.status(message, &self.table.state);
    }

    fn reject<T>(&mut self, err: EngineError) -> EngineResult<T> {
        debug!(error = %err, "request rejected");
        self.status(err.to_string());
        Err(err)
    }

    fn expect_phase(&mut self, expected: Phase) -> EngineResult<()> {
        let actual = self.table.state.phase;
        if actual != expected {
            return self.reject(EngineError::WrongPhase { expected, actual });
        }
        Ok(())
    }

    fn check_color(&mut self, color: Color) -> EngineResult<()> {
        let side = self.table.state.side;
        if !color.is_choosable_on(side) {
            return self.reject(EngineError::InvalidColor { color, side });
        }
        Ok(())
    }

    pub(crate) fn announce_loaded(&mut self) {
        self.touch();
        self.bus.set_message("Game loaded");
        self.bus.set_affordances(phase_affordances(self.table.state.phase));
        self.emit(EventKind::GameLoaded);
        self.schedule_ai();
    }
}

/// What a front end should offer in `phase`.
fn phase_affordances(phase: Phase) -> Affordances {
    match phase {
        Phase::AwaitingColorSelection => Affordances::choose_color(),
        Phase::RoundOver => Affordances::new_round(),
        Phase::GameOver => Affordances::new_game(),
        Phase::RoundSetup | Phase::AwaitingTurn => Affordances::default(),
    }
}

fn checked_ai_color(color: Color, side: Side) -> Color {
    if color.is_choosable_on(side) {
        color
    } else {
        warn!(%color, %side, "strategy named a color off the active palette");
        side.default_color()
    }
}
