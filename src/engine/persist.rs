//! Save and load.
//!
//! A save is a bincode blob of the configuration, the scalar state, the
//! players (names, kinds, hands, scores), deck, pile, both undo stacks and the
//! RNG position. Strategies are code, not data: computer seats come back with
//! the baseline policy at the configured delay. A pending AI turn is not
//! saved; loading schedules a fresh one if a computer seat is up.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::game::Engine;
use super::history::{Snapshot, UndoHistory};
use super::table::Table;
use crate::ai::BaselineStrategy;
use crate::core::{
    EngineConfig, EngineError, EngineResult, GameRng, GameRngState, GameState, Player, PlayerMap,
};
use crate::zones::{Deck, PlayPile};

/// Bumped whenever the layout below changes.
pub const SAVE_FORMAT_VERSION: u32 = 1;

// Field order is the wire order; keep both structs in step.
#[derive(Serialize)]
struct SavedGameRef<'a> {
    version: u32,
    config: &'a EngineConfig,
    state: &'a GameState,
    players: &'a PlayerMap<Player>,
    deck: &'a Deck,
    pile: &'a PlayPile,
    history: &'a UndoHistory,
    rng: GameRngState,
}

#[derive(Deserialize)]
struct SavedGame {
    version: u32,
    config: EngineConfig,
    state: GameState,
    players: PlayerMap<Player>,
    deck: Deck,
    pile: PlayPile,
    history: UndoHistory,
    rng: GameRngState,
}

impl Engine {
    /// Serialize the whole game.
    pub fn save(&self) -> EngineResult<Vec<u8>> {
        let table = self.table();
        let saved = SavedGameRef {
            version: SAVE_FORMAT_VERSION,
            config: self.config(),
            state: table.state(),
            players: table.players(),
            deck: table.deck(),
            pile: table.pile(),
            history: self.history(),
            rng: table.rng_state(),
        };
        Ok(bincode::serialize(&saved)?)
    }

    /// Rebuild an engine from `save` output. Observers must be registered
    /// again.
    pub fn load(bytes: &[u8]) -> EngineResult<Engine> {
        let saved: SavedGame = bincode::deserialize(bytes)?;
        if saved.version != SAVE_FORMAT_VERSION {
            return Err(EngineError::UnsupportedSave(saved.version));
        }
        let seats = saved.players.player_count();
        check_state(&saved.state, seats)?;
        for snapshot in saved.history.snapshots() {
            check_snapshot(snapshot, seats)?;
        }

        let mut players = saved.players;
        for (_, player) in players.iter_mut() {
            if player.is_ai() && player.strategy().is_none() {
                player.set_strategy(Box::new(BaselineStrategy::new(saved.config.ai_delay)));
            }
        }

        info!(
            players = players.player_count(),
            round = saved.state.round_number,
            phase = ?saved.state.phase,
            "game loaded"
        );

        let table = Table::from_parts(
            saved.state,
            saved.deck,
            saved.pile,
            players,
            GameRng::from_state(&saved.rng),
        );
        let mut engine = Engine::from_parts(saved.config, table, saved.history);
        engine.announce_loaded();
        Ok(engine)
    }
}

fn corrupt(what: String) -> EngineError {
    EngineError::InvalidConfig(format!("save is inconsistent: {what}"))
}

fn check_state(state: &GameState, seats: usize) -> EngineResult<()> {
    if state.player_count() != seats {
        return Err(corrupt(format!(
            "{seats} players but state expects {}",
            state.player_count()
        )));
    }
    let seated = [
        Some(state.current),
        Some(state.round_starter),
        state.round_winner,
        state.game_winner,
    ];
    if let Some(id) = seated.into_iter().flatten().find(|id| id.index() >= seats) {
        return Err(corrupt(format!("seat {id} does not exist")));
    }
    if let Some(color) = state.chosen_color {
        if !color.is_choosable_on(state.side) {
            return Err(corrupt(format!("{color} cannot be chosen on the {} side", state.side)));
        }
    }
    Ok(())
}

fn check_snapshot(snapshot: &Snapshot, seats: usize) -> EngineResult<()> {
    if snapshot.hands.player_count() != seats || snapshot.scores.player_count() != seats {
        return Err(corrupt(format!("history entry does not have {seats} seats")));
    }
    check_state(&snapshot.state, seats)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cards::Color;
    use crate::core::{Hand, Phase, PlayerId};
    use crate::engine::EngineBuilder;

    #[test]
    fn test_save_load_round_trip() {
        let mut engine = EngineBuilder::new()
            .config(EngineConfig::default().with_seed(7))
            .human("Ada")
            .human("Grace")
            .human("Linus")
            .build()
            .unwrap();
        engine.start_new_game().unwrap();
        engine.draw_card().unwrap();
        engine.draw_card().unwrap();

        let bytes = engine.save().unwrap();
        let loaded = Engine::load(&bytes).unwrap();

        assert_eq!(loaded.snapshot(), engine.snapshot());
        assert_eq!(loaded.config(), engine.config());
        assert_eq!(loaded.can_undo(), engine.can_undo());
        assert_eq!(loaded.table().rng_state(), engine.table().rng_state());
        for (id, player) in engine.players().iter() {
            assert_eq!(loaded.player(id).name(), player.name());
        }
    }

    #[test]
    fn test_load_reattaches_ai() {
        let mut engine = EngineBuilder::new()
            .config(EngineConfig::default().with_ai_delay(Duration::from_millis(3)))
            .human("Ada")
            .computer("Bot")
            .build()
            .unwrap();
        engine.start_new_game().unwrap();

        let loaded = Engine::load(&engine.save().unwrap()).unwrap();
        let bot = loaded.player(PlayerId::new(1));

        assert!(bot.is_ai());
        assert_eq!(bot.strategy().map(|s| s.delay()), Some(Duration::from_millis(3)));
        assert_eq!(loaded.phase(), Phase::AwaitingTurn);
    }

    #[test]
    fn test_load_rejects_garbage() {
        assert!(matches!(Engine::load(&[1, 2, 3]), Err(EngineError::Codec(_))));
    }

    fn two_humans() -> Engine {
        let mut engine = EngineBuilder::new().human("Ada").human("Grace").build().unwrap();
        engine.start_new_game().unwrap();
        engine
    }

    fn save_with(engine: &Engine, state: &GameState, history: &UndoHistory) -> Vec<u8> {
        let table = engine.table();
        bincode::serialize(&SavedGameRef {
            version: SAVE_FORMAT_VERSION,
            config: engine.config(),
            state,
            players: table.players(),
            deck: table.deck(),
            pile: table.pile(),
            history,
            rng: table.rng_state(),
        })
        .unwrap()
    }

    #[test]
    fn test_load_rejects_missing_seat() {
        let engine = two_humans();
        let mut state = engine.state().clone();
        state.current = PlayerId::new(5);

        let bytes = save_with(&engine, &state, engine.history());

        assert!(matches!(Engine::load(&bytes), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_rejects_off_palette_color() {
        let engine = two_humans();
        let mut state = engine.state().clone();
        state.chosen_color = Some(Color::Pink);

        let bytes = save_with(&engine, &state, engine.history());

        assert!(matches!(Engine::load(&bytes), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_load_rejects_history_with_wrong_seat_count() {
        let engine = two_humans();
        let mut snapshot = engine.snapshot();
        snapshot.hands = PlayerMap::with_value(3, Hand::new());
        let mut history = UndoHistory::new(4);
        history.record(snapshot);

        let bytes = save_with(&engine, engine.state(), &history);

        assert!(matches!(Engine::load(&bytes), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_consistent_save_passes_checks() {
        let mut engine = two_humans();
        engine.draw_card().unwrap();

        let bytes = save_with(&engine, engine.state(), engine.history());

        assert!(Engine::load(&bytes).is_ok());
    }
}
