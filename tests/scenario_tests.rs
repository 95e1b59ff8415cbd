//! Staged-deck gameplay scenarios.
//!
//! Each test deals a known deck so the exact cards in every hand are fixed,
//! then walks through a short sequence of turns.

mod common;

use common::*;
use rust_flip::cards::{CardType, Color, Side};
use rust_flip::core::{Direction, EngineConfig, EngineError, Phase, PlayerId};
use rust_flip::engine::{DrawOutcome, EventKind, PlayOutcome};
use rust_flip::rules::RoundScore;
use rust_flip::zones::Deck;

const P0: PlayerId = PlayerId(0);
const P1: PlayerId = PlayerId(1);
const P2: PlayerId = PlayerId(2);

#[test]
fn test_matching_play_accepted_and_mismatch_rejected() {
    let mut engine = staged(
        vec![
            padded(vec![number(Color::Red, 3), number(Color::Blue, 4)], 7),
            filler(7),
        ],
        number(Color::Red, 5),
        filler(10),
    );
    let events = record(&mut engine);
    assert_eq!(engine.current_player(), P0);
    assert_eq!(engine.player(P0).hand_size(), 7);
    assert_eq!(engine.player(P1).hand_size(), 7);

    let before = engine.snapshot();
    let err = engine.play_card(2).unwrap_err();
    assert!(matches!(err, EngineError::IllegalMove { .. }));
    assert_eq!(engine.snapshot(), before);

    let outcome = engine.play_card(1).unwrap();
    match outcome {
        PlayOutcome::Resolved { card, next, .. } => {
            assert_eq!(card, number(Color::Red, 3));
            assert_eq!(next, P1);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(engine.top_card(), Some(number(Color::Red, 3)));
    assert_eq!(engine.player(P0).hand_size(), 6);
    assert_eq!(engine.current_player(), P1);

    assert_eq!(
        kinds(&events),
        vec![EventKind::Status, EventKind::CardPlayed, EventKind::TurnChanged]
    );
    let played = &events.borrow()[1];
    assert_eq!(played.card, Some(number(Color::Red, 3)));
    assert_eq!(played.current_player, P0);
}

#[test]
fn test_type_match_across_colors() {
    let mut engine = staged(
        vec![padded(vec![number(Color::Green, 5)], 7), filler(7)],
        number(Color::Red, 5),
        filler(10),
    );
    assert!(engine.play_card(1).is_ok());
}

#[test]
fn test_skip_passes_over_next_player() {
    let mut engine = staged(
        vec![padded(vec![skip(Color::Red)], 7), filler(7), filler(7)],
        number(Color::Red, 5),
        filler(10),
    );
    let events = record(&mut engine);

    let outcome = engine.play_card(1).unwrap();

    assert!(matches!(outcome, PlayOutcome::Resolved { next, .. } if next == P2));
    assert_eq!(engine.current_player(), P2);
    assert_eq!(engine.state().skip_count, 0);
    assert!(kinds(&events).contains(&EventKind::TurnSkipped));
}

#[test]
fn test_skip_with_two_players_replays() {
    let mut engine = staged(
        vec![padded(vec![skip(Color::Red)], 7), filler(7)],
        number(Color::Red, 5),
        filler(10),
    );
    engine.play_card(1).unwrap();
    assert_eq!(engine.current_player(), P0);
}

#[test]
fn test_wild_draw_two_waits_for_color() {
    let mut engine = staged(
        vec![padded(vec![wild_draw_two()], 7), filler(7)],
        number(Color::Red, 5),
        filler(10),
    );
    let events = record(&mut engine);

    let outcome = engine.play_card(1).unwrap();
    assert_eq!(outcome, PlayOutcome::AwaitingColor { card: wild_draw_two() });
    assert_eq!(engine.phase(), Phase::AwaitingColorSelection);
    {
        let events = events.borrow();
        let requested = events.last().unwrap();
        assert_eq!(requested.kind, EventKind::ColorRequested);
        assert!(requested.affordances.choose_color);
        assert_eq!(requested.card, Some(wild_draw_two()));
    }

    // Nothing else is accepted while the color is pending.
    assert!(matches!(engine.draw_card(), Err(EngineError::WrongPhase { .. })));
    assert!(matches!(engine.play_card(1), Err(EngineError::WrongPhase { .. })));
    assert!(matches!(
        engine.complete_color_selection(Color::Pink),
        Err(EngineError::InvalidColor { color: Color::Pink, side: Side::Light })
    ));
    assert_eq!(engine.phase(), Phase::AwaitingColorSelection);

    let outcome = engine.complete_color_selection(Color::Blue).unwrap();
    match outcome {
        PlayOutcome::Resolved { effect, next, .. } => {
            assert_eq!(effect.target, Some(P1));
            assert_eq!(effect.drawn.len(), 2);
            assert!(!effect.exhausted);
            assert_eq!(next, P0);
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    assert_eq!(engine.phase(), Phase::AwaitingTurn);
    assert_eq!(engine.player(P1).hand_size(), 9);
    assert_eq!(engine.chosen_color(), Some(Color::Blue));
    assert_eq!(engine.current_player(), P0);

    // Only blue (or a wild) may follow.
    assert!(matches!(engine.play_card(1), Err(EngineError::IllegalMove { .. })));
    assert!(kinds(&events).contains(&EventKind::CardsForced));
}

#[test]
fn test_plain_wild_binds_color_before_turn_passes() {
    let mut engine = staged(
        vec![padded(vec![wild()], 7), filler(7)],
        number(Color::Red, 5),
        filler(10),
    );
    let events = record(&mut engine);

    engine.play_card(1).unwrap();
    engine.complete_color_selection(Color::Yellow).unwrap();

    assert_eq!(engine.current_player(), P1);
    assert_eq!(engine.chosen_color(), Some(Color::Yellow));
    let events = events.borrow();
    let chosen = events.iter().position(|e| e.kind == EventKind::ColorChosen).unwrap();
    let turn = events.iter().rposition(|e| e.kind == EventKind::TurnChanged).unwrap();
    assert!(chosen < turn);
    assert_eq!(events[turn].chosen_color, Some(Color::Yellow));
}

#[test]
fn test_round_end_scores_opponents_hands() {
    let mut engine = staged(
        vec![
            vec![number(Color::Red, 3)],
            vec![skip(Color::Blue)],
            vec![number(Color::Blue, 9)],
        ],
        number(Color::Red, 5),
        filler(5),
    );
    let events = record(&mut engine);

    let outcome = engine.play_card(1).unwrap();

    assert_eq!(
        outcome,
        PlayOutcome::RoundWon {
            card: number(Color::Red, 3),
            score: RoundScore {
                winner: P0,
                points: 29,
                total: 29,
                game_over: false,
            },
        }
    );
    assert_eq!(engine.phase(), Phase::RoundOver);
    assert_eq!(engine.state().round_winner, Some(P0));
    assert_eq!(engine.scores()[P0], 29);
    assert_eq!(engine.scores()[P1], 0);
    assert_eq!(engine.scores()[P2], 0);

    {
        let events = events.borrow();
        let over = events.last().unwrap();
        assert_eq!(over.kind, EventKind::RoundOver);
        assert_eq!(over.winner, Some(P0));
        assert!(over.affordances.new_round);
    }

    assert!(matches!(engine.draw_card(), Err(EngineError::WrongPhase { .. })));

    engine.start_new_round().unwrap();
    assert_eq!(engine.phase(), Phase::AwaitingTurn);
    assert_eq!(engine.state().round_number, 2);
    assert_eq!(engine.current_player(), P1);
    assert_eq!(engine.scores()[P0], 29);
    assert!(!engine.can_undo());
    for (_, player) in engine.players().iter() {
        assert_eq!(player.hand_size(), 1);
    }
}

#[test]
fn test_failed_deal_keeps_previous_game() {
    let mut engine = staged(
        vec![vec![number(Color::Red, 3)], vec![skip(Color::Blue)]],
        number(Color::Red, 5),
        filler(5),
    );
    engine.play_card(1).unwrap();
    assert_eq!(engine.phase(), Phase::RoundOver);
    let total = card_total(&engine);
    let before = engine.snapshot();
    let events = record(&mut engine);

    // No number card left over to start the pile.
    engine.stage_deck(Deck::from_cards(vec![skip(Color::Red); 4]));
    assert!(matches!(engine.start_new_game(), Err(EngineError::InvalidConfig(_))));
    assert!(matches!(engine.start_new_round(), Err(EngineError::InvalidConfig(_))));

    assert_eq!(engine.phase(), Phase::RoundOver);
    assert_eq!(engine.scores()[P0], 20);
    assert_eq!(card_total(&engine), total);
    assert_eq!(engine.snapshot(), before);
    assert!(engine.can_undo());
    assert_eq!(kinds(&events), vec![EventKind::Status, EventKind::Status]);

    engine.stage_deck(Deck::arranged(
        &[vec![number(Color::Red, 1)], vec![number(Color::Blue, 1)]],
        number(Color::Green, 2),
        filler(3),
    ));
    engine.start_new_game().unwrap();
    assert_eq!(engine.scores()[P0], 0);
    assert_eq!(card_total(&engine), 6);
    assert!(!engine.can_undo());
}

#[test]
fn test_reaching_target_ends_game() {
    let mut engine = staged_with(
        EngineConfig::default().with_target_score(20),
        vec![vec![number(Color::Red, 3)], vec![skip(Color::Blue)]],
        number(Color::Red, 5),
        filler(5),
    );
    let events = record(&mut engine);

    let outcome = engine.play_card(1).unwrap();
    assert!(matches!(
        outcome,
        PlayOutcome::RoundWon { score, .. } if score.game_over && score.total == 20
    ));
    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(engine.state().game_winner, Some(P0));
    assert_eq!(
        kinds(&events)[1..],
        [EventKind::RoundOver, EventKind::GameOver]
    );
    assert!(events.borrow().last().unwrap().affordances.new_game);

    assert!(matches!(
        engine.start_new_round(),
        Err(EngineError::WrongPhase {
            expected: Phase::RoundOver,
            actual: Phase::GameOver
        })
    ));

    engine.start_new_game().unwrap();
    assert_eq!(engine.phase(), Phase::AwaitingTurn);
    assert_eq!(engine.scores()[P0], 0);
    assert_eq!(engine.state().round_number, 1);
    assert_eq!(engine.state().game_winner, None);
}

#[test]
fn test_reverse_changes_direction() {
    let mut engine = staged(
        vec![padded(vec![reverse(Color::Red)], 7), filler(7), filler(7)],
        number(Color::Red, 5),
        filler(10),
    );

    engine.play_card(1).unwrap();
    assert_eq!(engine.direction(), Direction::CounterClockwise);
    assert_eq!(engine.current_player(), P2);

    let drawn = engine.draw_card().unwrap();
    assert!(matches!(drawn, DrawOutcome::Drew { next, .. } if next == P1));
}

#[test]
fn test_flip_turns_every_card() {
    let mut engine = staged(
        vec![
            padded(vec![flip(Color::Red), number(Color::Blue, 2)], 7),
            padded(vec![number(Color::Green, 4)], 7),
        ],
        number(Color::Red, 5),
        filler(10),
    );
    let events = record(&mut engine);
    let total = card_total(&engine);

    engine.play_card(1).unwrap();

    assert_eq!(engine.side(), Side::Dark);
    assert_eq!(engine.top_card().map(|c| c.color()), Some(Color::Pink));
    assert_eq!(engine.player(P0).hand()[0].color(), Color::Purple);
    assert_eq!(engine.player(P1).hand()[0].color(), Color::Orange);
    assert!(engine.table().deck().iter().all(|c| c.active_side() == Side::Dark));
    assert!(engine.table().pile().iter().all(|c| c.active_side() == Side::Dark));
    assert_eq!(engine.chosen_color(), None);
    assert_eq!(engine.current_player(), P1);
    assert_eq!(card_total(&engine), total);
    assert!(kinds(&events).contains(&EventKind::TableFlipped));
}

#[test]
fn test_draw_five_on_dark_side() {
    let mut engine = staged(
        vec![
            padded(vec![flip(Color::Red)], 7),
            padded(vec![action(Color::Red, CardType::DrawOne, CardType::DrawFive)], 7),
        ],
        number(Color::Red, 5),
        filler(10),
    );

    engine.play_card(1).unwrap();
    let outcome = engine.play_card(1).unwrap();

    match outcome {
        PlayOutcome::Resolved { card, effect, next } => {
            assert_eq!(card.kind(), CardType::DrawFive);
            assert_eq!(effect.target, Some(P0));
            assert_eq!(effect.drawn.len(), 5);
            assert_eq!(next, P1);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(engine.player(P0).hand_size(), 11);
    // Drawn cards arrive showing the active side.
    assert!(engine.player(P0).hand().iter().all(|c| c.active_side() == Side::Dark));
}

#[test]
fn test_skip_everyone_on_dark_side() {
    let mut engine = staged(
        vec![
            padded(vec![flip(Color::Red)], 7),
            padded(vec![skip(Color::Red)], 7),
            filler(7),
            filler(7),
        ],
        number(Color::Red, 5),
        filler(10),
    );

    engine.play_card(1).unwrap();
    assert_eq!(engine.current_player(), P1);

    engine.play_card(1).unwrap();
    assert_eq!(engine.current_player(), P1);
}

#[test]
fn test_voluntary_draw_ends_turn() {
    let mut engine = staged(
        vec![filler(7), filler(7)],
        number(Color::Red, 5),
        vec![number(Color::Green, 8), number(Color::Green, 9)],
    );
    let events = record(&mut engine);

    let outcome = engine.draw_card().unwrap();

    assert_eq!(
        outcome,
        DrawOutcome::Drew {
            card: number(Color::Green, 8),
            next: P1
        }
    );
    assert_eq!(engine.player(P0).hand_size(), 8);
    assert_eq!(engine.deck_size(), 1);
    assert_eq!(kinds(&events), vec![EventKind::CardDrawn, EventKind::TurnChanged]);
}

#[test]
fn test_draw_reshuffles_play_pile() {
    let mut engine = staged(
        vec![
            vec![number(Color::Red, 3), number(Color::Blue, 9)],
            vec![number(Color::Red, 4), number(Color::Green, 9)],
        ],
        number(Color::Red, 5),
        vec![],
    );
    assert_eq!(engine.deck_size(), 0);

    engine.play_card(1).unwrap();
    assert_eq!(engine.pile_size(), 2);

    let outcome = engine.draw_card().unwrap();

    assert_eq!(
        outcome,
        DrawOutcome::Drew {
            card: number(Color::Red, 5),
            next: P0
        }
    );
    assert_eq!(engine.pile_size(), 1);
    assert_eq!(engine.top_card(), Some(number(Color::Red, 3)));
    assert_eq!(engine.deck_size(), 0);
    assert_eq!(engine.player(P1).hand_size(), 3);
}

#[test]
fn test_draw_exhaustion_reports_status() {
    let mut engine = staged(
        vec![vec![number(Color::Blue, 9)], vec![number(Color::Green, 9)]],
        number(Color::Red, 5),
        vec![],
    );
    let events = record(&mut engine);

    let outcome = engine.draw_card().unwrap();

    assert_eq!(outcome, DrawOutcome::Exhausted { next: P1 });
    assert_eq!(engine.player(P0).hand_size(), 1);
    assert_eq!(engine.current_player(), P1);
    assert_eq!(kinds(&events), vec![EventKind::Status, EventKind::TurnChanged]);
    assert!(events.borrow()[0].message.is_some());
}

#[test]
fn test_standard_game_conserves_cards() {
    let mut engine = rust_flip::engine::EngineBuilder::new()
        .human("A")
        .human("B")
        .human("C")
        .human("D")
        .build()
        .unwrap();
    engine.start_new_game().unwrap();
    assert_eq!(card_total(&engine), rust_flip::zones::STANDARD_DECK_SIZE);
    assert!(engine.top_card().map_or(false, |c| c.kind().is_number()));

    for _ in 0..40 {
        if engine.phase() != Phase::AwaitingTurn {
            break;
        }
        let hand_size = engine.player(engine.current_player()).hand_size();
        let playable = (1..=hand_size).find(|&i| engine.is_playable(i));
        match playable {
            Some(index) => {
                if let PlayOutcome::AwaitingColor { .. } = engine.play_card(index).unwrap() {
                    let color = engine.side().default_color();
                    engine.complete_color_selection(color).unwrap();
                }
            }
            None => {
                engine.draw_card().unwrap();
            }
        }
        assert_eq!(card_total(&engine), rust_flip::zones::STANDARD_DECK_SIZE);
    }
}
