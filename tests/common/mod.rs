//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use rust_flip::cards::{Card, CardType, Color, Face};
use rust_flip::core::EngineConfig;
use rust_flip::engine::{Engine, EngineBuilder, Event, EventKind};
use rust_flip::zones::Deck;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then "warn".
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

// === Cards ===

/// Number card; the dark face is the matching dark color and number.
pub fn number(color: Color, n: u8) -> Card {
    Card::new(
        Face::new(color, CardType::Number(n)),
        Face::new(color.counterpart(), CardType::Number(n)),
    )
}

/// Card with explicit light and dark types, colored `color` / its counterpart.
pub fn action(color: Color, light: CardType, dark: CardType) -> Card {
    Card::new(Face::new(color, light), Face::new(color.counterpart(), dark))
}

pub fn skip(color: Color) -> Card {
    action(color, CardType::Skip, CardType::SkipEveryone)
}

pub fn reverse(color: Color) -> Card {
    action(color, CardType::Reverse, CardType::Reverse)
}

pub fn flip(color: Color) -> Card {
    action(color, CardType::Flip, CardType::Flip)
}

pub fn wild() -> Card {
    Card::new(Face::wild(CardType::Wild), Face::wild(CardType::Wild))
}

pub fn wild_draw_two() -> Card {
    Card::new(Face::wild(CardType::WildDrawTwo), Face::wild(CardType::WildDrawColor))
}

/// `count` yellow number cards, used to pad hands and decks.
pub fn filler(count: usize) -> Vec<Card> {
    (0..count).map(|i| number(Color::Yellow, (i % 9) as u8 + 1)).collect()
}

/// Pad `cards` with yellow fillers up to `size`.
pub fn padded(mut cards: Vec<Card>, size: usize) -> Vec<Card> {
    let missing = size.saturating_sub(cards.len());
    cards.extend(filler(missing));
    cards
}

// === Engines ===

/// All-human engine dealt from a staged deck. Hand size is taken from the
/// first hand.
pub fn staged(hands: Vec<Vec<Card>>, seed: Card, remaining: Vec<Card>) -> Engine {
    staged_with(EngineConfig::default(), hands, seed, remaining)
}

pub fn staged_with(
    config: EngineConfig,
    hands: Vec<Vec<Card>>,
    seed: Card,
    remaining: Vec<Card>,
) -> Engine {
    init_logging();
    let hand_size = hands.first().map_or(0, Vec::len);
    let deck = Deck::arranged(&hands, seed, remaining);

    let mut builder = EngineBuilder::new()
        .config(config.with_hand_size(hand_size))
        .staged_deck(deck);
    for seat in 0..hands.len() {
        builder = builder.human(format!("Player {}", seat + 1));
    }

    let mut engine = builder.build().unwrap();
    engine.start_new_game().unwrap();
    engine
}

// === Events ===

pub type Recorded = Rc<RefCell<Vec<Event>>>;

/// Register an observer that keeps every event.
pub fn record(engine: &mut Engine) -> Recorded {
    let events: Recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    engine.register_observer(move |event: &Event| sink.borrow_mut().push(event.clone()));
    events
}

pub fn kinds(events: &Recorded) -> Vec<EventKind> {
    events.borrow().iter().map(|e| e.kind).collect()
}

/// Total cards on the table; always the size of the deck that was dealt.
pub fn card_total(engine: &Engine) -> usize {
    engine.deck_size()
        + engine.pile_size()
        + engine.players().values().map(|p| p.hand_size()).sum::<usize>()
}
