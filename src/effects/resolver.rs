//! Effect resolution - executing effects on the table.
//!
//! The resolver runs after the played card is already on the pile. It never
//! advances the turn itself; it only adjusts direction, pending skips, the
//! active side and hands. The engine advances the turn afterwards.

use tracing::{debug, warn};

use crate::cards::Card;
use crate::engine::Table;
use crate::rules::next_in_line;

use super::{Effect, EffectOutcome};

/// Resolves card effects on the table.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `effect` for the current player.
    ///
    /// Wild effects read the color already bound in `table.state.chosen_color`.
    /// Partial draws are kept when the deck runs out; the outcome reports it.
    pub fn resolve(table: &mut Table, effect: Effect) -> EffectOutcome {
        let mut outcome = EffectOutcome::default();
        let player_count = table.player_count();

        match effect {
            Effect::None | Effect::ChooseColor => {}

            Effect::Reverse => {
                table.state.direction = table.state.direction.reversed();
                debug!(direction = ?table.state.direction, "direction reversed");
            }

            Effect::SkipNext => {
                table.state.skip_count += 1;
            }

            Effect::SkipEveryone => {
                table.state.skip_count += player_count - 1;
            }

            Effect::Draw { count } | Effect::ChooseColorThenDraw { count } => {
                Self::force_draw(table, &mut outcome, |drawn| drawn.len() >= count);
            }

            Effect::ChooseColorThenDrawUntilMatch => {
                let wanted = table.state.chosen_color;
                Self::force_draw(table, &mut outcome, |drawn| match (wanted, drawn.last()) {
                    (Some(color), Some(card)) => card.color() == color,
                    // No color bound: behave like a single forced draw.
                    (None, Some(_)) => true,
                    (_, None) => false,
                });
            }

            Effect::Flip => {
                table.flip_all();
                debug!(side = %table.state.side, "table flipped");
            }
        }

        outcome
    }

    /// The next player draws until `done` says stop, then loses their turn.
    fn force_draw(
        table: &mut Table,
        outcome: &mut EffectOutcome,
        done: impl Fn(&[Card]) -> bool,
    ) {
        let target = next_in_line(table.state.current, table.state.direction, table.player_count());
        outcome.target = Some(target);

        while !done(&outcome.drawn) {
            match table.draw_for(target) {
                Some(card) => outcome.drawn.push(card),
                None => {
                    warn!(
                        %target,
                        drawn = outcome.drawn.len(),
                        "draw pile exhausted during forced draw"
                    );
                    outcome.exhausted = true;
                    break;
                }
            }
        }

        table.state.skip_count += 1;
    }
}
