//! Card shedding (Mau Mau style) against one bot.
//!
//! Both seats start with five cards from a 32-card deck. A card is playable
//! on a matching rank or suit; jacks are wild and name the next suit. The
//! human has a turn timer; running it out forfeits the stake.

mod game;
mod rules;

pub use game::{first_playable, Shedding, SheddingAction, SheddingPhase, SheddingState};
pub use rules::{effect_of, is_playable, Effect, DRAW_TWO, EXTRA_TURN, SKIP, WILD};
