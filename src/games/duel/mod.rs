//! Card duel: a heads-up Texas Hold'em hand against a passive bot.
//!
//! Phases run Matchmaking → Preflop → Flop → Turn → River → Showdown. At each
//! betting phase the human may fold (immediate loss) or call, which only
//! reveals the next shared cards. The showdown compares hand categories.

mod game;
mod hand;

pub use game::{Duel, DuelAction, DuelPhase, DuelState};
pub use hand::{evaluate, HandCategory};
