//! Core module - pure game logic with no external dependencies
//!
//! This module contains the board simulation, piece geometry, powerup
//! state and the deterministic RNG. It has zero dependencies on UI or I/O.

pub mod board;
pub mod piece;
pub mod powerup;
pub mod rng;

pub use board::Board;
pub use piece::Piece;
pub use powerup::PowerUp;
pub use rng::SimpleRng;

use crate::types::ScoreEvent;

/// The board's view of the player session: where scoring events go and
/// where the held powerup lives. The board never owns scoring state.
pub trait Session {
    fn report_score(&mut self, event: ScoreEvent);
    fn power_up(&self) -> &PowerUp;
    fn power_up_mut(&mut self) -> &mut PowerUp;
}
