//! PowerUp module - the ability a player currently holds
//!
//! The held powerup lives on the player session; the board only reads and
//! clears it. The armed flag matters only for the bomb: armed means one
//! trigger has happened and the next one detonates.

use crate::types::PowerUpKind;

/// The powerup a player holds, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerUp {
    kind: Option<PowerUpKind>,
    armed: bool,
}

impl PowerUp {
    /// An empty hand.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(kind: PowerUpKind) -> Self {
        Self {
            kind: Some(kind),
            armed: false,
        }
    }

    pub fn kind(&self) -> Option<PowerUpKind> {
        self.kind
    }

    pub fn is_held(&self) -> bool {
        self.kind.is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// First bomb trigger: keep the powerup, await the detonation trigger.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Consume the powerup entirely.
    pub fn clear(&mut self) {
        self.kind = None;
        self.armed = false;
    }
}
