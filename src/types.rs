//! Core types shared across the application
//! This module contains pure data types with no external dependencies

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Board dimensions for the shipped game.
pub const BOARD_WIDTH: i8 = 10;
pub const BOARD_HEIGHT: i8 = 20;

/// Interval between physics ticks (milliseconds). One tick advances the
/// piece one row, or the gravity scan one row while animating.
pub const FALL_INTERVAL_MS: u32 = 300;

/// Number of upcoming pieces shown in the preview panel.
pub const PREVIEW_DEPTH: usize = 3;

/// Points per scoring event.
pub const LINE_CLEAR_POINTS: u32 = 100;
pub const BLOCK_DESTROYED_POINTS: u32 = 10;

/// Integer 2D point/offset. Addition is component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vec2 {
    pub x: i8,
    pub y: i8,
}

impl Vec2 {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Marker for a petrified block. Carries no piece-type info: once a piece
/// locks, its cells are indistinguishable from any other locked cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block;

/// Cell on the board (None = empty, Some = petrified block)
pub type Cell = Option<Block>;

/// Falling piece kinds
///
/// `Bomb` is special: it never comes out of the random draw and only spawns
/// when an armed bomb powerup forces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Line,
    Pyramid,
    HalfSquare,
    Bomb,
}

impl PieceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Line => "line",
            PieceKind::Pyramid => "pyramid",
            PieceKind::HalfSquare => "half-square",
            PieceKind::Bomb => "bomb",
        }
    }
}

/// Powerup kinds a player can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Teleporter,
    Bomb,
}

impl PowerUpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Teleporter => "teleporter",
            PowerUpKind::Bomb => "bomb",
        }
    }
}

/// Abstract gameplay commands the board consumes.
///
/// Menu navigation, pause and quit are handled above this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    RotateCcw,
    TriggerPowerUp,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::TriggerPowerUp => "triggerPowerUp",
        }
    }
}

/// Score-affecting events the board reports to the player session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreEvent {
    LineClear,
    BlockDestroyed,
}
