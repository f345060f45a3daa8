//! GameView: projects the board and session into rows of text.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Board, Session};
use crate::player::Player;
use crate::types::{PieceKind, Vec2};

const GLYPH_EMPTY: &str = " ·";
const GLYPH_BLOCK: &str = "██";
const GLYPH_GHOST: &str = "░░";

/// A lightweight text renderer for the game.
///
/// Every board cell maps to two terminal columns to compensate for the
/// usual glyph aspect ratio.
pub struct GameView {
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self { show_ghost: true }
    }
}

impl GameView {
    pub fn new(show_ghost: bool) -> Self {
        Self { show_ghost }
    }

    /// Render the current state into one string per terminal row.
    pub fn render(&self, board: &Board, player: &Player) -> Vec<String> {
        let width = board.width() as usize;
        let height = board.height() as usize;

        // Cell glyph layer: locked blocks, then ghost, then the piece on top.
        let mut glyphs = vec![vec![GLYPH_EMPTY; width]; height];

        for y in 0..board.height() {
            for x in 0..board.width() {
                if board.cell(Vec2::new(x, y)).is_some() {
                    glyphs[y as usize][x as usize] = GLYPH_BLOCK;
                }
            }
        }

        if self.show_ghost {
            let landing = board.landing_origin();
            for &offset in board.piece().blocks() {
                let p = landing + offset;
                if board.in_bounds(p) {
                    glyphs[p.y as usize][p.x as usize] = GLYPH_GHOST;
                }
            }
        }

        for p in board.piece().abs_blocks() {
            if board.in_bounds(p) {
                glyphs[p.y as usize][p.x as usize] = GLYPH_BLOCK;
            }
        }

        let panel = self.panel_lines(board, player);
        let mut rows = Vec::with_capacity(height + 2);

        let horizontal = "─".repeat(width * 2);
        rows.push(format!("┌{horizontal}┐"));
        for (y, row) in glyphs.iter().enumerate() {
            let cells: String = row.concat();
            let side = panel.get(y).map(String::as_str).unwrap_or("");
            rows.push(format!("│{cells}│  {side}"));
        }
        rows.push(format!("└{horizontal}┘"));
        rows
    }

    fn panel_lines(&self, board: &Board, player: &Player) -> Vec<String> {
        let mut lines = vec![
            format!("score: {}", player.score()),
            format!("total: {}", player.accumulated_score()),
        ];

        match player.power_up().kind() {
            None => lines.push("powerup: -".to_string()),
            Some(kind) => {
                let armed = if player.power_up().is_armed() {
                    " (armed)"
                } else {
                    ""
                };
                lines.push(format!("powerup: {}{armed}", kind.as_str()));
            }
        }

        lines.push(String::new());
        lines.push("next:".to_string());
        for &kind in board.upcoming() {
            lines.push(format!("  {}", preview_label(kind)));
        }

        if board.is_animating() {
            lines.push(String::new());
            lines.push("line clear!".to_string());
        }

        lines
    }
}

fn preview_label(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::Line => "████████",
        PieceKind::Pyramid => "▄█▄",
        PieceKind::HalfSquare => "█▄▄",
        PieceKind::Bomb => "◎",
    }
}
