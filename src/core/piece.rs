//! Piece module - falling-piece geometry and rotation
//!
//! A piece is a fixed origin plus a set of block offsets relative to it.
//! Rotation is an in-place 90° turn about the origin (not the visual
//! center) with no wall-kick adjustment; legality is the board's job.

use arrayvec::ArrayVec;

use crate::core::rng::SimpleRng;
use crate::types::{PieceKind, Vec2};

/// Block offsets relative to the piece origin.
pub type BlockOffsets = ArrayVec<Vec2, 4>;

/// Kinds eligible for the random draw. `Bomb` is reachable only explicitly.
const SPAWNABLE_KINDS: [PieceKind; 3] =
    [PieceKind::Line, PieceKind::Pyramid, PieceKind::HalfSquare];

/// The active falling piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub origin: Vec2,
    blocks: BlockOffsets,
}

impl Piece {
    /// Create a piece at `origin`. When `kind` is `None` the kind is drawn
    /// uniformly at random from the non-bomb kinds.
    pub fn spawn(origin: Vec2, kind: Option<PieceKind>, rng: &mut SimpleRng) -> Self {
        let kind = kind.unwrap_or_else(|| Self::draw_kind(rng));
        Self {
            kind,
            origin,
            blocks: Self::offsets(kind),
        }
    }

    /// Draw a random spawnable kind.
    pub fn draw_kind(rng: &mut SimpleRng) -> PieceKind {
        SPAWNABLE_KINDS[rng.next_range(SPAWNABLE_KINDS.len() as u32) as usize]
    }

    fn offsets(kind: PieceKind) -> BlockOffsets {
        let offsets: &[Vec2] = match kind {
            PieceKind::Bomb => &[Vec2::new(0, 0)],
            PieceKind::Line => &[
                Vec2::new(-1, 0),
                Vec2::new(0, 0),
                Vec2::new(1, 0),
                Vec2::new(2, 0),
            ],
            PieceKind::Pyramid => &[
                Vec2::new(0, 0),
                Vec2::new(-1, 1),
                Vec2::new(0, 1),
                Vec2::new(1, 1),
            ],
            PieceKind::HalfSquare => &[
                Vec2::new(-1, 0),
                Vec2::new(-1, 1),
                Vec2::new(0, 1),
                Vec2::new(1, 1),
            ],
        };
        offsets.iter().copied().collect()
    }

    /// Bounding height in rows, used by the preview panel.
    pub fn preview_height(kind: PieceKind) -> i8 {
        match kind {
            PieceKind::Line | PieceKind::Bomb => 1,
            PieceKind::Pyramid | PieceKind::HalfSquare => 2,
        }
    }

    /// Relative block offsets.
    pub fn blocks(&self) -> &[Vec2] {
        &self.blocks
    }

    /// Absolute position of one relative block.
    pub fn block_abs(&self, block: Vec2) -> Vec2 {
        self.origin + block
    }

    /// Absolute positions of all blocks.
    pub fn abs_blocks(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.blocks.iter().map(|&b| self.origin + b)
    }

    /// The offsets this piece would have after a 90° rotation, without
    /// mutating the piece. Used for legality checks.
    pub fn rotated_offsets(&self, clockwise: bool) -> BlockOffsets {
        self.blocks.iter().map(|&b| rotate_offset(b, clockwise)).collect()
    }

    /// Rotate in place by 90° about the origin.
    pub fn rotate(&mut self, clockwise: bool) {
        for block in &mut self.blocks {
            *block = rotate_offset(*block, clockwise);
        }
    }
}

fn rotate_offset(v: Vec2, clockwise: bool) -> Vec2 {
    if clockwise {
        Vec2::new(-v.y, v.x)
    } else {
        Vec2::new(v.y, -v.x)
    }
}
