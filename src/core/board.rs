//! Board module - grid, collision, petrification and the line-clear cascade
//!
//! The grid is a fixed-size column-major array: cells are indexed
//! `[column][row]` with x ranging left to right and y top to bottom.
//! The board owns the active piece and the multi-frame cascade state;
//! the held powerup and all scoring state live on the `Session`.
//!
//! Out-of-range grid writes are contract violations and panic. Callers
//! (movement and rotation legality) keep piece positions in range.

use arrayvec::ArrayVec;

use crate::core::piece::Piece;
use crate::core::rng::SimpleRng;
use crate::core::Session;
use crate::types::{Block, Cell, Command, PieceKind, PowerUpKind, ScoreEvent, Vec2, PREVIEW_DEPTH};

/// Cells cleared by a bomb blast, relative to the blast center.
/// A fixed 12-cell diamond: orthogonal at distance 1 and 2, plus diagonals.
const BLAST_OFFSETS: [Vec2; 12] = [
    Vec2::new(0, -2),
    Vec2::new(0, 2),
    Vec2::new(-2, 0),
    Vec2::new(2, 0),
    Vec2::new(-1, -1),
    Vec2::new(1, -1),
    Vec2::new(-1, 1),
    Vec2::new(1, 1),
    Vec2::new(0, -1),
    Vec2::new(0, 1),
    Vec2::new(-1, 0),
    Vec2::new(1, 0),
];

/// The game board and its cascade state machine.
///
/// States: idle (piece falling/controllable) and animating (gravity cascade
/// after a line clear). While `is_falling_blocks` is set, each physics tick
/// advances the scan by exactly one row instead of moving the piece, so the
/// cascade is visible rather than instantaneous.
#[derive(Debug, Clone)]
pub struct Board {
    /// Flat array of cells, column-major order (x * height + y).
    cells: Vec<Cell>,
    width: i8,
    height: i8,
    piece: Piece,
    upcoming: ArrayVec<PieceKind, PREVIEW_DEPTH>,
    rng: SimpleRng,
    is_animating: bool,
    is_falling_blocks: bool,
    /// Row index of the lowest cleared line, -1 when idle.
    collapse_height: i8,
    /// Row currently being scanned for gravity, -1 when idle.
    scan_height: i8,
    blocks_fell_in_scan: bool,
}

impl Board {
    /// Create an empty board with the active piece at the spawn position.
    pub fn new(width: i8, height: i8, seed: u32) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");

        let mut rng = SimpleRng::new(seed);
        let mut upcoming = ArrayVec::new();
        for _ in 0..PREVIEW_DEPTH {
            upcoming.push(Piece::draw_kind(&mut rng));
        }
        let piece = Piece::spawn(Vec2::new(width / 2, 0), None, &mut rng);

        Self {
            cells: vec![None; width as usize * height as usize],
            width,
            height,
            piece,
            upcoming,
            rng,
            is_animating: false,
            is_falling_blocks: false,
            collapse_height: -1,
            scan_height: -1,
            blocks_fell_in_scan: false,
        }
    }

    pub fn width(&self) -> i8 {
        self.width
    }

    pub fn height(&self) -> i8 {
        self.height
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn piece_mut(&mut self) -> &mut Piece {
        &mut self.piece
    }

    /// Upcoming-piece preview, nearest first.
    pub fn upcoming(&self) -> &[PieceKind] {
        &self.upcoming
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn is_falling_blocks(&self) -> bool {
        self.is_falling_blocks
    }

    pub fn collapse_height(&self) -> i8 {
        self.collapse_height
    }

    pub fn scan_height(&self) -> i8 {
        self.scan_height
    }

    fn spawn_origin(&self) -> Vec2 {
        Vec2::new(self.width / 2, 0)
    }

    pub fn in_bounds(&self, p: Vec2) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Calculate flat index, panicking out of range. All writes funnel
    /// through this so a caller bug faults instead of corrupting state.
    fn index(&self, p: Vec2) -> usize {
        assert!(
            self.in_bounds(p),
            "cell ({}, {}) outside {}x{} grid",
            p.x,
            p.y,
            self.width,
            self.height
        );
        p.x as usize * self.height as usize + p.y as usize
    }

    /// Cell at an in-range position. Panics out of range.
    pub fn cell(&self, p: Vec2) -> Cell {
        self.cells[self.index(p)]
    }

    pub fn set_cell(&mut self, p: Vec2, cell: Cell) {
        let idx = self.index(p);
        self.cells[idx] = cell;
    }

    /// Bounds-tolerant occupancy check: out-of-grid positions read as free.
    pub fn is_occupied(&self, p: Vec2) -> bool {
        self.in_bounds(p) && self.cell(p).is_some()
    }

    /// Would this piece, sitting where it is, be unable to move down one
    /// more row? True when any block rests on the floor or sits directly
    /// above an occupied cell. Not a pre-move check.
    pub fn has_collided(&self, piece: &Piece) -> bool {
        for abs in piece.abs_blocks() {
            if abs.y == self.height - 1 {
                return true;
            }
            if self.is_occupied(abs + Vec2::new(0, 1)) {
                return true;
            }
        }
        false
    }

    /// Per-tick physics entry point, called once per simulation step.
    ///
    /// While blocks are cascading, each tick advances the gravity scan by
    /// one row. Otherwise the active piece either petrifies (when it can
    /// no longer fall) or falls one row.
    pub fn physics_logic(&mut self, session: &mut impl Session) {
        if self.is_falling_blocks {
            self.apply_gravity_step(session);
            return;
        }

        if self.has_collided(&self.piece) {
            self.petrify(session);
            self.score_line(session);
        } else {
            self.piece.origin.y += 1;
        }
    }

    /// Write the active piece's blocks into the grid and spawn a fresh one.
    ///
    /// A bomb piece never petrifies into blocks: with a held powerup it
    /// triggers the effect instead; with no powerup held the piece is
    /// discarded without respawning, as the original game does. That state
    /// is unreachable in normal play (a bomb piece only exists while a
    /// bomb powerup is armed).
    pub fn petrify(&mut self, session: &mut impl Session) {
        if self.piece.kind == PieceKind::Bomb {
            if !session.power_up().is_held() {
                return;
            }
            self.trigger_power_up(session);
            return;
        }

        let blocks: ArrayVec<Vec2, 4> = self.piece.abs_blocks().collect();
        for abs in blocks {
            self.set_cell(abs, Some(Block));
        }
        self.spawn_piece();
    }

    /// Replace the active piece with the next one from the preview queue.
    fn spawn_piece(&mut self) {
        let kind = self.upcoming.remove(0);
        self.upcoming.push(Piece::draw_kind(&mut self.rng));
        self.piece = Piece::spawn(self.spawn_origin(), Some(kind), &mut self.rng);
    }

    /// Replace the active piece with a forced kind, bypassing the preview.
    pub fn spawn_forced(&mut self, kind: PieceKind) {
        self.piece = Piece::spawn(self.spawn_origin(), Some(kind), &mut self.rng);
    }

    fn is_row_full(&self, y: i8) -> bool {
        (0..self.width).all(|x| self.cell(Vec2::new(x, y)).is_some())
    }

    fn clear_row(&mut self, y: i8) {
        for x in 0..self.width {
            self.set_cell(Vec2::new(x, y), None);
        }
    }

    /// Scan for full rows, clear them, and enter the cascade state.
    ///
    /// Reports exactly one `LineClear` event per call no matter how many
    /// rows cleared together. A board with no full row is left untouched.
    pub fn score_line(&mut self, session: &mut impl Session) {
        let mut lowest_full: i8 = -1;
        for y in (0..self.height).rev() {
            if self.is_row_full(y) {
                self.clear_row(y);
                if lowest_full < 0 {
                    lowest_full = y;
                }
            }
        }

        if lowest_full < 0 {
            return;
        }

        session.report_score(ScoreEvent::LineClear);
        self.is_animating = true;
        self.is_falling_blocks = true;
        self.collapse_height = lowest_full;
        self.scan_height = lowest_full - 1;
        self.blocks_fell_in_scan = false;
    }

    /// One gravity-scan step of the cascade. Scans a single row per tick,
    /// moving upward; a pass in which any block fell triggers another pass,
    /// so blocks settle one row per pass. When a pass moves nothing the
    /// cascade ends and scoring re-runs, since settling can expose new
    /// full lines.
    fn apply_gravity_step(&mut self, session: &mut impl Session) {
        if self.scan_height < 0 {
            if self.blocks_fell_in_scan {
                self.blocks_fell_in_scan = false;
                self.scan_height = self.collapse_height - 1;
            } else {
                self.collapse_height = -1;
                self.scan_height = -1;
                self.is_animating = false;
                self.is_falling_blocks = false;
                self.score_line(session);
            }
            return;
        }

        let y = self.scan_height;
        for x in 0..self.width {
            let here = Vec2::new(x, y);
            if self.cell(here).is_none() {
                continue;
            }
            let below = Vec2::new(x, y + 1);
            if self.in_bounds(below) && self.cell(below).is_none() {
                self.set_cell(below, Some(Block));
                self.set_cell(here, None);
                self.blocks_fell_in_scan = true;
            }
        }
        self.scan_height -= 1;
    }

    /// Whether a 90° rotation is legal: every rotated block must stay on
    /// the grid and land on an empty cell.
    pub fn can_rotate(&self, clockwise: bool) -> bool {
        self.piece
            .rotated_offsets(clockwise)
            .iter()
            .all(|&offset| {
                let abs = self.piece.origin + offset;
                self.in_bounds(abs) && self.cell(abs).is_none()
            })
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        if self.can_rotate(clockwise) {
            self.piece.rotate(clockwise);
            return true;
        }
        false
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        let legal = self.piece.abs_blocks().all(|abs| {
            let target = abs + Vec2::new(dx, 0);
            self.in_bounds(target) && self.cell(target).is_none()
        });
        if legal {
            self.piece.origin.x += dx;
        }
        legal
    }

    /// Apply one abstract input command.
    pub fn handle_command(&mut self, command: Command, session: &mut impl Session) {
        match command {
            Command::MoveLeft => {
                self.try_shift(-1);
            }
            Command::MoveRight => {
                self.try_shift(1);
            }
            Command::RotateCw => {
                self.try_rotate(true);
            }
            Command::RotateCcw => {
                self.try_rotate(false);
            }
            Command::TriggerPowerUp => self.trigger_power_up(session),
        }
    }

    /// Dispatch the held powerup's effect. With nothing held this is a
    /// normal no-op, not an error.
    pub fn trigger_power_up(&mut self, session: &mut impl Session) {
        match session.power_up().kind() {
            None => {}
            Some(PowerUpKind::Teleporter) => self.teleport_to_floor(session),
            Some(PowerUpKind::Bomb) => {
                if session.power_up().is_armed() {
                    self.detonate(session);
                } else {
                    session.power_up_mut().arm();
                    self.spawn_forced(PieceKind::Bomb);
                }
            }
        }
    }

    /// Teleporter effect: drop each block of the active piece straight into
    /// the lowest empty cell of its column, then rescore and respawn.
    /// Consumes the powerup.
    fn teleport_to_floor(&mut self, session: &mut impl Session) {
        let blocks: ArrayVec<Vec2, 4> = self.piece.abs_blocks().collect();
        for abs in blocks {
            // Scan the column from the bottom upward for the first gap.
            for y in (0..self.height).rev() {
                let target = Vec2::new(abs.x, y);
                if self.cell(target).is_none() {
                    self.set_cell(target, Some(Block));
                    break;
                }
            }
        }

        self.score_line(session);
        self.spawn_piece();
        session.power_up_mut().clear();
    }

    /// Armed-bomb detonation: clear the blast pattern around the bomb
    /// piece's block, reporting one `BlockDestroyed` per cell actually
    /// cleared. Offsets outside the grid are skipped silently. Consumes
    /// the powerup and respawns a normal piece.
    fn detonate(&mut self, session: &mut impl Session) {
        let center = self.piece.origin + self.piece.blocks()[0];
        for offset in BLAST_OFFSETS {
            let target = center + offset;
            if self.is_occupied(target) {
                self.set_cell(target, None);
                session.report_score(ScoreEvent::BlockDestroyed);
            }
        }

        session.power_up_mut().clear();
        self.spawn_piece();
    }

    /// Where the active piece would rest if dropped straight down, without
    /// mutating the live piece.
    pub fn landing_origin(&self) -> Vec2 {
        let mut probe = self.piece.clone();
        while !self.has_collided(&probe) {
            probe.origin.y += 1;
        }
        probe.origin
    }
}
