//! Board tests - collision, petrification, line scoring and the cascade

use tui_blockfall::core::{Board, Session};
use tui_blockfall::player::Player;
use tui_blockfall::types::{Block, PieceKind, Vec2};

fn test_player(tag: &str) -> Player {
    let path = std::env::temp_dir().join(format!(
        "blockfall_board_{}_{}.json",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    Player::with_save_path(1, path)
}

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..board.width() {
        board.set_cell(Vec2::new(x, y), Some(Block));
    }
}

fn occupied_count(board: &Board) -> usize {
    let mut count = 0;
    for y in 0..board.height() {
        for x in 0..board.width() {
            if board.cell(Vec2::new(x, y)).is_some() {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn test_floor_collision() {
    let mut board = Board::new(9, 20, 1);
    for kind in [PieceKind::Line, PieceKind::Pyramid, PieceKind::HalfSquare] {
        board.spawn_forced(kind);
        // Lowest block row at height-1.
        let lowest = board
            .piece()
            .blocks()
            .iter()
            .map(|b| b.y)
            .max()
            .unwrap();
        board.piece_mut().origin = Vec2::new(4, 19 - lowest);
        assert!(board.has_collided(board.piece()), "kind {:?}", kind);
    }
}

#[test]
fn test_block_stack_collision() {
    let mut board = Board::new(9, 20, 1);
    board.spawn_forced(PieceKind::Pyramid);
    board.piece_mut().origin = Vec2::new(5, 8);

    // Directly beneath the (0, 1) block at (5, 9).
    board.set_cell(Vec2::new(5, 10), Some(Block));
    assert!(board.has_collided(board.piece()));
}

#[test]
fn test_no_false_collision() {
    let mut board = Board::new(9, 20, 1);
    board.spawn_forced(PieceKind::Pyramid);
    board.piece_mut().origin = Vec2::new(5, 5);
    assert!(!board.has_collided(board.piece()));
}

#[test]
fn test_petrify_writes_exact_shape_and_respawns() {
    let mut board = Board::new(9, 20, 1);
    let mut player = test_player("petrify");

    board.spawn_forced(PieceKind::Pyramid);
    board.piece_mut().origin = Vec2::new(5, 10);
    let expected: Vec<Vec2> = board.piece().abs_blocks().collect();

    board.petrify(&mut player);

    assert_eq!(occupied_count(&board), expected.len());
    for p in expected {
        assert_eq!(board.cell(p), Some(Block), "missing block at {:?}", p);
    }
    // Fresh piece at the spawn position, random non-bomb kind.
    assert_eq!(board.piece().origin, Vec2::new(4, 0));
    assert_ne!(board.piece().kind, PieceKind::Bomb);
}

#[test]
fn test_line_clear_triggers_animation() {
    let mut board = Board::new(9, 20, 1);
    let mut player = test_player("line_clear");

    fill_row(&mut board, 19);
    fill_row(&mut board, 17);
    board.score_line(&mut player);

    // One event regardless of how many rows cleared together.
    assert_eq!(player.score(), 100);

    assert!(board.is_animating());
    assert!(board.is_falling_blocks());
    assert_eq!(board.collapse_height(), 19);
    assert_eq!(board.scan_height(), 18);
    assert_eq!(occupied_count(&board), 0);
}

#[test]
fn test_no_full_line_is_noop() {
    let mut board = Board::new(9, 20, 1);
    let mut player = test_player("noop");

    // Row missing exactly one cell.
    for x in 0..8 {
        board.set_cell(Vec2::new(x, 19), Some(Block));
    }
    board.score_line(&mut player);

    assert_eq!(player.score(), 0);
    assert!(!board.is_animating());
    assert!(!board.is_falling_blocks());
    assert_eq!(board.collapse_height(), -1);
    assert_eq!(board.scan_height(), -1);
    assert_eq!(occupied_count(&board), 8);
}

#[test]
fn test_gravity_cascade_convergence() {
    let mut board = Board::new(9, 20, 1);
    let mut player = test_player("cascade");

    fill_row(&mut board, 19);
    board.set_cell(Vec2::new(4, 16), Some(Block));
    board.score_line(&mut player);

    let mut steps = 0;
    while board.is_animating() {
        board.physics_logic(&mut player);
        steps += 1;
        assert!(steps < 500, "cascade did not converge");
    }

    // The floating block settled at the lowest empty cell of its column.
    assert_eq!(board.cell(Vec2::new(4, 19)), Some(Block));
    assert_eq!(occupied_count(&board), 1);
    assert_eq!(board.collapse_height(), -1);
    assert_eq!(board.scan_height(), -1);
    assert!(!board.is_falling_blocks());
    // Exactly one line clear was reported.
    assert_eq!(player.score(), 100);
}

#[test]
fn test_cascade_exposes_new_full_line() {
    let mut board = Board::new(9, 20, 1);
    let mut player = test_player("reentry");

    // Row 19 full; row 18 full except column 0; the missing block one row
    // higher, so settling completes row 19 again after the first clear.
    fill_row(&mut board, 19);
    for x in 1..9 {
        board.set_cell(Vec2::new(x, 18), Some(Block));
    }
    board.set_cell(Vec2::new(0, 17), Some(Block));

    board.score_line(&mut player);

    let mut steps = 0;
    while board.is_animating() {
        board.physics_logic(&mut player);
        steps += 1;
        assert!(steps < 1000, "cascade did not converge");
    }

    // Two separate clears, everything gone at the end.
    assert_eq!(player.score(), 200);
    assert_eq!(occupied_count(&board), 0);
}

#[test]
fn test_rotation_rejected_on_occupied_overlap() {
    let mut board = Board::new(9, 20, 1);
    let mut player = test_player("rotation");

    board.spawn_forced(PieceKind::Pyramid);
    board.piece_mut().origin = Vec2::new(4, 10);

    // Clockwise rotation would place a block at (3, 9).
    board.set_cell(Vec2::new(3, 9), Some(Block));
    let before: Vec<Vec2> = board.piece().blocks().to_vec();

    board.handle_command(tui_blockfall::types::Command::RotateCw, &mut player);
    assert_eq!(board.piece().blocks(), before.as_slice());
}

#[test]
fn test_spawn_and_petrify_scenario() {
    // 9x20 board, piece spawned at (4, 0); moving the origin to (5, 18)
    // and ticking once must petrify and respawn at (4, 0).
    let mut board = Board::new(9, 20, 42);
    let mut player = test_player("scenario");

    assert_eq!(board.piece().origin, Vec2::new(4, 0));

    board.spawn_forced(PieceKind::Pyramid);
    board.piece_mut().origin = Vec2::new(5, 18);
    board.physics_logic(&mut player);

    assert_eq!(board.cell(Vec2::new(5, 18)), Some(Block));
    assert_eq!(board.cell(Vec2::new(4, 19)), Some(Block));
    assert_eq!(board.cell(Vec2::new(5, 19)), Some(Block));
    assert_eq!(board.cell(Vec2::new(6, 19)), Some(Block));
    assert_eq!(board.piece().origin, Vec2::new(4, 0));
    assert_ne!(board.piece().kind, PieceKind::Bomb);
}

#[test]
fn test_piece_falls_one_row_per_tick() {
    let mut board = Board::new(9, 20, 1);
    let mut player = test_player("fall");

    board.spawn_forced(PieceKind::Line);
    board.piece_mut().origin = Vec2::new(4, 3);
    board.physics_logic(&mut player);
    assert_eq!(board.piece().origin, Vec2::new(4, 4));
}

#[test]
fn test_session_powerup_is_read_through_board() {
    // The board never caches the held powerup; granting one via a line
    // clear makes the very next trigger work.
    let mut board = Board::new(9, 20, 1);
    let mut player = test_player("seam");

    fill_row(&mut board, 19);
    board.score_line(&mut player);
    assert!(player.power_up().is_held());
}
