//! Player tests - scoring, powerup grants, and score persistence

use std::path::PathBuf;

use tui_blockfall::core::Session;
use tui_blockfall::player::Player;
use tui_blockfall::types::ScoreEvent;

fn scratch_path(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "blockfall_player_it_{}_{}.json",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn test_missing_save_file_starts_at_zero() {
    let player = Player::with_save_path(1, scratch_path("missing"));
    assert_eq!(player.accumulated_score(), 0);
    assert_eq!(player.score(), 0);
}

#[test]
fn test_empty_save_file_starts_at_zero() {
    let path = scratch_path("empty");
    std::fs::write(&path, "").unwrap();

    let player = Player::with_save_path(1, &path);
    assert_eq!(player.accumulated_score(), 0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_accumulated_score_survives_across_sessions() {
    let path = scratch_path("roundtrip");

    let mut player = Player::with_save_path(1, &path);
    for _ in 0..3 {
        player.report_score(ScoreEvent::LineClear);
    }
    player.report_score(ScoreEvent::BlockDestroyed);
    player.end_match().unwrap();
    assert_eq!(player.accumulated_score(), 310);

    // A brand-new session loads the same total.
    let reloaded = Player::with_save_path(99, &path);
    assert_eq!(reloaded.accumulated_score(), 310);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_end_match_accumulates_over_matches() {
    let path = scratch_path("matches");

    let mut player = Player::with_save_path(1, &path);
    player.report_score(ScoreEvent::LineClear);
    player.end_match().unwrap();
    player.report_score(ScoreEvent::LineClear);
    player.report_score(ScoreEvent::LineClear);
    player.end_match().unwrap();

    assert_eq!(player.accumulated_score(), 300);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_powerup_dropped_at_match_end() {
    let path = scratch_path("drop");

    let mut player = Player::with_save_path(1, &path);
    player.report_score(ScoreEvent::LineClear);
    assert!(player.power_up().is_held());

    player.end_match().unwrap();
    assert!(!player.power_up().is_held());

    let _ = std::fs::remove_file(&path);
}
