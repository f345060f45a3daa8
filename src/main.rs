//! Terminal runner (default binary).
//!
//! Drives the board with one physics call per fall interval, polls for
//! input in between, and redraws every frame.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blockfall::config::Bindings;
use tui_blockfall::core::Board;
use tui_blockfall::input::{handle_key_event, should_quit};
use tui_blockfall::player::Player;
use tui_blockfall::term::{GameView, TerminalRenderer};
use tui_blockfall::types::{BOARD_HEIGHT, BOARD_WIDTH, FALL_INTERVAL_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos().wrapping_add(d.as_secs() as u32))
        .unwrap_or(1);

    let bindings = Bindings::load_or_default(tui_blockfall::config::DEFAULT_BINDINGS_PATH);
    let mut player = Player::new(seed);
    let mut board = Board::new(BOARD_WIDTH, BOARD_HEIGHT, seed);
    let view = GameView::default();

    let tick_duration = Duration::from_millis(FALL_INTERVAL_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        term.draw(&view.render(&board, &player))?;

        // Input with timeout until the next physics tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        break;
                    }
                    if let Some(command) = handle_key_event(key, &bindings) {
                        board.handle_command(command, &mut player);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            board.physics_logic(&mut player);
        }
    }

    player.end_match()?;
    Ok(())
}
