//! Player session - match score, held powerup, and score persistence
//!
//! The board reports scoring events here through the `Session` trait; the
//! player owns the held powerup and all scoring state. The accumulated
//! score survives across matches as a small JSON blob on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::rng::SimpleRng;
use crate::core::{PowerUp, Session};
use crate::types::{PowerUpKind, ScoreEvent, BLOCK_DESTROYED_POINTS, LINE_CLEAR_POINTS};

/// Default save location, relative to the working directory.
pub const DEFAULT_SAVE_PATH: &str = "data/data.json";

/// On-disk persistence format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct DataBlob {
    accumulated_score: u64,
}

pub struct Player {
    score: u32,
    accumulated_score: u64,
    power_up: PowerUp,
    rng: SimpleRng,
    save_path: PathBuf,
}

impl Player {
    /// Create a player, loading any previously accumulated score from the
    /// default save path.
    pub fn new(seed: u32) -> Self {
        Self::with_save_path(seed, DEFAULT_SAVE_PATH)
    }

    pub fn with_save_path(seed: u32, save_path: impl Into<PathBuf>) -> Self {
        let mut player = Self {
            score: 0,
            accumulated_score: 0,
            power_up: PowerUp::none(),
            rng: SimpleRng::new(seed),
            save_path: save_path.into(),
        };
        // A missing or unreadable save file just means a fresh start.
        let _ = player.load_accumulated_score();
        player
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn accumulated_score(&self) -> u64 {
        self.accumulated_score
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Fold the match score into the accumulated score, drop the held
    /// powerup, and persist.
    pub fn end_match(&mut self) -> Result<()> {
        self.accumulated_score += self.score as u64;
        self.score = 0;
        self.power_up.clear();
        self.save_accumulated_score()
    }

    /// Grant a uniformly random powerup, but never replace a held one.
    fn grant_power_up(&mut self) {
        if self.power_up.is_held() {
            return;
        }
        let kind = if self.rng.next_range(2) == 0 {
            PowerUpKind::Teleporter
        } else {
            PowerUpKind::Bomb
        };
        self.power_up = PowerUp::new(kind);
    }

    pub fn save_accumulated_score(&self) -> Result<()> {
        if let Some(parent) = self.save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating save directory {}", parent.display()))?;
            }
        }

        let blob = DataBlob {
            accumulated_score: self.accumulated_score,
        };
        let json = serde_json::to_string_pretty(&blob)?;
        fs::write(&self.save_path, json)
            .with_context(|| format!("writing save file {}", self.save_path.display()))?;
        Ok(())
    }

    pub fn load_accumulated_score(&mut self) -> Result<()> {
        if !self.save_path.exists() {
            return Ok(());
        }
        let json = fs::read_to_string(&self.save_path)
            .with_context(|| format!("reading save file {}", self.save_path.display()))?;
        if json.trim().is_empty() {
            return Ok(());
        }
        let blob: DataBlob = serde_json::from_str(&json)
            .with_context(|| format!("parsing save file {}", self.save_path.display()))?;
        self.accumulated_score = blob.accumulated_score;
        Ok(())
    }
}

impl Session for Player {
    fn report_score(&mut self, event: ScoreEvent) {
        match event {
            ScoreEvent::BlockDestroyed => {
                self.score += BLOCK_DESTROYED_POINTS;
            }
            ScoreEvent::LineClear => {
                self.score += LINE_CLEAR_POINTS;
                self.grant_power_up();
            }
        }
    }

    fn power_up(&self) -> &PowerUp {
        &self.power_up
    }

    fn power_up_mut(&mut self) -> &mut PowerUp {
        &mut self.power_up
    }
}
