//! Key-binding configuration
//!
//! Bindings are a single owned value passed to whoever needs them, never
//! process-global state. They serialize to JSON so a session can save and
//! reload a rebound layout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::types::Command;

/// Default bindings location, relative to the working directory.
pub const DEFAULT_BINDINGS_PATH: &str = "data/bindings.json";

/// Key-to-command map.
///
/// Stored as pairs rather than a map because JSON object keys must be
/// strings and `KeyCode` is not one. The handful of entries makes a linear
/// scan fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    entries: Vec<(KeyCode, Command)>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            entries: vec![
                (KeyCode::Char('a'), Command::MoveLeft),
                (KeyCode::Left, Command::MoveLeft),
                (KeyCode::Char('d'), Command::MoveRight),
                (KeyCode::Right, Command::MoveRight),
                (KeyCode::Char('e'), Command::RotateCw),
                (KeyCode::Up, Command::RotateCw),
                (KeyCode::Char('q'), Command::RotateCcw),
                (KeyCode::Char('p'), Command::TriggerPowerUp),
            ],
        }
    }
}

impl Bindings {
    /// Look up the command bound to a key, if any.
    pub fn command_for(&self, key: KeyCode) -> Option<Command> {
        self.entries
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|&(_, command)| command)
    }

    /// Bind `key` to `command`, replacing any previous binding of that key.
    pub fn rebind(&mut self, key: KeyCode, command: Command) {
        self.entries.retain(|(bound, _)| *bound != key);
        self.entries.push((key, command));
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating config directory {}", parent.display()))?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("writing bindings file {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading bindings file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("parsing bindings file {}", path.display()))
    }

    /// Load from `path`, falling back to defaults when the file is absent
    /// or unreadable.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
