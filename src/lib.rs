//! Terminal falling-block puzzle with powerup-driven board mutations.
//!
//! The `core` module holds the board simulation; `player`, `config`,
//! `input` and `term` are the thin collaborators around it.

pub mod config;
pub mod core;
pub mod input;
pub mod player;
pub mod term;
pub mod types;
