//! Casefile
//!
//! A detective game where you walk a crime scene, bag clues, lean on
//! suspects and finally name a culprit, all before your credibility or your
//! turns run out.
//!
//! # Game Mechanics
//!
//! - **Credibility**: most actions cost one point and one turn
//! - **Evidence**: clues and suspects carry tags; shared tags make a case
//! - **Accusation**: name the culprit with at least two linking clues to win
//!
//! # Architecture
//!
//! - `data` - Clues, suspects, locations and the case timeline
//! - `game` - Case generation, the session engine, tag matching, commands
//! - `config` - Fixed rules and launch options
//! - `tui` - Terminal user interface with ratatui

pub mod config;
pub mod data;
pub mod game;
pub mod tui;

pub use data::*;
pub use game::{ActionDetail, ActionOutcome, Game, Verdict};

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the binary and front end
pub type Result<T> = anyhow::Result<T>;

/// Why the engine rejected an action. State is never changed by a rejection.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CaseError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unknown suspect: {0}")]
    UnknownSuspect(String),

    #[error("No clue {0} here")]
    ClueNotHere(ClueId),

    #[error("You already collected clue {0}")]
    AlreadyCollected(ClueId),

    #[error("Clue id must be a number, got '{0}'")]
    MalformedClueId(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("The case is closed. {0}")]
    CaseClosed(Verdict),

    #[error("Case generation failed: {0}")]
    Generation(String),
}

/// Derive a generator seed from the wall clock, for unseeded play
pub fn seed_from_clock() -> u64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .map(|n| n as u64)
        .unwrap_or_else(|| now.timestamp_millis() as u64)
}
