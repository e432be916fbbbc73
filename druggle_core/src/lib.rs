#![forbid(unsafe_code)]

//! Core game engine for Druggle, the daily drug-guessing game.
//!
//! This crate provides:
//! - Domain types (drug records, categories, feedback, achievements)
//! - Catalog management
//! - Daily puzzle selection
//! - Match engine and game session state machine
//! - Progress tracking over a durable key-value store
//! - Share-grid formatting

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod daily;
pub mod matching;
pub mod session;
pub mod store;
pub mod progress;
pub mod share;

// Re-export commonly used types
pub use error::{Error, GuessError, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog};
pub use config::Config;
pub use daily::{puzzle_for_date, select_daily, DailyPuzzle};
pub use matching::{compute_match, evaluate_guess};
pub use session::{GameSession, GuessOutcome, SessionStatus, MAX_ATTEMPTS};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use progress::{apply_win, ProgressState, ProgressTracker};
pub use share::format_share;
