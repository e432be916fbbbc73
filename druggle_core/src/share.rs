//! Shareable result grid.
//!
//! One line of five glyphs per guess. Unlike gameplay feedback, a cell is
//! filled only when the guess's raw value equals the target's raw value
//! exactly, without trimming or case folding.

use crate::types::{Category, DrugRecord};

pub const FILLED: &str = "🟩";
pub const EMPTY: &str = "⬜";

/// Share-grid row for one guess
pub fn share_row(guess: &DrugRecord, target: &DrugRecord) -> String {
    Category::SHARE
        .into_iter()
        .map(|c| {
            if guess.value(c) == target.value(c) {
                FILLED
            } else {
                EMPTY
            }
        })
        .collect()
}

/// Format a finished session as shareable text
///
/// The header names the puzzle number and whether the target was found.
pub fn format_share(guesses: &[DrugRecord], target: &DrugRecord, day_number: i64) -> String {
    let won = guesses.iter().any(|g| g.is_named(&target.name));
    let header = if won {
        format!("🎉 I won Druggle #{}!", day_number)
    } else {
        format!("Druggle #{} X/{}", day_number, crate::session::MAX_ATTEMPTS)
    };

    let grid: Vec<String> = guesses.iter().map(|g| share_row(g, target)).collect();
    if grid.is_empty() {
        header
    } else {
        format!("{}\n{}", header, grid.join("\n"))
    }
}
