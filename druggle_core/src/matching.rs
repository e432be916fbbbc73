//! Match engine: per-category feedback for a guess.
//!
//! Comparison is exact string equality after trimming and lower-casing.
//! There is no partial credit.

use crate::types::*;

/// Compare a category value against the target's value for that category
pub fn compute_match(target: &DrugRecord, category: Category, value: &str) -> MatchStatus {
    if normalize(target.value(category)) == normalize(value) {
        MatchStatus::Match
    } else {
        MatchStatus::None
    }
}

/// Feedback for every category of `guess`, in display order
pub fn evaluate_guess(target: &DrugRecord, guess: &DrugRecord) -> GuessFeedback {
    let cells = Category::ALL
        .into_iter()
        .map(|category| {
            let value = guess.value(category);
            CategoryFeedback {
                category,
                value: value.to_string(),
                status: compute_match(target, category, value),
            }
        })
        .collect();

    GuessFeedback {
        name: guess.name.clone(),
        cells,
    }
}
