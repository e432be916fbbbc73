//! Core domain types for the Druggle game.
//!
//! This module defines the fundamental types used throughout the system:
//! - Drug records and their classification categories
//! - Per-category match feedback
//! - Achievements unlocked by winning sessions

use serde::{Deserialize, Serialize};

// ============================================================================
// Drug Records
// ============================================================================

/// A single catalog entry: the thing the player is trying to identify.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrugRecord {
    pub name: String,
    pub therapeutic_class: String,
    pub molecule_class: String,
    pub route: String,
    pub prescription: String,
    pub mechanism: String,
    pub target_system: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl DrugRecord {
    /// Raw (non-normalized) value of a classification category
    pub fn value(&self, category: Category) -> &str {
        match category {
            Category::TherapeuticClass => &self.therapeutic_class,
            Category::MoleculeClass => &self.molecule_class,
            Category::Route => &self.route,
            Category::Prescription => &self.prescription,
            Category::Mechanism => &self.mechanism,
            Category::TargetSystem => &self.target_system,
        }
    }

    /// Case-insensitive, whitespace-trimmed identity check
    pub fn is_named(&self, name: &str) -> bool {
        normalize(&self.name) == normalize(name)
    }
}

/// Normalize a free-form value for comparison: trim, then lower-case.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

// ============================================================================
// Categories
// ============================================================================

/// Classification attribute compared between a guess and the target
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    TherapeuticClass,
    MoleculeClass,
    Route,
    Prescription,
    Mechanism,
    TargetSystem,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 6] = [
        Category::TherapeuticClass,
        Category::MoleculeClass,
        Category::Route,
        Category::Prescription,
        Category::Mechanism,
        Category::TargetSystem,
    ];

    /// Categories eligible for hint disclosure (prescription status is never hinted)
    pub const HINTABLE: [Category; 5] = [
        Category::TherapeuticClass,
        Category::MoleculeClass,
        Category::Route,
        Category::Mechanism,
        Category::TargetSystem,
    ];

    /// Column order of the share grid
    pub const SHARE: [Category; 5] = [
        Category::TherapeuticClass,
        Category::MoleculeClass,
        Category::Route,
        Category::Mechanism,
        Category::TargetSystem,
    ];

    /// Stable string key (matches the catalog field name)
    pub fn key(self) -> &'static str {
        match self {
            Category::TherapeuticClass => "therapeutic_class",
            Category::MoleculeClass => "molecule_class",
            Category::Route => "route",
            Category::Prescription => "prescription",
            Category::Mechanism => "mechanism",
            Category::TargetSystem => "target_system",
        }
    }

    /// Human-readable column label
    pub fn label(self) -> &'static str {
        match self {
            Category::TherapeuticClass => "Therapeutic Class",
            Category::MoleculeClass => "Molecule Class",
            Category::Route => "Route",
            Category::Prescription => "Prescription",
            Category::Mechanism => "Mechanism",
            Category::TargetSystem => "Target System",
        }
    }

    pub fn is_hintable(self) -> bool {
        self != Category::Prescription
    }
}

// ============================================================================
// Feedback Types
// ============================================================================

/// Result of comparing one category value against the target
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Match,
    None,
}

impl MatchStatus {
    pub fn is_match(self) -> bool {
        self == MatchStatus::Match
    }
}

/// Feedback for a single category of a guess
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryFeedback {
    pub category: Category,
    pub value: String,
    pub status: MatchStatus,
}

/// Feedback for a whole guess, one cell per category in display order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessFeedback {
    pub name: String,
    pub cells: Vec<CategoryFeedback>,
}

// ============================================================================
// Achievements
// ============================================================================

/// Achievements that can be unlocked by winning sessions
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstWin,
    WinWithoutHints,
}

impl Achievement {
    pub const ALL: [Achievement; 2] = [Achievement::FirstWin, Achievement::WinWithoutHints];

    /// Identifier persisted in the achievements list
    pub fn id(self) -> &'static str {
        match self {
            Achievement::FirstWin => "first_win",
            Achievement::WinWithoutHints => "win_without_hints",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Achievement::FirstWin => "First Win 🎉",
            Achievement::WinWithoutHints => "Win Without Hints 🏆",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

/// Friendly name for a persisted achievement id; unknown ids display as-is.
pub fn achievement_display(id: &str) -> &str {
    match Achievement::from_id(id) {
        Some(achievement) => achievement.display_name(),
        None => id,
    }
}
