//! Progress tracking: win streak and unlocked achievements.
//!
//! Progress is read from a key-value store at startup and written back after
//! every change. Storage layout:
//! - `streak`: stringified non-negative integer
//! - `achievements`: JSON list of achievement identifiers

use crate::session::GameSession;
use crate::store::KeyValueStore;
use crate::types::{Achievement, Category};
use crate::Result;
use uuid::Uuid;

pub const STREAK_KEY: &str = "streak";
pub const ACHIEVEMENTS_KEY: &str = "achievements";

/// Durable, process-wide progress
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub streak: u32,
    /// Unlocked achievement ids; unknown ids from storage are kept verbatim
    pub achievements: Vec<String>,
}

impl ProgressState {
    /// Load progress from a store
    ///
    /// Missing or malformed entries fall back to defaults with a warning.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let streak = match store.get(STREAK_KEY)? {
            None => 0,
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed streak {:?}: {}", raw, e);
                0
            }),
        };

        let achievements = match store.get(ACHIEVEMENTS_KEY)? {
            None => Vec::new(),
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed achievements {:?}: {}", raw, e);
                Vec::new()
            }),
        };

        let mut state = Self {
            streak,
            achievements: Vec::new(),
        };
        for id in achievements {
            state.unlock_id(&id);
        }
        Ok(state)
    }

    /// Write both entries back to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(STREAK_KEY, &self.streak.to_string())?;
        store.set(ACHIEVEMENTS_KEY, &serde_json::to_string(&self.achievements)?)?;
        Ok(())
    }

    pub fn has(&self, achievement: Achievement) -> bool {
        self.achievements.iter().any(|a| a == achievement.id())
    }

    /// Unlock an achievement; returns false if it was already unlocked
    pub fn unlock(&mut self, achievement: Achievement) -> bool {
        self.unlock_id(achievement.id())
    }

    fn unlock_id(&mut self, id: &str) -> bool {
        if self.achievements.iter().any(|a| a == id) {
            return false;
        }
        self.achievements.push(id.to_string());
        true
    }
}

/// Apply the effects of one won session
///
/// Returns the achievements newly unlocked by this win.
pub fn apply_win(state: &mut ProgressState, hints_revealed: &[Category]) -> Vec<Achievement> {
    state.streak = state.streak.saturating_add(1);

    let mut unlocked = Vec::new();
    if state.unlock(Achievement::FirstWin) {
        unlocked.push(Achievement::FirstWin);
    }
    if hints_revealed.is_empty() && state.unlock(Achievement::WinWithoutHints) {
        unlocked.push(Achievement::WinWithoutHints);
    }
    unlocked
}

/// Owns the progress state and the store it persists to
pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
    state: ProgressState,
    last_applied: Option<Uuid>,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    /// Load progress from `store`
    pub fn open(store: S) -> Result<Self> {
        let state = ProgressState::load(&store)?;
        tracing::debug!(
            "Loaded progress: streak {}, {} achievements",
            state.streak,
            state.achievements.len()
        );
        Ok(Self {
            store,
            state,
            last_applied: None,
        })
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record the outcome of a session
    ///
    /// Only a won session changes anything, and each session is applied at
    /// most once. Losses leave the streak untouched. Returns newly unlocked
    /// achievements.
    pub fn on_session_resolved(&mut self, session: &GameSession) -> Result<Vec<Achievement>> {
        if !session.has_won() {
            return Ok(Vec::new());
        }
        if self.last_applied == Some(session.id()) {
            tracing::debug!("Session {} already recorded", session.id());
            return Ok(Vec::new());
        }

        // Commit to memory only once the store has accepted the new state.
        let mut next = self.state.clone();
        let unlocked = apply_win(&mut next, session.hints_revealed());
        next.save(&mut self.store)?;
        self.state = next;
        self.last_applied = Some(session.id());

        tracing::info!(
            "Recorded win: streak {}, unlocked {:?}",
            self.state.streak,
            unlocked
        );
        Ok(unlocked)
    }
}
