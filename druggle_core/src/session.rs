//! Game session state machine.
//!
//! A session owns one play-through against one target:
//! - Guesses resolve against the catalog and are appended in order
//! - Hints disclose target values for randomly chosen categories
//! - Reaching the target or running out of attempts is terminal
//!
//! Terminal sessions ignore guesses and hints until reset.

use crate::error::GuessError;
use crate::matching::evaluate_guess;
use crate::types::*;
use crate::Catalog;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Number of guesses allowed per session
pub const MAX_ATTEMPTS: usize = 6;

/// Where a session is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Guessing,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::Guessing)
    }
}

/// What happened to an accepted guess
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Appended to the guess list; carries the status afterwards
    Recorded(SessionStatus),
    /// Same drug as the previous guess; nothing changed
    Repeated,
    /// Session already finished; nothing changed
    Ignored,
}

/// One play-through against one target
#[derive(Clone, Debug)]
pub struct GameSession {
    id: Uuid,
    target: DrugRecord,
    guesses: Vec<DrugRecord>,
    hints_revealed: Vec<Category>,
    status: SessionStatus,
    error: Option<GuessError>,
}

impl GameSession {
    pub fn new(target: DrugRecord) -> Self {
        tracing::debug!("New session targeting {}", target.name);
        Self {
            id: Uuid::new_v4(),
            target,
            guesses: Vec::new(),
            hints_revealed: Vec::new(),
            status: SessionStatus::Guessing,
            error: None,
        }
    }

    /// Identity of this play-through; changes on every reset
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target(&self) -> &DrugRecord {
        &self.target
    }

    pub fn guesses(&self) -> &[DrugRecord] {
        &self.guesses
    }

    /// Hinted categories, in reveal order
    pub fn hints_revealed(&self) -> &[Category] {
        &self.hints_revealed
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Last rejected guess, cleared by an accepted guess or reset
    pub fn error(&self) -> Option<&GuessError> {
        self.error.as_ref()
    }

    pub fn has_won(&self) -> bool {
        self.status == SessionStatus::Won
    }

    pub fn has_lost(&self) -> bool {
        self.status == SessionStatus::Lost
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn attempts_remaining(&self) -> usize {
        MAX_ATTEMPTS.saturating_sub(self.guesses.len())
    }

    /// The target's blurb, only once it has been guessed
    pub fn summary(&self) -> Option<&str> {
        if self.has_won() {
            self.target.summary.as_deref()
        } else {
            None
        }
    }

    /// Submit a guess by name
    ///
    /// Unknown names are rejected and recorded as the session's error state.
    /// A repeat of the immediately preceding guess is a no-op, as is any guess
    /// once the session is terminal.
    pub fn submit_guess(
        &mut self,
        catalog: &Catalog,
        name: &str,
    ) -> std::result::Result<GuessOutcome, GuessError> {
        if self.is_terminal() {
            tracing::debug!("Ignoring guess '{}' on finished session", name);
            return Ok(GuessOutcome::Ignored);
        }

        let Some(drug) = catalog.find(name) else {
            let err = GuessError::UnknownDrug {
                name: name.trim().to_string(),
            };
            self.error = Some(err.clone());
            return Err(err);
        };

        self.error = None;

        if self.guesses.last().is_some_and(|prev| prev.is_named(&drug.name)) {
            tracing::debug!("Suppressing repeated guess {}", drug.name);
            return Ok(GuessOutcome::Repeated);
        }

        self.guesses.push(drug.clone());
        self.status = self.evaluate_status();

        tracing::debug!(
            "Guess {}/{}: {} -> {:?}",
            self.guesses.len(),
            MAX_ATTEMPTS,
            drug.name,
            self.status
        );

        Ok(GuessOutcome::Recorded(self.status))
    }

    fn evaluate_status(&self) -> SessionStatus {
        if self.guesses.iter().any(|g| g.is_named(&self.target.name)) {
            SessionStatus::Won
        } else if self.guesses.len() >= MAX_ATTEMPTS {
            SessionStatus::Lost
        } else {
            SessionStatus::Guessing
        }
    }

    /// Reveal one not-yet-revealed hintable category, chosen uniformly at random
    ///
    /// Returns `None` when hints are exhausted or the session is terminal.
    pub fn reveal_hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Category> {
        if self.is_terminal() {
            return None;
        }

        let remaining: Vec<Category> = Category::HINTABLE
            .into_iter()
            .filter(|c| !self.hints_revealed.contains(c))
            .collect();

        let next = *remaining.choose(rng)?;
        self.hints_revealed.push(next);
        tracing::debug!("Revealed hint {} ({} total)", next.key(), self.hints_revealed.len());
        Some(next)
    }

    pub fn hints_exhausted(&self) -> bool {
        self.hints_revealed.len() >= Category::HINTABLE.len()
    }

    /// Revealed hints paired with the target's value, in reveal order
    pub fn revealed_hints(&self) -> Vec<(Category, &str)> {
        self.hints_revealed
            .iter()
            .map(|&c| (c, self.target.value(c)))
            .collect()
    }

    /// Per-category feedback for every guess, in submission order
    pub fn feedback(&self) -> Vec<GuessFeedback> {
        self.guesses
            .iter()
            .map(|g| evaluate_guess(&self.target, g))
            .collect()
    }

    /// Start over against the same target
    pub fn reset(&mut self) {
        self.id = Uuid::new_v4();
        self.guesses.clear();
        self.hints_revealed.clear();
        self.error = None;
        self.status = SessionStatus::Guessing;
        tracing::debug!("Session reset");
    }

    /// Start over against a new target (e.g. the day rolled over)
    pub fn reset_with_target(&mut self, target: DrugRecord) {
        self.target = target;
        self.reset();
    }
}
