//! Daily puzzle selection.
//!
//! Every player gets the same target on the same local calendar day: the
//! number of whole days since the reference date, modulo catalog length.

use crate::{Catalog, DrugRecord};
use chrono::{DateTime, Local, NaiveDate, TimeZone};

/// Epoch day 0 of the puzzle sequence
pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Today's date in the host's local time zone
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole calendar days from `reference` to `today` (negative before it)
pub fn days_elapsed(reference: NaiveDate, today: NaiveDate) -> i64 {
    today.signed_duration_since(reference).num_days()
}

/// The puzzle selected for one calendar day
#[derive(Clone, Debug)]
pub struct DailyPuzzle<'a> {
    /// Days since the reference date
    pub day_index: i64,
    pub target: &'a DrugRecord,
}

impl DailyPuzzle<'_> {
    /// 1-based puzzle number shown to players
    ///
    /// Days before the reference date all show as #1; the target still
    /// follows `day_index`.
    pub fn number(&self) -> i64 {
        (self.day_index + 1).max(1)
    }
}

/// Select the puzzle for a calendar day
pub fn puzzle_for_date(catalog: &Catalog, reference: NaiveDate, today: NaiveDate) -> DailyPuzzle<'_> {
    let day_index = days_elapsed(reference, today);
    // Catalog is never empty, so the modulus is non-zero.
    let index = day_index.rem_euclid(catalog.len() as i64) as usize;
    tracing::debug!("Day {} selects catalog index {}", day_index, index);

    DailyPuzzle {
        day_index,
        target: &catalog.drugs()[index],
    }
}

/// Select the target for the calendar day containing `now`, in `now`'s time zone
pub fn select_daily<'a, Tz: TimeZone>(
    catalog: &'a Catalog,
    reference: NaiveDate,
    now: &DateTime<Tz>,
) -> &'a DrugRecord {
    puzzle_for_date(catalog, reference, now.date_naive()).target
}
