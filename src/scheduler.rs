//! Deciding which problem comes next and when a solved problem is due again.

use crate::traits::{Problem, ReviewChoice};
use chrono::{DateTime, Days, Duration, Local, TimeZone, Utc};

/// Where a problem stands with respect to the "next problem" scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Never solved, may be offered.
    Pending,
    /// Never solved, but failed recently and waiting for its retry date.
    Locked,
    /// Solved, and its review date has arrived.
    Due,
    /// Solved and not scheduled for review (yet).
    Settled,
}

impl Status {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Status::Pending | Status::Due)
    }
}

pub fn classify(problem: &Problem, now: DateTime<Utc>) -> Status {
    match (problem.is_complete, problem.is_due(now)) {
        (false, _) if problem.is_review_locked(now) => Status::Locked,
        (false, _) => Status::Pending,
        (true, true) => Status::Due,
        (true, false) => Status::Settled,
    }
}

/// Index of the first eligible problem at or after `start`.
pub fn select_next(problems: &[Problem], start: usize, now: DateTime<Utc>) -> Option<usize> {
    let found = problems
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, p)| classify(p, now).is_eligible())
        .map(|(i, _)| i);
    tracing::debug!(start, ?found, "selected next problem");
    found
}

/// Indices of all problems whose review date has arrived, in curriculum order.
pub fn due_for_review(problems: &[Problem], now: DateTime<Utc>) -> Vec<usize> {
    problems
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_due(now))
        .map(|(i, _)| i)
        .collect()
}

/// Add whole calendar days in the instant's own timezone, keeping the time of day.
pub fn add_calendar_days<Tz: TimeZone>(instant: DateTime<Tz>, days: u32) -> DateTime<Tz> {
    // Only fails if the resulting local time does not exist, fall back to plain arithmetic.
    instant
        .clone()
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or_else(|| instant + Duration::days(i64::from(days)))
}

/// The instant `days` calendar days after `now`, counted in the local timezone.
pub fn days_from(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    add_calendar_days(now.with_timezone(&Local), days).with_timezone(&Utc)
}

/// Apply the user's review choice, `No` clears any previous schedule.
pub fn schedule_review(problem: &mut Problem, choice: ReviewChoice, now: DateTime<Utc>) {
    problem.review_scheduled = match choice {
        ReviewChoice::No => None,
        ReviewChoice::InDays(days) => Some(days_from(now, days)),
    };
    tracing::debug!(name = %problem.name, review = ?problem.review_scheduled, "scheduled review");
}

/// Push a review back to tomorrow.
pub fn postpone_review(problem: &mut Problem, now: DateTime<Utc>) {
    schedule_review(problem, ReviewChoice::InDays(1), now);
}

/// Pick a random unsolved problem in a category.
pub fn suggest_in_category<R: rand::Rng + ?Sized>(
    problems: &[Problem],
    category: &str,
    rng: &mut R,
) -> Option<usize> {
    use rand::seq::SliceRandom;
    let pending = problems
        .iter()
        .enumerate()
        .filter(|(_, p)| p.category == category && !p.is_complete)
        .map(|(i, _)| i)
        .collect::<Vec<usize>>();
    pending.choose(rng).copied()
}
