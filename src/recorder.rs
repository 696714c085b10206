// Applies what the user reported about an attempt to the problem's record.

use crate::scheduler::days_from;
use crate::traits::{Outcome, Problem};
use chrono::{DateTime, Utc};

/// What recording an outcome did to the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// Nothing changed, the caller should move on to the next candidate.
    Skipped,
    /// Attempt counted and a retry scheduled for tomorrow.
    Failed,
    /// Attempt counted and its time stored; the caller should ask for a review schedule.
    Solved { first_solve: bool },
}

/// Record an outcome on a problem. Empty observations are dropped.
pub fn record_attempt(
    problem: &mut Problem,
    outcome: Outcome,
    observation: Option<&str>,
    now: DateTime<Utc>,
) -> Recorded {
    if outcome == Outcome::Skip {
        return Recorded::Skipped;
    }

    problem.attempts += 1;
    if let Some(text) = observation.map(str::trim).filter(|t| !t.is_empty()) {
        problem.observations.push(text.to_owned());
    }

    let recorded = if let Outcome::Solved(seconds) = outcome {
        let first_solve = !problem.is_complete;
        if first_solve {
            problem.is_complete = true;
            problem.completion_date = Some(now);
        }
        problem.times_taken.push(seconds);
        Recorded::Solved { first_solve }
    } else {
        // Overwrites any earlier schedule.
        problem.review_scheduled = Some(days_from(now, 1));
        Recorded::Failed
    };
    tracing::debug!(name = %problem.name, ?outcome, attempts = problem.attempts, "recorded attempt");
    recorded
}
