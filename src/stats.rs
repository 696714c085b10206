//! Read-only aggregation over the problem set.

use crate::text::parse_expected_time;
use crate::traits::{Difficulty, Problem};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionStats {
    pub completed: usize,
    pub total: usize,
    /// Rounded to a whole percentage, zero for an empty set.
    pub percent: u32,
}

pub fn completion_stats(problems: &[Problem]) -> CompletionStats {
    let completed = problems.iter().filter(|p| p.is_complete).count();
    let total = problems.len();
    let percent = if total == 0 {
        0
    } else {
        (100.0 * completed as f64 / total as f64).round() as u32
    };
    CompletionStats {
        completed,
        total,
        percent,
    }
}

/// Mean duration in seconds of the first solve of every completed problem of this difficulty.
/// Review attempts are not counted.
pub fn average_solve_duration(problems: &[Problem], difficulty: Difficulty) -> Option<f64> {
    let firsts = problems
        .iter()
        .filter(|p| p.difficulty == difficulty && p.is_complete)
        .filter_map(Problem::first_time)
        .collect::<Vec<u32>>();
    if firsts.is_empty() {
        return None;
    }
    let sum: u64 = firsts.iter().map(|&t| u64::from(t)).sum();
    Some(sum as f64 / firsts.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreakMetrics {
    /// Calendar span since the first ever completion, counting the first day as one.
    pub days_active: i64,
    pub daily_average: f64,
}

/// `None` if nothing has been completed yet.
pub fn streak_metrics(problems: &[Problem], now: DateTime<Utc>) -> Option<StreakMetrics> {
    let earliest = problems.iter().filter_map(|p| p.completion_date).min()?;
    let days_active = ((now - earliest).num_days() + 1).max(1);
    let completed = problems.iter().filter(|p| p.is_complete).count();
    Some(StreakMetrics {
        days_active,
        daily_average: completed as f64 / days_active as f64,
    })
}

/// Completed problems, most recently completed first, at most `limit` of them.
pub fn recently_completed(problems: &[Problem], limit: usize) -> Vec<&Problem> {
    let mut done = problems
        .iter()
        .filter(|p| p.is_complete && p.completion_date.is_some())
        .collect::<Vec<&Problem>>();
    // Stable, so equal dates keep curriculum order.
    done.sort_by(|a, b| b.completion_date.cmp(&a.completion_date));
    done.truncate(limit);
    done
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Fast,
    Slow,
}

/// A completed problem together with the numbers shown for it in the recency view.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentEntry<'a> {
    pub problem: &'a Problem,
    pub expected_seconds: Option<u32>,
    /// First solve minus expected time, in seconds.
    pub delta: Option<i64>,
    pub days_since_completion: i64,
}

impl RecentEntry<'_> {
    pub fn pace(&self) -> Option<Pace> {
        self.delta
            .map(|d| if d < 0 { Pace::Fast } else { Pace::Slow })
    }
}

pub fn recent_entry(problem: &Problem, now: DateTime<Utc>) -> RecentEntry<'_> {
    let expected_seconds = parse_expected_time(&problem.time_expected);
    let delta = problem
        .first_time()
        .zip(expected_seconds)
        .map(|(taken, expected)| i64::from(taken) - i64::from(expected));
    let days_since_completion = problem
        .completion_date
        .map(|d| ((now - d).num_seconds() as f64 / 86_400.0).round() as i64)
        .unwrap_or(0);
    RecentEntry {
        problem,
        expected_seconds,
        delta,
        days_since_completion,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub completed: usize,
    pub total: usize,
}

impl CategoryStats {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.completed as f64 / self.total as f64
        }
    }
}

/// Completed and total counts per category, categories in alphabetical order.
pub fn category_breakdown(problems: &[Problem]) -> BTreeMap<String, CategoryStats> {
    let mut res: BTreeMap<String, CategoryStats> = Default::default();
    for p in problems.iter() {
        let entry = res.entry(p.category.clone()).or_default();
        entry.total += 1;
        if p.is_complete {
            entry.completed += 1;
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 20, 18, 0, 0).unwrap()
    }

    fn solved(name: &str, difficulty: Difficulty, days_ago: i64, times: &[u32]) -> Problem {
        let mut p = Problem::new(name, "https://x", "Array", difficulty, "20 minutes");
        p.is_complete = true;
        p.completion_date = Some(now() - Duration::days(days_ago));
        p.times_taken = times.to_vec();
        p.attempts = times.len() as u32;
        p
    }

    fn pending(name: &str) -> Problem {
        Problem::new(name, "https://x", "Graph", Difficulty::Medium, "30 minutes")
    }

    fn ten_with_three_done() -> Vec<Problem> {
        let mut problems = (0..7).map(|i| pending(&format!("p{i}"))).collect::<Vec<_>>();
        problems.push(solved("a", Difficulty::Easy, 4, &[600, 200]));
        problems.push(solved("b", Difficulty::Easy, 2, &[900]));
        problems.push(solved("c", Difficulty::Hard, 0, &[2400]));
        problems
    }

    #[test]
    fn test_completion_stats() {
        let stats = completion_stats(&ten_with_three_done());
        assert_eq!(
            stats,
            CompletionStats {
                completed: 3,
                total: 10,
                percent: 30
            }
        );
        assert_eq!(completion_stats(&[]).percent, 0);
        let two_of_three = vec![
            solved("a", Difficulty::Easy, 1, &[1]),
            solved("b", Difficulty::Easy, 1, &[1]),
            pending("c"),
        ];
        assert_eq!(completion_stats(&two_of_three).percent, 67);
    }

    #[test]
    fn test_average_uses_first_solve_only() {
        let problems = ten_with_three_done();
        assert_eq!(average_solve_duration(&problems, Difficulty::Easy), Some(750.0));
        assert_eq!(average_solve_duration(&problems, Difficulty::Hard), Some(2400.0));
        assert_eq!(average_solve_duration(&problems, Difficulty::Medium), None);
    }

    #[test]
    fn test_streak_metrics() {
        let problems = ten_with_three_done();
        let streak = streak_metrics(&problems, now()).unwrap();
        assert_eq!(streak.days_active, 5);
        assert!((streak.daily_average - 0.6).abs() < 1e-9);

        // Part of a day still counts as the first day.
        let streak = streak_metrics(&problems, now() - Duration::hours(4 * 24 - 1)).unwrap();
        assert_eq!(streak.days_active, 1);

        assert_eq!(streak_metrics(&[pending("x")], now()), None);
    }

    #[test]
    fn test_recently_completed() {
        let mut problems = ten_with_three_done();
        problems.push(solved("d", Difficulty::Medium, 2, &[100]));
        let recent = recently_completed(&problems, 3);
        let names = recent.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["c", "b", "d"]);
        assert_eq!(recently_completed(&problems, 10).len(), 4);
        assert!(recently_completed(&problems, 0).is_empty());
    }

    #[test]
    fn test_recent_entry() {
        let p = solved("a", Difficulty::Easy, 3, &[900, 100]);
        let entry = recent_entry(&p, now());
        assert_eq!(entry.expected_seconds, Some(1200));
        assert_eq!(entry.delta, Some(-300));
        assert_eq!(entry.pace(), Some(Pace::Fast));
        assert_eq!(entry.days_since_completion, 3);

        let p = solved("b", Difficulty::Easy, 0, &[1200]);
        assert_eq!(recent_entry(&p, now()).pace(), Some(Pace::Slow));

        let mut p = solved("c", Difficulty::Easy, 0, &[10]);
        p.time_expected = "unknown".to_owned();
        assert_eq!(recent_entry(&p, now()).pace(), None);
    }

    #[test]
    fn test_category_breakdown() {
        let breakdown = category_breakdown(&ten_with_three_done());
        assert_eq!(
            breakdown.get("Array"),
            Some(&CategoryStats {
                completed: 3,
                total: 3
            })
        );
        assert_eq!(breakdown.get("Graph").unwrap().total, 7);
        assert_eq!(breakdown.get("Graph").unwrap().percent(), 0.0);
        assert_eq!(breakdown.keys().collect::<Vec<_>>(), vec!["Array", "Graph"]);
    }
}
