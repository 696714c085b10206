//! Turning statistics into the text blocks shown to the user.

use crate::stats::{
    average_solve_duration, category_breakdown, completion_stats, recent_entry,
    recently_completed, streak_metrics,
};
use crate::text::{format_seconds_to_time, format_time_difference, render_progress_bar};
use crate::traits::{Difficulty, Problem};
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

/// Overall progress, streak and per-difficulty averages.
pub fn progress_report(problems: &[Problem], now: DateTime<Utc>) -> String {
    let completion = completion_stats(problems);
    let (days_active, daily_average) = streak_metrics(problems, now)
        .map(|s| (s.days_active, s.daily_average))
        .unwrap_or((0, 0.0));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}/{} ({}%)",
        completion.completed, completion.total, completion.percent
    );
    let _ = writeln!(out, "Daily average: {daily_average:.2} problems");
    let _ = writeln!(out, "Days completing problems: {days_active} days");
    let _ = writeln!(
        out,
        "{}",
        render_progress_bar(completion.completed, completion.total)
    );
    for difficulty in Difficulty::ALL {
        match average_solve_duration(problems, difficulty) {
            Some(avg) => {
                let _ = writeln!(
                    out,
                    "Average first-time completion for {difficulty} problems: {}",
                    format_seconds_to_time(avg.round() as u32)
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "No completed {difficulty} problems with valid time taken."
                );
            }
        }
    }
    out
}

/// The most recently completed problems with their times, `None` if nothing is complete.
pub fn recent_report(problems: &[Problem], now: DateTime<Utc>, limit: usize) -> Option<String> {
    let recent = recently_completed(problems, limit);
    if recent.is_empty() {
        return None;
    }
    let mut out = String::new();
    for problem in recent {
        let entry = recent_entry(problem, now);
        let completed = problem
            .completion_date
            .map(|d| d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} {} {} Completed: {} ({} days ago)",
            problem.name,
            problem.difficulty,
            problem.category,
            completed,
            entry.days_since_completion
        );
        let first = match problem.first_time() {
            Some(t) if t > 0 => format_seconds_to_time(t),
            _ => "0".to_owned(),
        };
        match entry.delta {
            Some(delta) => {
                let _ = writeln!(out, "Completed in {first} ({})", format_time_difference(delta));
            }
            None => {
                let _ = writeln!(out, "Completed in {first}");
            }
        }
        if problem.times_taken.len() > 1 {
            let reviews = problem.times_taken[1..]
                .iter()
                .map(|&t| format_seconds_to_time(t))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(out, "Review times: {reviews}");
        }
        if !problem.observations.is_empty() {
            let _ = writeln!(out, "Observations:\n{}", bullet_list(&problem.observations));
        }
        out.push_str("---\n");
    }
    Some(out)
}

/// Menu label per category, like "Graph (2/9, 22.2%)", paired with the category name.
pub fn category_labels(problems: &[Problem]) -> Vec<(String, String)> {
    category_breakdown(problems)
        .into_iter()
        .map(|(category, stats)| {
            let label = format!(
                "{category} ({}/{}, {:.1}%)",
                stats.completed,
                stats.total,
                stats.percent()
            );
            (category, label)
        })
        .collect()
}

/// Problems of one category, unsolved first with the suggested one marked.
pub fn category_detail(problems: &[Problem], category: &str, suggested: Option<usize>) -> String {
    let mut out = String::new();
    for (i, p) in problems.iter().enumerate() {
        if p.category != category || p.is_complete {
            continue;
        }
        if Some(i) == suggested {
            let _ = writeln!(out, "➤ {} {}", p.name, p.url);
        } else {
            let _ = writeln!(out, "  {} {}", p.name, p.url);
        }
    }
    for p in problems.iter().filter(|p| p.category == category && p.is_complete) {
        let _ = writeln!(out, "  {} {} (completed)", p.name, p.url);
    }
    out
}

/// Heading shown when a problem is opened, `index` is its curriculum position.
pub fn problem_header(index: usize, problem: &Problem, now: DateTime<Utc>) -> String {
    let review = if problem.is_due(now) { " [REVIEW]" } else { "" };
    format!(
        "{} {}: ~{} {}{}\n{}",
        index + 1,
        problem.name,
        problem.time_expected,
        problem.difficulty,
        review,
        problem.url
    )
}

pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}
