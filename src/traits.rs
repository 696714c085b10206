use crate::error::Result;
use chrono::{DateTime, Utc};

/// Difficulty tag of a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// One item of the curriculum and everything recorded about it.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub name: String,
    pub url: String,
    pub category: String,
    pub difficulty: Difficulty,

    /// Baseline duration as free text, like "15 minutes".
    pub time_expected: String,

    pub is_complete: bool,

    /// Moment of the first successful attempt.
    pub completion_date: Option<DateTime<Utc>>,

    /// Durations in seconds of every successful attempt, the first entry is the first solve.
    pub times_taken: Vec<u32>,

    /// All recorded attempts, successful or failed.
    pub attempts: u32,

    pub review_scheduled: Option<DateTime<Utc>>,

    pub observations: Vec<String>,
}

impl Problem {
    /// A fresh, never attempted problem.
    pub fn new(
        name: &str,
        url: &str,
        category: &str,
        difficulty: Difficulty,
        time_expected: &str,
    ) -> Self {
        Problem {
            name: name.to_owned(),
            url: url.to_owned(),
            category: category.to_owned(),
            difficulty,
            time_expected: time_expected.to_owned(),
            is_complete: false,
            completion_date: None,
            times_taken: vec![],
            attempts: 0,
            review_scheduled: None,
            observations: vec![],
        }
    }

    /// True if a review is scheduled at or before `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.review_scheduled.is_some_and(|t| t <= now)
    }

    /// True if a review is scheduled strictly after `now`.
    pub fn is_review_locked(&self, now: DateTime<Utc>) -> bool {
        self.review_scheduled.is_some_and(|t| t > now)
    }

    /// Duration of the first successful attempt.
    pub fn first_time(&self) -> Option<u32> {
        self.times_taken.first().copied()
    }
}

/// What the user reported after working on a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Solved in this many seconds, zero if the attempt wasn't timed.
    Solved(u32),
    Fail,
    Skip,
}

/// Answer to the "schedule review?" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewChoice {
    No,
    InDays(u32),
}

impl ReviewChoice {
    /// The choices offered after a successful attempt, in menu order.
    pub const OFFERED: [ReviewChoice; 4] = [
        ReviewChoice::No,
        ReviewChoice::InDays(1),
        ReviewChoice::InDays(3),
        ReviewChoice::InDays(5),
    ];

    pub fn label(&self) -> String {
        match self {
            ReviewChoice::No => "No".to_owned(),
            ReviewChoice::InDays(1) => "Tomorrow".to_owned(),
            ReviewChoice::InDays(d) => format!("In {d} days"),
        }
    }
}

/// Something that persists the full problem set.
pub trait ProblemStore: std::fmt::Debug {
    /// Retrieve the full problem set.
    fn load(&mut self) -> Result<Vec<Problem>>;

    /// Replace whatever was stored with this problem set.
    fn save(&mut self, problems: &[Problem]) -> Result<()>;
}

/// How a message shown to the user should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
}

/// The interactive surface. Every prompt returns `None` when the user cancels it.
pub trait Prompter {
    /// Offer a list of options, returns the index of the chosen one.
    fn select(&mut self, message: &str, options: &[String]) -> Result<Option<usize>>;

    /// Ask for a line of text, returned as typed, possibly empty.
    fn text(&mut self, message: &str, placeholder: &str) -> Result<Option<String>>;

    /// Show a short message.
    fn note(&mut self, tone: Tone, message: &str) -> Result<()>;

    /// Show a block of text and wait until the user has read it.
    fn show(&mut self, content: &str) -> Result<()>;
}
