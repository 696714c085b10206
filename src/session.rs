use crate::error::Result;
use crate::recorder::{record_attempt, Recorded};
use crate::report::{
    bullet_list, category_detail, category_labels, problem_header, progress_report, recent_report,
};
use crate::scheduler::{
    due_for_review, postpone_review, schedule_review, select_next, suggest_in_category,
};
use crate::traits::*;
use chrono::{DateTime, Utc};

/*
Implements the interactive flow;
    Load problems from the store.

    Main menu;
        Next problem:
            Select first pending or due problem from the cursor
            Ask for outcome
                skip -> advance cursor, select again
            Ask for observation
            Record outcome
            Save
            If solved, ask for review schedule, save

        Review queue:
            For each due problem: attempt it, postpone it, or stop.

        Reports: read only, shown until the user continues.

    Every prompt can be cancelled, that abandons the current action only.
*/

const OUTCOME_HELP: &str = "Enter time taken in m:ss format. Put 0 if you forgot to time it. \
Enter 'fail' if you couldn't solve it. Enter 'skip' to skip. Press Esc or Ctrl+C to cancel.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Progress,
    Recent,
    Review,
    Categories,
    Exit,
}

impl Action {
    fn label(&self, due: usize) -> String {
        match self {
            Action::Next => "Open next problem".to_owned(),
            Action::Progress => "View progress".to_owned(),
            Action::Recent => "View recently completed problems".to_owned(),
            Action::Review => format!("Review problems ({due} due)"),
            Action::Categories => "Browse problems by category".to_owned(),
            Action::Exit => "Exit".to_owned(),
        }
    }
}

pub type Clock = Box<dyn Fn() -> DateTime<Utc>>;

/// Owns the problem set for the duration of the program and runs the menu on top of it.
pub struct Session {
    problems: Vec<Problem>,
    store: Box<dyn ProblemStore>,
    prompter: Box<dyn Prompter>,
    clock: Clock,
    recent_limit: usize,
}

impl Session {
    /// Load the problems from the store; failing to do so is fatal for the session.
    pub fn new(mut store: Box<dyn ProblemStore>, prompter: Box<dyn Prompter>) -> Result<Self> {
        let problems = store.load()?;
        Ok(Session {
            problems,
            store,
            prompter,
            clock: Box::new(Utc::now),
            recent_limit: 5,
        })
    }

    /// Replace the source of the current time.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn save(&mut self) -> Result<()> {
        self.store.save(&self.problems)
    }

    /// Show the main menu until the user exits or cancels it.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let due = due_for_review(&self.problems, self.now()).len();
            let mut actions = vec![Action::Next, Action::Progress, Action::Recent];
            if due > 0 {
                actions.push(Action::Review);
            }
            actions.push(Action::Categories);
            actions.push(Action::Exit);
            let labels = actions.iter().map(|a| a.label(due)).collect::<Vec<_>>();

            let choice = self.prompter.select("Select an action:", &labels)?;
            let action = match choice.and_then(|i| actions.get(i)) {
                Some(action) => *action,
                None => break,
            };
            tracing::debug!(?action, "menu action");
            match action {
                Action::Next => self.next_problem(0)?,
                Action::Progress => self.show_progress()?,
                Action::Recent => self.show_recent()?,
                Action::Review => self.review_queue()?,
                Action::Categories => self.browse_categories()?,
                Action::Exit => break,
            }
        }
        Ok(())
    }

    /// Offer the first eligible problem at or after `start`, moving on for every skip.
    pub fn next_problem(&mut self, start: usize) -> Result<()> {
        let mut start = start;
        loop {
            let Some(index) = select_next(&self.problems, start, self.now()) else {
                let message = if start == 0 {
                    "Congratulations! All problems are completed."
                } else {
                    "No more problems after the skipped ones."
                };
                return self.prompter.note(Tone::Warning, message);
            };
            match self.attempt(index)? {
                Some(Recorded::Skipped) => start = index + 1,
                _ => return Ok(()),
            }
        }
    }

    /// Run the outcome, observation and review prompts for one problem. `None` if the user
    /// cancelled before the outcome was recorded, or if there is no problem at `index`.
    pub fn attempt(&mut self, index: usize) -> Result<Option<Recorded>> {
        let Some(problem) = self.problems.get(index) else {
            tracing::warn!(index, "no problem at index");
            return Ok(None);
        };
        let header = problem_header(index, problem, self.now());
        let message = format!("{header}\n{OUTCOME_HELP}");
        let (outcome, token) = loop {
            let Some(input) = self.prompter.text(&message, "skip")? else {
                return Ok(None);
            };
            match input.parse::<Outcome>() {
                Ok(outcome) => break (outcome, input.trim().to_owned()),
                Err(e) => self.prompter.note(Tone::Warning, &e.to_string())?,
            }
        };
        if outcome == Outcome::Skip {
            return Ok(Some(Recorded::Skipped));
        }

        let question = if outcome == Outcome::Fail {
            "What observations did you make about your failure?"
        } else {
            "Any observations about the problem?"
        };
        let Some(observation) = self.prompter.text(question, "")? else {
            return Ok(None);
        };

        let now = self.now();
        let recorded = record_attempt(&mut self.problems[index], outcome, Some(&observation), now);
        self.save()?;

        match recorded {
            Recorded::Failed => {
                self.prompter
                    .note(Tone::Warning, "Problem marked for review tomorrow.")?;
            }
            Recorded::Solved { .. } => {
                let labels = ReviewChoice::OFFERED
                    .iter()
                    .map(ReviewChoice::label)
                    .collect::<Vec<_>>();
                let choice = self.prompter.select("Schedule review?", &labels)?;
                let Some(choice) = choice.and_then(|i| ReviewChoice::OFFERED.get(i).copied()) else {
                    // The attempt itself is already saved.
                    return Ok(Some(recorded));
                };
                let now = self.now();
                schedule_review(&mut self.problems[index], choice, now);
                self.save()?;
                if let ReviewChoice::InDays(days) = choice {
                    let plural = if days > 1 { "s" } else { "" };
                    self.prompter.note(
                        Tone::Success,
                        &format!("Review scheduled in {days} day{plural}."),
                    )?;
                }
                let problem = &self.problems[index];
                let summary = format!(
                    "Nice job! Your progress has been updated.\nYou completed a {} {} problem in {token}.",
                    problem.difficulty.as_str().to_lowercase(),
                    problem.category
                );
                self.prompter.note(Tone::Success, &summary)?;
            }
            Recorded::Skipped => {}
        }
        Ok(Some(recorded))
    }

    /// Walk through every problem that is due, one at a time.
    pub fn review_queue(&mut self) -> Result<()> {
        let queue = due_for_review(&self.problems, self.now());
        for index in queue {
            let problem = &self.problems[index];
            if !problem.is_due(self.now()) {
                continue;
            }
            let mut message = format!("Review {}?", problem.name);
            if !problem.observations.is_empty() {
                message.push_str("\nPrevious observations:\n");
                message.push_str(&bullet_list(&problem.observations));
            }
            let options = ["Yes", "Skip", "Cancel review session"]
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>();
            match self.prompter.select(&message, &options)? {
                Some(0) => {
                    // This problem, not the next one in curriculum order.
                    self.attempt(index)?;
                }
                Some(1) => {
                    let now = self.now();
                    postpone_review(&mut self.problems[index], now);
                    self.save()?;
                    self.prompter
                        .note(Tone::Warning, "Problem review postponed to tomorrow.")?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    pub fn show_progress(&mut self) -> Result<()> {
        let report = progress_report(&self.problems, self.now());
        self.prompter.show(&report)
    }

    pub fn show_recent(&mut self) -> Result<()> {
        match recent_report(&self.problems, self.now(), self.recent_limit) {
            Some(report) => self.prompter.show(&report),
            None => self
                .prompter
                .note(Tone::Warning, "No completed problems found."),
        }
    }

    /// List categories with their progress; picking one lists its problems.
    pub fn browse_categories(&mut self) -> Result<()> {
        let mut rng = rand::thread_rng();
        loop {
            let categories = category_labels(&self.problems);
            let mut options = vec!["Go back".to_owned()];
            options.extend(categories.iter().map(|(_, label)| label.clone()));
            let choice = self.prompter.select("Select a category:", &options)?;
            let Some((category, label)) = choice
                .filter(|&i| i > 0)
                .and_then(|i| categories.get(i - 1))
            else {
                return Ok(());
            };
            let suggested = suggest_in_category(&self.problems, category, &mut rng);
            let detail = category_detail(&self.problems, category, suggested);
            self.prompter.show(&format!("{label}\n{detail}"))?;
        }
    }
}
