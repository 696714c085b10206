// Implementations for the ProblemStore trait.

use crate::error::{Result, TrackerError};
use crate::traits::{Problem, ProblemStore};
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The curriculum that seeds a fresh data file.
pub const BUILTIN_TEMPLATE: &str = include_str!("../data/grind75.json");

static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{3})?Z$")
        .expect("timestamp pattern is valid")
});

/// Store that only keeps the problems in memory, counting how often they were saved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    problems: Vec<Problem>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
    pub fn from(problems: &[Problem]) -> Self {
        MemoryStore {
            problems: problems.to_vec(),
            saves: 0,
        }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ProblemStore for MemoryStore {
    fn load(&mut self) -> Result<Vec<Problem>> {
        Ok(self.problems.clone())
    }

    fn save(&mut self, problems: &[Problem]) -> Result<()> {
        self.problems = problems.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// Where the starting document comes from when there is no data file yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Builtin,
    File(PathBuf),
}

/// A store that reads and writes a json document.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    template: Template,
}

impl JsonStore {
    /// Create a store for the document at `path`, seeded from `template` on first load if the
    /// document does not exist.
    pub fn new(path: impl Into<PathBuf>, template: Template) -> Self {
        JsonStore {
            path: path.into(),
            template,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Put the starter document into place.
    fn bootstrap(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| TrackerError::Io {
                path: dir.to_owned(),
                source,
            })?;
        }
        match &self.template {
            Template::Builtin => {
                std::fs::write(&self.path, BUILTIN_TEMPLATE).map_err(|source| {
                    TrackerError::Io {
                        path: self.path.clone(),
                        source,
                    }
                })?;
            }
            Template::File(template) => {
                if !template.exists() {
                    return Err(TrackerError::TemplateMissing(template.clone()));
                }
                std::fs::copy(template, &self.path).map_err(|source| TrackerError::Io {
                    path: template.clone(),
                    source,
                })?;
            }
        }
        tracing::info!(path = %self.path.display(), template = ?self.template, "created problem data from template");
        Ok(())
    }
}

impl ProblemStore for JsonStore {
    fn load(&mut self) -> Result<Vec<Problem>> {
        if !self.path.exists() {
            self.bootstrap()?;
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| TrackerError::Io {
            path: self.path.clone(),
            source,
        })?;
        let problems = decode_document(&content, &self.path)?;
        tracing::info!(path = %self.path.display(), count = problems.len(), "loaded problems");
        Ok(problems)
    }

    fn save(&mut self, problems: &[Problem]) -> Result<()> {
        use std::fs::OpenOptions;
        use std::io::Write;
        let io_error = |source: std::io::Error| TrackerError::Io {
            path: self.path.clone(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(io_error)?;
        let mut writer = std::io::BufWriter::new(file);
        let records = problems.iter().map(StoredProblem::encode).collect::<Vec<_>>();
        serde_json::to_writer_pretty(&mut writer, &records).map_err(|source| {
            TrackerError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        writer.flush().map_err(io_error)?;
        tracing::info!(path = %self.path.display(), count = problems.len(), "saved problems");
        Ok(())
    }
}

/// Decode a full problem document, `path` is only used for error reporting.
pub fn decode_document(content: &str, path: &Path) -> Result<Vec<Problem>> {
    let records: Vec<StoredProblem> =
        serde_json::from_str(content).map_err(|source| TrackerError::Json {
            path: path.to_owned(),
            source,
        })?;
    records.into_iter().map(StoredProblem::decode).collect()
}

/// Encode a timestamp like `2024-06-01T09:30:00.000Z`.
pub fn encode_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Decode `YYYY-MM-DDTHH:MM:SS[.mmm]Z`, anything else is rejected.
pub fn decode_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if !TIMESTAMP.is_match(text) {
        return None;
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.fZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// A problem as it is written to disk. Older documents may lack fields or carry fields that
/// have since been replaced; those are optional here and resolved in `decode`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredProblem {
    name: String,
    url: String,
    category: String,
    difficulty: String,
    time_expected: String,
    #[serde(default)]
    is_complete: bool,
    #[serde(default)]
    completion_date: Option<String>,
    #[serde(default)]
    times_taken: Option<Vec<u32>>,
    #[serde(default)]
    attempts: Option<u32>,
    #[serde(default)]
    review_scheduled: Option<String>,
    #[serde(default)]
    observations: Option<Vec<String>>,

    /// Single duration, replaced by `times_taken`.
    #[serde(default, skip_serializing)]
    time_taken: Option<u32>,
    /// Single failure note, replaced by `observations`.
    #[serde(default, skip_serializing)]
    fail_desc: Option<String>,
}

impl StoredProblem {
    fn encode(problem: &Problem) -> Self {
        StoredProblem {
            name: problem.name.clone(),
            url: problem.url.clone(),
            category: problem.category.clone(),
            difficulty: problem.difficulty.to_string(),
            time_expected: problem.time_expected.clone(),
            is_complete: problem.is_complete,
            completion_date: problem.completion_date.as_ref().map(encode_timestamp),
            times_taken: Some(problem.times_taken.clone()),
            attempts: Some(problem.attempts),
            review_scheduled: problem.review_scheduled.as_ref().map(encode_timestamp),
            observations: Some(problem.observations.clone()),
            time_taken: None,
            fail_desc: None,
        }
    }

    fn decode(self) -> Result<Problem> {
        let name = self.name;
        let timestamp = |field: &'static str, value: Option<String>| -> Result<_> {
            match value {
                None => Ok(None),
                Some(v) => decode_timestamp(&v).map(Some).ok_or_else(|| {
                    TrackerError::InvalidTimestamp {
                        name: name.clone(),
                        field,
                        value: v,
                    }
                }),
            }
        };
        let completion_date = timestamp("completionDate", self.completion_date)?;
        let review_scheduled = timestamp("reviewScheduled", self.review_scheduled)?;
        let difficulty = self
            .difficulty
            .parse()
            .map_err(|message| TrackerError::InvalidRecord {
                name: name.clone(),
                message,
            })?;

        let mut times_taken = match (self.times_taken, self.time_taken) {
            (Some(times), _) => times,
            (None, Some(legacy)) if self.is_complete => {
                tracing::warn!(%name, "converted single timeTaken into timesTaken");
                vec![legacy]
            }
            (None, _) => vec![],
        };
        if self.is_complete && times_taken.is_empty() {
            tracing::warn!(%name, "complete problem without a recorded time, assuming 0:00");
            times_taken.push(0);
        }
        if !self.is_complete && !times_taken.is_empty() {
            return Err(TrackerError::InvalidRecord {
                name,
                message: "has recorded times but is not complete".to_owned(),
            });
        }

        let attempts = self.attempts.unwrap_or_else(|| {
            tracing::warn!(%name, "backfilled missing attempts");
            u32::from(self.is_complete)
        });
        let attempts = attempts.max(times_taken.len() as u32);

        let mut observations = self.observations.unwrap_or_default();
        // Migrated records may carry the note in both fields.
        if let Some(desc) = self.fail_desc.filter(|d| !d.is_empty()) {
            if !observations.contains(&desc) {
                observations.push(desc);
            }
        }

        Ok(Problem {
            name,
            url: self.url,
            category: self.category,
            difficulty,
            time_expected: self.time_expected,
            is_complete: self.is_complete,
            completion_date,
            times_taken,
            attempts,
            review_scheduled,
            observations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Difficulty;
    use chrono::TimeZone;

    fn sample() -> Vec<Problem> {
        let mut solved = Problem::new(
            "Valid Parentheses",
            "https://leetcode.com/problems/valid-parentheses/",
            "Stack",
            Difficulty::Easy,
            "20 minutes",
        );
        solved.is_complete = true;
        solved.completion_date = Some(Utc.with_ymd_and_hms(2024, 1, 31, 22, 5, 9).unwrap());
        solved.times_taken = vec![610, 300];
        solved.attempts = 3;
        solved.review_scheduled = Some(Utc.with_ymd_and_hms(2024, 2, 3, 22, 5, 9).unwrap());
        solved.observations = vec!["push the closing bracket".to_owned()];
        let fresh = Problem::new(
            "Word Ladder",
            "https://leetcode.com/problems/word-ladder/",
            "Graph",
            Difficulty::Hard,
            "45 minutes",
        );
        vec![solved, fresh]
    }

    #[test]
    fn test_timestamps() {
        let t = decode_timestamp("2024-02-03T22:05:09.123Z").unwrap();
        assert_eq!(encode_timestamp(&t), "2024-02-03T22:05:09.123Z");
        let t = decode_timestamp("2024-02-03T22:05:09Z").unwrap();
        assert_eq!(encode_timestamp(&t), "2024-02-03T22:05:09.000Z");
        assert!(decode_timestamp("2024-02-03 22:05:09").is_none());
        assert!(decode_timestamp("2024-02-03T22:05:09.12Z").is_none());
        assert!(decode_timestamp("2024-02-03T22:05:09+01:00").is_none());
        assert!(decode_timestamp("2024-13-03T22:05:09Z").is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.json");
        let mut store = JsonStore::new(&path, Template::Builtin);
        store.save(&sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"completionDate\": \"2024-01-31T22:05:09.000Z\""));
        assert!(text.contains("\"reviewScheduled\": null"));
        assert!(!text.contains("timeTaken\""));

        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn test_bootstrap_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("problems.json");
        let mut store = JsonStore::new(&path, Template::Builtin);
        let problems = store.load().unwrap();
        assert!(path.exists());
        assert_eq!(problems.len(), 75);
        assert_eq!(problems[0].name, "Two Sum");
        assert!(problems.iter().all(|p| !p.is_complete && p.attempts == 0));
    }

    #[test]
    fn test_bootstrap_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("starter.json");
        let path = dir.path().join("problems.json");
        JsonStore::new(&template, Template::Builtin)
            .save(&sample())
            .unwrap();

        let mut store = JsonStore::new(&path, Template::File(template.clone()));
        assert_eq!(store.load().unwrap(), sample());
        // The template is only used once.
        store.save(&sample()[1..]).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);

        let mut missing = JsonStore::new(
            dir.path().join("other.json"),
            Template::File(dir.path().join("nope.json")),
        );
        assert!(matches!(
            missing.load(),
            Err(TrackerError::TemplateMissing(_))
        ));
    }

    #[test]
    fn test_corrupt_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.json");
        std::fs::write(&path, "[{\"name\": ").unwrap();
        let mut store = JsonStore::new(&path, Template::Builtin);
        assert!(matches!(store.load(), Err(TrackerError::Json { .. })));
    }

    #[test]
    fn test_invalid_fields() {
        let path = Path::new("x.json");
        let bad_date = r#"[{"name": "A", "url": "u", "category": "c", "difficulty": "Easy",
            "timeExpected": "5 minutes", "isComplete": true, "completionDate": "yesterday",
            "timesTaken": [5]}]"#;
        assert!(matches!(
            decode_document(bad_date, path),
            Err(TrackerError::InvalidTimestamp { field: "completionDate", .. })
        ));
        let bad_difficulty = r#"[{"name": "A", "url": "u", "category": "c",
            "difficulty": "Brutal", "timeExpected": "5 minutes"}]"#;
        assert!(matches!(
            decode_document(bad_difficulty, path),
            Err(TrackerError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_legacy_records() {
        let legacy = r#"[
            {"name": "A", "url": "u", "category": "c", "difficulty": "Easy",
             "timeExpected": "15 minutes", "isComplete": true, "timeTaken": 412,
             "completionDate": "2023-05-01T10:00:00.000Z", "failDesc": "off by one"},
            {"name": "B", "url": "u", "category": "c", "difficulty": "Medium",
             "timeExpected": "25 minutes", "isComplete": false, "timeTaken": null,
             "completionDate": null},
            {"name": "C", "url": "u", "category": "c", "difficulty": "Hard",
             "timeExpected": "40 minutes", "isComplete": true, "timesTaken": [],
             "completionDate": "2023-05-02T10:00:00Z", "attempts": 0},
            {"name": "D", "url": "u", "category": "c", "difficulty": "Easy",
             "timeExpected": "15 minutes", "isComplete": false, "timesTaken": [],
             "attempts": 1, "failDesc": "off by one", "observations": ["off by one"]}
        ]"#;
        let problems = decode_document(legacy, Path::new("old.json")).unwrap();
        assert_eq!(problems[0].times_taken, vec![412]);
        assert_eq!(problems[0].attempts, 1);
        assert_eq!(problems[0].observations, vec!["off by one".to_owned()]);
        assert_eq!(problems[0].review_scheduled, None);

        assert_eq!(problems[1].attempts, 0);
        assert!(problems[1].times_taken.is_empty());
        assert!(problems[1].observations.is_empty());

        assert_eq!(problems[2].times_taken, vec![0]);
        assert_eq!(problems[2].attempts, 1);

        assert_eq!(problems[3].observations, vec!["off by one".to_owned()]);
        assert_eq!(problems[3].attempts, 1);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::from(&sample());
        let mut problems = store.load().unwrap();
        problems.pop();
        store.save(&problems).unwrap();
        assert_eq!(store.saves(), 1);
        assert_eq!(store.load().unwrap().len(), 1);
        assert!(MemoryStore::new().load().unwrap().is_empty());
    }
}
