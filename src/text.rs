//! Conversions between the text a user types or reads and the values stored on a problem.

use crate::error::InputError;
use crate::traits::Outcome;
use once_cell::sync::Lazy;
use regex::Regex;

static DURATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{2})$").expect("duration pattern is valid"));

impl std::str::FromStr for Outcome {
    type Err = InputError;

    /// Parse an outcome token; `m:ss`, `0`, `fail` or `skip`. Empty input means skip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token {
            "" | "skip" => Ok(Outcome::Skip),
            "fail" => Ok(Outcome::Fail),
            other => parse_time_to_seconds(other)
                .map(Outcome::Solved)
                .ok_or_else(|| InputError::MalformedOutcome(other.to_owned())),
        }
    }
}

/// Convert `m:ss` (or the literal `0`) into seconds, `None` if the text has another shape.
pub fn parse_time_to_seconds(text: &str) -> Option<u32> {
    if text == "0" {
        return Some(0);
    }
    let captures = DURATION.captures(text)?;
    let minutes: u32 = captures[1].parse().ok()?;
    let seconds: u32 = captures[2].parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Format seconds as `m:ss`.
pub fn format_seconds_to_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Expected duration in seconds, read from the leading number of minutes in text like
/// "20 minutes".
pub fn parse_expected_time(text: &str) -> Option<u32> {
    let minutes: u32 = text.split_whitespace().next()?.parse().ok()?;
    minutes.checked_mul(60)
}

/// Format a difference against the expected time, negative is faster than expected.
pub fn format_time_difference(delta: i64) -> String {
    let magnitude = delta.unsigned_abs();
    let formatted = format!("{}:{:02}", magnitude / 60, magnitude % 60);
    if delta < 0 {
        format!("{formatted} fast")
    } else {
        format!("{formatted} slow")
    }
}

/// One `|` per completed problem, one `.` per remaining one.
pub fn render_progress_bar(completed: usize, total: usize) -> String {
    let left = total.saturating_sub(completed);
    "|".repeat(completed) + &".".repeat(left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time_to_seconds("5:30"), Some(330));
        assert_eq!(parse_time_to_seconds("0"), Some(0));
        assert_eq!(parse_time_to_seconds("0:00"), Some(0));
        assert_eq!(parse_time_to_seconds("125:07"), Some(125 * 60 + 7));
        assert_eq!(parse_time_to_seconds("5:3"), None);
        assert_eq!(parse_time_to_seconds("5:75"), None);
        assert_eq!(parse_time_to_seconds(":30"), None);
        assert_eq!(parse_time_to_seconds("five"), None);
    }

    #[test]
    fn test_outcome_tokens() {
        assert_eq!("2:15".parse::<Outcome>(), Ok(Outcome::Solved(135)));
        assert_eq!("0".parse::<Outcome>(), Ok(Outcome::Solved(0)));
        assert_eq!("fail".parse::<Outcome>(), Ok(Outcome::Fail));
        assert_eq!("skip".parse::<Outcome>(), Ok(Outcome::Skip));
        assert_eq!("".parse::<Outcome>(), Ok(Outcome::Skip));
        assert_eq!(
            "soon".parse::<Outcome>(),
            Err(InputError::MalformedOutcome("soon".to_owned()))
        );
        assert!("12".parse::<Outcome>().is_err());
        assert!("FAIL".parse::<Outcome>().is_err());
    }

    #[test]
    fn test_expected_time() {
        assert_eq!(parse_expected_time("20 minutes"), Some(1200));
        assert_eq!(parse_expected_time("5"), Some(300));
        assert_eq!(parse_expected_time("about 20 minutes"), None);
        assert_eq!(parse_expected_time(""), None);
    }

    #[test]
    fn test_time_difference() {
        assert_eq!(format_time_difference(-75), "1:15 fast");
        assert_eq!(format_time_difference(0), "0:00 slow");
        assert_eq!(format_time_difference(601), "10:01 slow");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(render_progress_bar(3, 5), "|||..");
        assert_eq!(render_progress_bar(0, 2), "..");
        assert_eq!(render_progress_bar(4, 2), "||||");
    }

    proptest! {
        #[test]
        fn format_inverts_parse(minutes in 0u32..10_000, seconds in 0u32..60) {
            let text = format!("{minutes}:{seconds:02}");
            let parsed = parse_time_to_seconds(&text).unwrap();
            prop_assert_eq!(format_seconds_to_time(parsed), text);
        }
    }
}
