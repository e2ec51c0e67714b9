mod match_log;

pub use match_log::{LogOrder, arrange, parse_event_date, read_match_log, read_match_log_from_reader};

use crate::error::{RatingError, Result};
use crate::systems::{MethodCategory, Rating};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of a bout from `fighter_1`'s point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[serde(rename = "win")]
    FirstWins,
    #[serde(rename = "loss")]
    SecondWins,
    #[serde(rename = "draw")]
    Draw,
    #[serde(rename = "nc")]
    NoContest,
}

impl Outcome {
    /// `win`, `loss` and `draw` in any case; anything else is a no contest.
    pub fn from_result(result: &str) -> Self {
        let result = result.trim();
        if result.eq_ignore_ascii_case("win") {
            Self::FirstWins
        } else if result.eq_ignore_ascii_case("loss") {
            Self::SecondWins
        } else if result.eq_ignore_ascii_case("draw") {
            Self::Draw
        } else {
            Self::NoContest
        }
    }
}

/// One bout from the match log.
#[derive(Clone, Debug, PartialEq)]
pub struct Bout {
    pub event: String,
    pub fighter_1: String,
    pub fighter_2: String,
    pub outcome: Outcome,
    /// Free text such as "KO/TKO" or "U-DEC".
    pub method: Option<String>,
    /// `None` when the log had no parseable date.
    pub date: Option<NaiveDate>,
}

impl Bout {
    /// An undated bout with no method, useful for testing.
    pub fn new(fighter_1: impl Into<String>, fighter_2: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            event: String::new(),
            fighter_1: fighter_1.into(),
            fighter_2: fighter_2.into(),
            outcome,
            method: None,
            date: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// Audit row: both fighters' ratings going into and coming out of one bout.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoutRecord {
    /// 1-based position in the processed log.
    pub bout_index: usize,
    pub event: String,
    pub date: Option<NaiveDate>,
    pub fighter_1: String,
    pub fighter_2: String,
    pub result: Outcome,
    pub method: Option<String>,
    pub method_category: MethodCategory,
    pub fighter_1_rating_start: f64,
    pub fighter_2_rating_start: f64,
    pub fighter_1_rating_end: f64,
    pub fighter_2_rating_end: f64,
    pub fighter_1_deviation_end: Option<f64>,
    pub fighter_2_deviation_end: Option<f64>,
}

impl BoutRecord {
    pub fn new(
        bout_index: usize,
        bout: &Bout,
        method_category: MethodCategory,
        (start_1, start_2): (Rating, Rating),
        (end_1, end_2): (Rating, Rating),
    ) -> Self {
        Self {
            bout_index,
            event: bout.event.clone(),
            date: bout.date,
            fighter_1: bout.fighter_1.clone(),
            fighter_2: bout.fighter_2.clone(),
            result: bout.outcome,
            method: bout.method.clone(),
            method_category,
            fighter_1_rating_start: start_1.rating,
            fighter_2_rating_start: start_2.rating,
            fighter_1_rating_end: end_1.rating,
            fighter_2_rating_end: end_2.rating,
            fighter_1_deviation_end: end_1.deviation(),
            fighter_2_deviation_end: end_2.deviation(),
        }
    }

    pub fn involves(&self, name: &str) -> bool {
        self.fighter_1 == name || self.fighter_2 == name
    }
}

fn write_to_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| RatingError::io(path, e))
}

fn write_to_csv<T: Serialize>(values: &[T], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for value in values {
        writer.serialize(value)?;
    }
    writer.flush().map_err(|e| RatingError::io(path, e))
}

/// Writes `values` as CSV or JSON, chosen by the file extension.
pub fn write_slice_to_file<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => write_to_json(values, path)?,
        Some("csv") => write_to_csv(values, path)?,
        _ => {
            return Err(RatingError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    }
    tracing::info!("Successfully wrote {} rows to {:?}", values.len(), path);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use claims::assert_err;

    #[test]
    fn test_result_strings() {
        assert_eq!(Outcome::from_result("win"), Outcome::FirstWins);
        assert_eq!(Outcome::from_result(" WIN "), Outcome::FirstWins);
        assert_eq!(Outcome::from_result("loss"), Outcome::SecondWins);
        assert_eq!(Outcome::from_result("Draw"), Outcome::Draw);
        assert_eq!(Outcome::from_result("nc"), Outcome::NoContest);
        assert_eq!(Outcome::from_result(""), Outcome::NoContest);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        assert_err!(write_slice_to_file(&[1, 2, 3], "ratings.txt"));
        assert_err!(write_slice_to_file(&[1, 2, 3], "ratings"));
    }

    #[test]
    fn test_record_involves() {
        let bout = Bout::new("Amanda Nunes", "Ronda Rousey", Outcome::FirstWins);
        let rating = Rating::new(1000.);
        let record = BoutRecord::new(1, &bout, MethodCategory::KoTko, (rating, rating), (rating, rating));
        assert!(record.involves("Ronda Rousey"));
        assert!(!record.involves("Holly Holm"));
        assert_eq!(record.fighter_1_deviation_end, None);
    }
}
