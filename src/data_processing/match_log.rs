use super::{Bout, Outcome};
use crate::error::{RatingError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::path::Path;

/// One CSV row as scraped. Columns other than these (row index, round, time)
/// are ignored.
#[derive(Debug, Deserialize)]
struct BoutRow {
    #[serde(default)]
    event: String,
    fighter_1: String,
    fighter_2: String,
    #[serde(default)]
    result: String,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    event_date: Option<String>,
}

/// How the loader should arrange bouts before they reach the engine, which
/// never reorders anything itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOrder {
    /// The log is already oldest-first.
    #[default]
    AsIs,
    /// The log is newest-first, as scraped from event listings.
    Reverse,
    /// Stable sort by date, undated bouts last.
    ByDate,
}

/// Accepts ISO dates and timestamps, and the long form "November 16, 2024".
pub fn parse_event_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%B %d, %Y"))
        .or_else(|_| NaiveDate::parse_from_str(text, "%b %d, %Y"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .ok()
}

impl From<BoutRow> for Bout {
    fn from(row: BoutRow) -> Self {
        let date = row.event_date.as_deref().and_then(|text| {
            let date = parse_event_date(text);
            if date.is_none() && !text.trim().is_empty() {
                tracing::warn!(
                    "Unparseable date {:?} for {} vs {}; bout treated as undated",
                    text,
                    row.fighter_1,
                    row.fighter_2
                );
            }
            date
        });
        let method = row
            .method
            .map(|m| m.trim().to_owned())
            .filter(|m| !m.is_empty());

        Self {
            outcome: Outcome::from_result(&row.result),
            event: row.event,
            fighter_1: row.fighter_1,
            fighter_2: row.fighter_2,
            method,
            date,
        }
    }
}

pub fn read_match_log_from_reader(reader: impl std::io::Read) -> Result<Vec<Bout>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
        .deserialize::<BoutRow>()
        .map(|row| row.map(Bout::from).map_err(RatingError::from))
        .collect()
}

pub fn read_match_log(path: impl AsRef<Path>) -> Result<Vec<Bout>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| RatingError::io(path, e))?;
    let bouts = read_match_log_from_reader(std::io::BufReader::new(file))?;
    tracing::info!("Loaded {} bouts from {:?}", bouts.len(), path);
    Ok(bouts)
}

pub fn arrange(bouts: &mut [Bout], order: LogOrder) {
    match order {
        LogOrder::AsIs => {}
        LogOrder::Reverse => bouts.reverse(),
        LogOrder::ByDate => bouts.sort_by_key(|bout| (bout.date.is_none(), bout.date)),
    }
}
