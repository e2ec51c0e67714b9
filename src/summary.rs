use crate::data_processing::{BoutRecord, write_slice_to_file};
use crate::error::Result;
use crate::systems::{CompetitorsByName, Rating};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, PartialEq, Serialize)]
pub struct RatingSummary {
    pub rank: usize,
    pub fighter: String,
    pub rating: f64,
    pub peak_rating: f64,
}

/// Current-ratings row for systems that track uncertainty.
#[derive(Debug, PartialEq, Serialize)]
pub struct UncertainRatingSummary {
    pub rank: usize,
    pub fighter: String,
    pub rating: f64,
    pub rating_deviation: f64,
    pub volatility: f64,
    pub last_bout: Option<NaiveDate>,
    pub peak_rating: f64,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct PeakSummary {
    pub rank: usize,
    pub fighter: String,
    pub peak_rating: f64,
}

pub fn make_leaderboard(players: &CompetitorsByName) -> Vec<RatingSummary> {
    players
        .current_table()
        .enumerate()
        .filter_map(|(i, (name, _))| {
            let r = players.get(name)?;
            Some(RatingSummary {
                rank: i + 1,
                fighter: name.to_owned(),
                rating: r.rating,
                peak_rating: r.peak_rating,
            })
        })
        .collect()
}

/// As `make_leaderboard`, skipping fighters without uncertainty data.
pub fn make_uncertain_leaderboard(players: &CompetitorsByName) -> Vec<UncertainRatingSummary> {
    players
        .current_table()
        .filter_map(|(name, _)| {
            let r = players.get(name)?;
            let u = r.uncertainty?;
            Some((name, r, u))
        })
        .enumerate()
        .map(|(i, (name, r, u))| UncertainRatingSummary {
            rank: i + 1,
            fighter: name.to_owned(),
            rating: r.rating,
            rating_deviation: u.deviation,
            volatility: u.volatility,
            last_bout: u.last_bout,
            peak_rating: r.peak_rating,
        })
        .collect()
}

pub fn make_peak_leaderboard(players: &CompetitorsByName) -> Vec<PeakSummary> {
    players
        .peak_table()
        .enumerate()
        .map(|(i, (name, peak_rating))| PeakSummary {
            rank: i + 1,
            fighter: name.to_owned(),
            peak_rating,
        })
        .collect()
}

/// A fighter's current state and every bout they appear in.
#[derive(Debug)]
pub struct CompetitorHistory<'a> {
    pub rating: Rating,
    pub bouts: Vec<&'a BoutRecord>,
}

pub fn competitor_history<'a>(
    players: &CompetitorsByName,
    history: &'a [BoutRecord],
    name: &str,
) -> Option<CompetitorHistory<'a>> {
    let rating = *players.get(name)?;
    let bouts = history.iter().filter(|r| r.involves(name)).collect();
    Some(CompetitorHistory { rating, bouts })
}

/// The first `n` rows of the current leaderboard.
pub fn make_top_leaderboard(players: &CompetitorsByName, n: usize) -> Vec<RatingSummary> {
    let mut board = make_leaderboard(players);
    board.truncate(n);
    board
}

/// The first and last rows of the current table, or `None` for an empty store.
pub fn extremes(players: &CompetitorsByName) -> Option<((&str, f64), (&str, f64))> {
    let mut table = players.current_table();
    let best = table.next()?;
    let worst = table.last().unwrap_or(best);
    Some((best, worst))
}

/// Logs the highest and lowest rated fighters and the top `top_n`.
pub fn log_extremes(players: &CompetitorsByName, top_n: usize) {
    let Some(((best, best_rating), (worst, worst_rating))) = extremes(players) else {
        tracing::info!("No fighters rated");
        return;
    };
    tracing::info!("Highest rated: {} at {:.2}", best, best_rating);
    tracing::info!("Lowest rated: {} at {:.2}", worst, worst_rating);
    for row in make_top_leaderboard(players, top_n) {
        tracing::info!("{:4} {:8.2} {}", row.rank, row.rating, row.fighter);
    }
}

/// Writes current_ratings.csv, peak_ratings.csv and bouts.csv into `dir`.
pub fn print_ratings(
    players: &CompetitorsByName,
    history: &[BoutRecord],
    dir: impl AsRef<Path>,
) -> Result<()> {
    let dir = dir.as_ref();
    let current = dir.join("current_ratings.csv");
    if players.iter().any(|(_, r)| r.uncertainty.is_some()) {
        write_slice_to_file(&make_uncertain_leaderboard(players), current)?;
    } else {
        write_slice_to_file(&make_leaderboard(players), current)?;
    }
    write_slice_to_file(&make_peak_leaderboard(players), dir.join("peak_ratings.csv"))?;
    write_slice_to_file(history, dir.join("bouts.csv"))
}
