use crate::data_processing::{Bout, BoutRecord};
use crate::error::Result;
use crate::systems::{CompetitorsByName, RatingSystem, simulate_bout};
use chrono::NaiveDate;
use serde::Serialize;

/// A dated bout that comes before the previous dated bout in the log. Inactivity
/// decay across such a pair is unreliable, but the pass carries on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnorderedInput {
    pub bout_index: usize,
    pub date: NaiveDate,
    pub previous: NaiveDate,
}

/// One rating pass: a single rating system replaying bouts in the order given.
/// The engine owns its store exclusively; bouts are never reordered.
#[derive(Debug)]
pub struct RatingEngine {
    pub system: Box<dyn RatingSystem>,
    pub players: CompetitorsByName,
    pub history: Vec<BoutRecord>,
    pub unordered: Vec<UnorderedInput>,
    last_date: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct RatingReport {
    pub players: CompetitorsByName,
    pub history: Vec<BoutRecord>,
    pub unordered: Vec<UnorderedInput>,
    pub secs_elapsed: f64,
}

impl RatingEngine {
    pub fn new(system: Box<dyn RatingSystem>) -> Self {
        Self {
            system,
            players: CompetitorsByName::default(),
            history: vec![],
            unordered: vec![],
            last_date: None,
        }
    }

    /// Applies the next bout. On an identity collision nothing is recorded.
    pub fn process(&mut self, bout: &Bout) -> Result<&BoutRecord> {
        let bout_index = self.history.len() + 1;
        let record = simulate_bout(&mut self.players, bout, &*self.system, bout_index)?;
        self.check_order(bout_index, bout.date);
        self.history.push(record);
        Ok(&self.history[bout_index - 1])
    }

    fn check_order(&mut self, bout_index: usize, date: Option<NaiveDate>) {
        let Some(date) = date else {
            return;
        };
        if let Some(previous) = self.last_date.filter(|&previous| date < previous) {
            tracing::warn!(
                "Bout #{} on {} comes after a bout on {}; inactivity decay may be wrong",
                bout_index,
                date,
                previous
            );
            self.unordered.push(UnorderedInput {
                bout_index,
                date,
                previous,
            });
        }
        self.last_date = Some(date);
    }

    /// Replays every bout, stopping at the first identity collision.
    pub fn run<'a>(mut self, bouts: impl IntoIterator<Item = &'a Bout>) -> Result<RatingReport> {
        tracing::info!("Rating bouts with {:?}", self.system);
        let now = std::time::Instant::now();
        for bout in bouts {
            self.process(bout)?;
        }
        let secs_elapsed = now.elapsed().as_nanos() as f64 * 1e-9;
        tracing::info!(
            "Rated {} bouts between {} fighters ({} out of order)",
            self.history.len(),
            self.players.len(),
            self.unordered.len()
        );

        Ok(RatingReport {
            players: self.players,
            history: self.history,
            unordered: self.unordered,
            secs_elapsed,
        })
    }
}
