//! Fixed K-factor Elo with a larger swing for knockouts and submissions.

use super::common::{BoutContext, Rating, RatingSystem, expected_score};
use super::method::MethodMatching;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClassicElo {
    pub initial_rating: f64,
    pub base_k: f64,
    // applies to decisive knockouts and submissions only
    pub finish_multiplier: f64,
    pub round_digits: i32,
    pub method_matching: MethodMatching,
}

impl Default for ClassicElo {
    fn default() -> Self {
        Self {
            initial_rating: 1000.,
            base_k: 40.,
            finish_multiplier: 1.15,
            round_digits: 2,
            method_matching: MethodMatching::Exact,
        }
    }
}

impl ClassicElo {
    fn round(&self, x: f64) -> f64 {
        let scale = 10f64.powi(self.round_digits);
        (x * scale).round() / scale
    }

    // Both sides move by the first side's unrounded gain, then each new rating
    // is rounded on its own. Ties round away from zero.
    fn exchange(&self, mut first: Rating, mut second: Rating, k: f64) -> (Rating, Rating) {
        let expected = expected_score(first.rating, second.rating);
        let gain = k * (1. - expected);
        first.rating = self.round(first.rating + gain);
        second.rating = self.round(second.rating - gain);
        first.record_peak();
        second.record_peak();
        (first, second)
    }
}

impl RatingSystem for ClassicElo {
    fn newcomer(&self) -> Rating {
        Rating::new(self.initial_rating)
    }

    fn method_matching(&self) -> MethodMatching {
        self.method_matching
    }

    fn decisive(&self, bout: &BoutContext, winner: Rating, loser: Rating) -> (Rating, Rating) {
        let k = if bout.method.is_finish() {
            self.base_k * self.finish_multiplier
        } else {
            self.base_k
        };
        self.exchange(winner, loser, k)
    }

    // Half of base_k, never of the finish-multiplied K: a draw recorded as KO
    // or SUB still moves by base_k / 2.
    fn draw(&self, _bout: &BoutContext, first: Rating, second: Rating) -> (Rating, Rating) {
        self.exchange(first, second, self.base_k / 2.)
    }
}
