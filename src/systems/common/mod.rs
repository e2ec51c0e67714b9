mod players;

use super::method::{MethodCategory, MethodMatching, classify_method};
use crate::data_processing::{Bout, BoutRecord, Outcome};
use crate::error::{RatingError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
pub use players::CompetitorsByName;

/// Logistic win expectancy on the 400-point Elo scale.
pub fn expected_score(rating: f64, foe_rating: f64) -> f64 {
    1. / (1. + 10f64.powf((foe_rating - rating) / 400.))
}

/// Glicko-style bookkeeping, present only under systems that track it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Uncertainty {
    pub deviation: f64,
    pub volatility: f64,
    pub last_bout: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rating: f64,
    pub peak_rating: f64,
    pub uncertainty: Option<Uncertainty>,
}

impl Rating {
    pub fn new(rating: f64) -> Self {
        Self {
            rating,
            peak_rating: rating,
            uncertainty: None,
        }
    }

    pub fn with_uncertainty(rating: f64, uncertainty: Uncertainty) -> Self {
        Self {
            uncertainty: Some(uncertainty),
            ..Self::new(rating)
        }
    }

    pub fn deviation(&self) -> Option<f64> {
        self.uncertainty.map(|u| u.deviation)
    }

    pub fn record_peak(&mut self) {
        self.peak_rating = self.peak_rating.max(self.rating);
    }
}

/// What a rating system sees of a bout once names have been resolved.
#[derive(Clone, Copy, Debug)]
pub struct BoutContext {
    pub method: MethodCategory,
    pub date: Option<NaiveDate>,
}

/// An update policy: maps both fighters' pre-bout states to post-bout states.
/// Implementations never touch the store directly, so both results become
/// visible together.
pub trait RatingSystem: std::fmt::Debug {
    /// State given to a fighter on first appearance.
    fn newcomer(&self) -> Rating;

    fn method_matching(&self) -> MethodMatching {
        MethodMatching::Exact
    }

    /// Returns `(winner, loser)`.
    fn decisive(&self, bout: &BoutContext, winner: Rating, loser: Rating) -> (Rating, Rating);

    fn draw(&self, bout: &BoutContext, first: Rating, second: Rating) -> (Rating, Rating);

    fn no_contest(&self, _bout: &BoutContext, first: Rating, second: Rating) -> (Rating, Rating) {
        (first, second)
    }
}

/// Resolves both fighters, applies one bout under `system`, writes both new
/// states back and returns the audit row. Fails only if a fighter faces
/// themselves, in which case the store is left untouched.
pub fn simulate_bout(
    players: &mut CompetitorsByName,
    bout: &Bout,
    system: &dyn RatingSystem,
    bout_index: usize,
) -> Result<BoutRecord> {
    if bout.fighter_1 == bout.fighter_2 {
        return Err(RatingError::IdentityCollision {
            bout_index,
            name: bout.fighter_1.clone(),
        });
    }

    // If a fighter is competing for the first time, initialize with a default rating
    let newcomer = system.newcomer();
    let first = *players.get_or_init(&bout.fighter_1, newcomer);
    let second = *players.get_or_init(&bout.fighter_2, newcomer);

    let context = BoutContext {
        method: classify_method(bout.method.as_deref(), system.method_matching()),
        date: bout.date,
    };
    let (first_after, second_after) = match bout.outcome {
        Outcome::FirstWins => system.decisive(&context, first, second),
        Outcome::SecondWins => {
            let (winner, loser) = system.decisive(&context, second, first);
            (loser, winner)
        }
        Outcome::Draw => system.draw(&context, first, second),
        Outcome::NoContest => system.no_contest(&context, first, second),
    };

    *players.get_or_init(&bout.fighter_1, newcomer) = first_after;
    *players.get_or_init(&bout.fighter_2, newcomer) = second_after;

    tracing::debug!(
        "Bout #{} {} vs {} ({:?}, {:?}): {:.2} -> {:.2}, {:.2} -> {:.2}",
        bout_index,
        bout.fighter_1,
        bout.fighter_2,
        bout.outcome,
        context.method,
        first.rating,
        first_after.rating,
        second.rating,
        second_after.rating
    );

    Ok(BoutRecord::new(
        bout_index,
        bout,
        context.method,
        (first, second),
        (first_after, second_after),
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use claims::assert_err;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn expected_scores_are_complementary(x: i16, y: i16) -> bool {
        let (x, y) = (x as f64 / 7., y as f64 / 7.);
        (expected_score(x, y) + expected_score(y, x) - 1.).abs() < 1e-12
    }

    #[test]
    fn test_expected_score() {
        assert_eq!(expected_score(1000., 1000.), 0.5);
        assert!((expected_score(1500., 1600.) - 0.359935).abs() < 1e-6);
        let huge = expected_score(3000., 0.);
        assert!(huge > 0.99 && huge < 1.);
    }

    #[test]
    fn test_peak_never_falls() {
        let mut rating = Rating::new(1000.);
        rating.rating = 1040.;
        rating.record_peak();
        rating.rating = 990.;
        rating.record_peak();
        assert_eq!(rating.peak_rating, 1040.);
    }

    #[derive(Debug)]
    struct Swap;

    impl RatingSystem for Swap {
        fn newcomer(&self) -> Rating {
            Rating::new(0.)
        }

        fn decisive(&self, _: &BoutContext, winner: Rating, loser: Rating) -> (Rating, Rating) {
            (Rating::new(winner.rating + 1.), Rating::new(loser.rating - 1.))
        }

        fn draw(&self, _: &BoutContext, first: Rating, second: Rating) -> (Rating, Rating) {
            (second, first)
        }
    }

    #[test]
    fn test_second_fighter_win_is_routed_to_winner() {
        let mut players = CompetitorsByName::default();
        let bout = Bout::new("a", "b", Outcome::SecondWins);
        let record = simulate_bout(&mut players, &bout, &Swap, 1).unwrap();
        assert_eq!(record.fighter_1_rating_end, -1.);
        assert_eq!(record.fighter_2_rating_end, 1.);
        assert_eq!(players.get("b").unwrap().rating, 1.);
    }

    #[test]
    fn test_identity_collision_leaves_store_untouched() {
        let mut players = CompetitorsByName::default();
        let bout = Bout::new("a", "a", Outcome::FirstWins);
        assert_err!(simulate_bout(&mut players, &bout, &Swap, 3));
        assert!(players.is_empty());
    }
}
