//! A single-pass Glicko-2 approximation: Elo-style rating steps plus a rating
//! deviation that grows with inactivity and shrinks with every bout, and a
//! volatility that tracks surprise. There are no rating periods and no
//! iterative volatility solve.

use super::common::{BoutContext, Rating, RatingSystem, Uncertainty, expected_score};
use super::method::MethodMatching;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GlickoApprox {
    pub initial_rating: f64,
    // upper bound on deviation as well as its starting value
    pub initial_deviation: f64,
    pub min_deviation: f64,
    pub initial_volatility: f64,
    pub min_volatility: f64,
    pub tau: f64,
    pub k_factor: f64,
    // flat award to the winner of a knockout or submission; 0 disables
    pub early_stoppage_bonus: f64,
    // fraction of the current deviation added per month of inactivity
    pub decay_rate: f64,
    pub days_per_month: f64,
    pub post_bout_shrink: f64,
    pub volatility_scale: f64,
    pub method_matching: MethodMatching,
}

impl Default for GlickoApprox {
    fn default() -> Self {
        Self {
            initial_rating: 1500.,
            initial_deviation: 350.,
            min_deviation: 30.,
            initial_volatility: 0.06,
            min_volatility: 0.01,
            tau: 0.5,
            k_factor: 40.,
            early_stoppage_bonus: 5.,
            decay_rate: 0.05,
            days_per_month: 30.,
            post_bout_shrink: 0.9,
            volatility_scale: 400.,
            method_matching: MethodMatching::Exact,
        }
    }
}

impl GlickoApprox {
    fn fresh_uncertainty(&self) -> Uncertainty {
        Uncertainty {
            deviation: self.initial_deviation,
            volatility: self.initial_volatility,
            last_bout: None,
        }
    }

    /// Deviation after `months_inactive` months without a bout, kept within
    /// `min_deviation..=initial_deviation`.
    pub fn decayed_deviation(&self, deviation: f64, months_inactive: f64) -> f64 {
        let drift = deviation * self.decay_rate * months_inactive;
        deviation
            .hypot(drift)
            .min(self.initial_deviation)
            .max(self.min_deviation)
    }

    pub fn updated_volatility(
        &self,
        volatility: f64,
        deviation: f64,
        expected: f64,
        actual: f64,
    ) -> f64 {
        let variance = (deviation.powi(-2) + self.volatility_scale.powi(-2)).recip();
        let delta = variance * (actual - expected);
        (volatility + self.tau * (delta * delta - volatility * volatility)).max(self.min_volatility)
    }

    // Inactivity decay, then stamp the bout date. Undated bouts neither decay
    // nor move the last-bout date.
    fn enter_bout(&self, mut player: Rating, date: Option<NaiveDate>) -> Rating {
        let uncertainty = player
            .uncertainty
            .get_or_insert_with(|| self.fresh_uncertainty());
        if let Some(date) = date {
            if let Some(last) = uncertainty.last_bout {
                let months_inactive = (date - last).num_days() as f64 / self.days_per_month;
                uncertainty.deviation = self.decayed_deviation(uncertainty.deviation, months_inactive);
            }
            uncertainty.last_bout = Some(date);
        }
        player
    }

    // The deviation cut must come after the volatility update, which reads it.
    fn leave_bout(&self, mut player: Rating, expected: f64, actual: f64) -> Rating {
        player.record_peak();
        let uncertainty = player
            .uncertainty
            .get_or_insert_with(|| self.fresh_uncertainty());
        uncertainty.volatility = self.updated_volatility(
            uncertainty.volatility,
            uncertainty.deviation,
            expected,
            actual,
        );
        uncertainty.deviation = (uncertainty.deviation * self.post_bout_shrink).max(self.min_deviation);
        player
    }
}

impl RatingSystem for GlickoApprox {
    fn newcomer(&self) -> Rating {
        Rating::with_uncertainty(self.initial_rating, self.fresh_uncertainty())
    }

    fn method_matching(&self) -> MethodMatching {
        self.method_matching
    }

    fn decisive(&self, bout: &BoutContext, winner: Rating, loser: Rating) -> (Rating, Rating) {
        let mut winner = self.enter_bout(winner, bout.date);
        let mut loser = self.enter_bout(loser, bout.date);

        // Each side's expectation is taken from its own perspective
        let expected_winner = expected_score(winner.rating, loser.rating);
        let expected_loser = expected_score(loser.rating, winner.rating);
        winner.rating += self.k_factor * (1. - expected_winner);
        loser.rating += self.k_factor * (0. - expected_loser);
        if bout.method.is_finish() {
            winner.rating += self.early_stoppage_bonus;
        }

        (
            self.leave_bout(winner, expected_winner, 1.),
            self.leave_bout(loser, expected_loser, 0.),
        )
    }

    /// Only the lower-rated fighter moves; an even draw moves nobody.
    fn draw(&self, bout: &BoutContext, first: Rating, second: Rating) -> (Rating, Rating) {
        let mut first = self.enter_bout(first, bout.date);
        let mut second = self.enter_bout(second, bout.date);

        let expected_first = expected_score(first.rating, second.rating);
        let expected_second = expected_score(second.rating, first.rating);
        if first.rating < second.rating {
            first.rating += self.k_factor * (0.5 - expected_first);
        } else if second.rating < first.rating {
            second.rating += self.k_factor * (0.5 - expected_second);
        }

        (
            self.leave_bout(first, expected_first, 0.5),
            self.leave_bout(second, expected_second, 0.5),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::systems::method::MethodCategory;
    use quickcheck_macros::quickcheck;

    const EPS: f64 = 1e-9;

    fn on(date: Option<NaiveDate>, method: MethodCategory) -> BoutContext {
        BoutContext { method, date }
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn deviation(r: &Rating) -> f64 {
        r.deviation().unwrap()
    }

    #[test]
    fn test_debut_draw_moves_only_the_underdog() {
        let sys = GlickoApprox::default();
        let low = sys.newcomer();
        let high = Rating::with_uncertainty(1600., sys.fresh_uncertainty());
        let (low_after, high_after) = sys.draw(&on(ymd(2020, 1, 1), MethodCategory::Other), low, high);

        let gain = 40. * (0.5 - expected_score(1500., 1600.));
        assert!((low_after.rating - (1500. + gain)).abs() < EPS);
        assert_eq!(high_after.rating, 1600.);
        assert!((deviation(&low_after) - 315.).abs() < EPS);
        assert!((deviation(&high_after) - 315.).abs() < EPS);
        assert_eq!(low_after.uncertainty.unwrap().last_bout, ymd(2020, 1, 1));
    }

    #[test]
    fn test_draw_moves_second_listed_underdog() {
        let sys = GlickoApprox::default();
        let high = Rating::with_uncertainty(1600., sys.fresh_uncertainty());
        let low = sys.newcomer();
        let (high_after, low_after) = sys.draw(&on(ymd(2020, 1, 1), MethodCategory::Other), high, low);

        let gain = 40. * (0.5 - expected_score(1500., 1600.));
        assert_eq!(high_after.rating, 1600.);
        assert_eq!(high_after.peak_rating, 1600.);
        assert!((low_after.rating - (1500. + gain)).abs() < EPS);
        assert!(low_after.rating > 1500.);
        assert_eq!(low_after.peak_rating, low_after.rating);
    }

    #[test]
    fn test_even_draw_moves_nobody() {
        let sys = GlickoApprox::default();
        let (a, b) = sys.draw(&on(None, MethodCategory::Other), sys.newcomer(), sys.newcomer());
        assert_eq!(a.rating, 1500.);
        assert_eq!(b.rating, 1500.);
        // volatility still moves, since a draw between equals is exactly as expected
        assert!(a.uncertainty.unwrap().volatility < 0.06);
    }

    #[test]
    fn test_finish_bonus() {
        let sys = GlickoApprox::default();
        let ctx = |method| on(ymd(2021, 5, 1), method);
        let (w, l) = sys.decisive(&ctx(MethodCategory::Other), sys.newcomer(), sys.newcomer());
        assert_eq!(w.rating, 1520.);
        assert_eq!(l.rating, 1480.);

        let (w, l) = sys.decisive(&ctx(MethodCategory::Submission), sys.newcomer(), sys.newcomer());
        assert_eq!(w.rating, 1525.);
        assert_eq!(l.rating, 1480.);
        assert_eq!(w.peak_rating, 1525.);
        assert_eq!(l.peak_rating, 1500.);

        let no_bonus = GlickoApprox {
            early_stoppage_bonus: 0.,
            ..GlickoApprox::default()
        };
        let (w, _) = no_bonus.decisive(&ctx(MethodCategory::KoTko), sys.newcomer(), sys.newcomer());
        assert_eq!(w.rating, 1520.);
    }

    #[test]
    fn test_inactivity_decay() {
        let sys = GlickoApprox::default();
        let mut veteran = sys.newcomer();
        veteran.uncertainty = Some(Uncertainty {
            deviation: 100.,
            volatility: 0.06,
            last_bout: ymd(2020, 1, 1),
        });

        // 360 days is 12 months: sqrt(100^2 + (100 * 0.05 * 12)^2) = 100 * sqrt(1.36)
        let (after, _) = sys.decisive(
            &on(ymd(2020, 12, 26), MethodCategory::Other),
            veteran,
            sys.newcomer(),
        );
        let decayed = 100. * 1.36f64.sqrt();
        assert!((deviation(&after) - decayed * 0.9).abs() < 1e-9);
        assert_eq!(after.uncertainty.unwrap().last_bout, ymd(2020, 12, 26));

        // An undated bout skips decay and keeps the previous date
        let (undated, _) = sys.decisive(&on(None, MethodCategory::Other), veteran, sys.newcomer());
        assert!((deviation(&undated) - 90.).abs() < EPS);
        assert_eq!(undated.uncertainty.unwrap().last_bout, ymd(2020, 1, 1));
    }

    #[test]
    fn test_decay_is_capped() {
        let sys = GlickoApprox::default();
        assert_eq!(sys.decayed_deviation(340., 120.), 350.);
        assert_eq!(sys.decayed_deviation(30., 0.), 30.);
        assert_eq!(sys.decayed_deviation(10., 0.), 30.);
    }

    #[test]
    fn test_volatility_floor() {
        let sys = GlickoApprox::default();
        assert_eq!(sys.updated_volatility(0.01, 30., 0.5, 0.5), 0.01);
        let surprised = sys.updated_volatility(0.06, 350., 0.1, 1.);
        assert!(surprised > 0.06);
    }

    #[test]
    fn test_deviation_floor_after_many_bouts() {
        let sys = GlickoApprox::default();
        let (mut a, mut b) = (sys.newcomer(), sys.newcomer());
        for day in 1..=40 {
            (a, b) = sys.decisive(&on(ymd(2022, 1, day % 28 + 1), MethodCategory::Other), a, b);
        }
        assert_eq!(deviation(&a), 30.);
        assert_eq!(deviation(&b), 30.);
    }

    #[quickcheck]
    fn deviation_stays_in_bounds(steps: Vec<(u16, bool, u8)>) -> bool {
        let sys = GlickoApprox::default();
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let (mut a, mut b) = (sys.newcomer(), sys.newcomer());
        let mut days = 0i64;
        steps.into_iter().all(|(gap, draw, method)| {
            days += gap as i64;
            let date = start.checked_add_days(chrono::Days::new(days as u64));
            let method = match method % 3 {
                0 => MethodCategory::KoTko,
                1 => MethodCategory::Submission,
                _ => MethodCategory::Other,
            };
            let (peak_a, peak_b) = (a.peak_rating, b.peak_rating);
            (a, b) = if draw {
                sys.draw(&on(date, method), a, b)
            } else {
                sys.decisive(&on(date, method), a, b)
            };
            [&a, &b].iter().all(|r| {
                let dev = deviation(r);
                (30. ..=350.).contains(&dev)
                    && r.peak_rating >= r.rating
                    && r.uncertainty.unwrap().volatility >= 0.01
            }) && a.peak_rating >= peak_a
                && b.peak_rating >= peak_b
        })
    }
}
