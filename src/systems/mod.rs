mod classic;
mod common;
mod glicko_approx;
mod method;

pub use classic::ClassicElo;
pub use common::{
    BoutContext, CompetitorsByName, Rating, RatingSystem, Uncertainty, expected_score,
    simulate_bout,
};
pub use glicko_approx::GlickoApprox;
pub use method::{MethodCategory, MethodMatching, classify_method};
