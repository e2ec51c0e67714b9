//! Chronological pairwise ratings for head-to-head contests.
//!
//! Bouts are replayed one at a time in the order they are given. Each
//! competitor's [`systems::Rating`] is created on first appearance and updated
//! in place by the active [`systems::RatingSystem`]; the [`engine::RatingEngine`]
//! drives the pass and records a [`data_processing::BoutRecord`] per bout.

pub mod config;
pub mod data_processing;
pub mod engine;
pub mod error;
pub mod summary;
pub mod systems;

pub use error::{RatingError, Result};
