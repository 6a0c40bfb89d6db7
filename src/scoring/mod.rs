//! Scoring module
//! Fixed rubric, recommendation tiers and the scorer that ties them together

pub mod recommendation;
pub mod rubric;
pub mod scorer;

pub use recommendation::Recommendation;
pub use scorer::{ScoreBreakdown, ScoreReport, Scorer, MAX_SCORE};
