//! Resume scorer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod record;
pub mod scoring;

pub use config::Config;
pub use error::{Result, ResumeScorerError};
pub use record::CandidateRecord;
pub use scoring::{Recommendation, ScoreBreakdown, ScoreReport, Scorer};
