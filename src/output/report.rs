//! Report structures for scored candidates

use crate::input::LoadedRecord;
use crate::record::CandidateRecord;
use crate::scoring::{Recommendation, ScoreReport, Scorer};
use serde::Serialize;

/// One scored record and where it came from.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub source: String,
    pub record: CandidateRecord,
    pub report: ScoreReport,
}

impl ScoredCandidate {
    /// Score a loaded record, augmenting it with the score fields and the
    /// `"score/100"` display string.
    pub fn from_loaded(scorer: &Scorer, loaded: LoadedRecord) -> Self {
        let LoadedRecord { source, mut record } = loaded;
        let report = scorer.score(&mut record);
        record.set_display_score(&report);
        Self {
            source,
            record,
            report,
        }
    }

    /// Candidate name, or the source label when the record has none.
    pub fn display_name(&self) -> &str {
        self.record
            .name()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(self.source.as_str())
    }
}

/// Aggregate numbers over a batch of scored candidates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub candidates: usize,
    pub average_score: f64,
    pub highest_score: u32,
    pub lowest_score: u32,
    pub strong: usize,
    pub good: usize,
    pub potential: usize,
    pub weak: usize,
}

impl BatchSummary {
    pub fn from_candidates(candidates: &[ScoredCandidate]) -> Self {
        let totals: Vec<u32> = candidates.iter().map(|c| c.report.total).collect();
        let count_tier = |tier: Recommendation| {
            candidates
                .iter()
                .filter(|c| c.report.recommendation == tier)
                .count()
        };

        let average_score = if totals.is_empty() {
            0.0
        } else {
            totals.iter().map(|&t| f64::from(t)).sum::<f64>() / totals.len() as f64
        };

        Self {
            candidates: candidates.len(),
            average_score,
            highest_score: totals.iter().copied().max().unwrap_or(0),
            lowest_score: totals.iter().copied().min().unwrap_or(0),
            strong: count_tier(Recommendation::StrongMatch),
            good: count_tier(Recommendation::GoodMatch),
            potential: count_tier(Recommendation::PotentialMatch),
            weak: count_tier(Recommendation::WeakMatch),
        }
    }

    /// Number of candidates scoring below `threshold`
    pub fn below(candidates: &[ScoredCandidate], threshold: u32) -> usize {
        candidates
            .iter()
            .filter(|c| c.report.total < threshold)
            .count()
    }
}
