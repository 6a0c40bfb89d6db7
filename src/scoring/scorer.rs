//! Rubric scorer for candidate records

use crate::record::CandidateRecord;
use crate::scoring::recommendation::Recommendation;
use crate::scoring::rubric;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound of the final score.
pub const MAX_SCORE: u32 = 100;

/// Points earned in each rubric category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub basic_information: u32,
    pub skills: u32,
    pub education: u32,
    pub work_experience: u32,
    pub projects_certifications: u32,
}

impl ScoreBreakdown {
    pub fn sum(&self) -> u32 {
        self.basic_information
            + self.skills
            + self.education
            + self.work_experience
            + self.projects_certifications
    }

    /// `(category, points, maximum)` triples in rubric order.
    pub fn categories(&self) -> [(&'static str, u32, u32); 5] {
        [
            ("basic_information", self.basic_information, rubric::BASIC_INFORMATION_MAX),
            ("skills", self.skills, rubric::SKILLS_MAX),
            ("education", self.education, rubric::EDUCATION_MAX),
            ("work_experience", self.work_experience, rubric::WORK_EXPERIENCE_MAX),
            (
                "projects_certifications",
                self.projects_certifications,
                rubric::PROJECTS_CERTIFICATIONS_MAX,
            ),
        ]
    }
}

/// Outcome of scoring one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub total: u32,
    pub breakdown: ScoreBreakdown,
    pub recommendation: Recommendation,
}

impl ScoreReport {
    /// Display form used by tracking sheets, e.g. `"72/100"`.
    pub fn display_score(&self) -> String {
        format!("{}/{}", self.total, MAX_SCORE)
    }
}

/// Scores candidate records against the fixed rubric.
///
/// Holds no per-record state, so a single instance can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct Scorer {
    technical_keywords: HashSet<String>,
}

impl Scorer {
    pub fn new() -> Self {
        Self {
            technical_keywords: rubric::TECHNICAL_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    /// Compute the score for a record without modifying it.
    pub fn evaluate(&self, record: &CandidateRecord) -> ScoreReport {
        let breakdown = ScoreBreakdown {
            basic_information: rubric::basic_information(record),
            skills: rubric::skills(record, &self.technical_keywords),
            education: rubric::education(record),
            work_experience: rubric::work_experience(record),
            projects_certifications: rubric::projects_certifications(record),
        };
        debug!("Rubric breakdown: {:?}", breakdown);

        // Every contribution is a whole number, so no rounding step is needed.
        let total = breakdown.sum().min(MAX_SCORE);

        ScoreReport {
            total,
            breakdown,
            recommendation: Recommendation::for_score(total),
        }
    }

    /// Score a record and write the results onto it.
    pub fn score(&self, record: &mut CandidateRecord) -> ScoreReport {
        let report = self.evaluate(record);
        record.apply_score(&report);
        report
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(value: Value) -> CandidateRecord {
        CandidateRecord::from_value(value).unwrap()
    }

    fn strong_candidate() -> CandidateRecord {
        record(json!({
            "name": "Jane Doe",
            "email": "jane.doe@example.com",
            "phone": "+1 (555) 123-4567",
            "skills": ["Python", "Java", "SQL", "AWS", "Docker", "Kubernetes", "React", "Node"],
            "education": [
                {"degree": "MSc", "percentage": "88%", "cgpa": 9.0},
                {"degree": "BSc", "percentage": 82, "cgpa": 8.1}
            ],
            "work_experience": [
                {"company": "Acme", "duration": "3 years"},
                {"company": "Globex", "duration": "2 years"},
                {"company": "Initech", "duration": "1 year"}
            ],
            "projects": [{"name": "A"}, {"name": "B"}, {"name": "C"}],
            "certifications": ["CKA", "AWS SAA", "PMP", "CSM"]
        }))
    }

    #[test]
    fn test_empty_record_scores_zero() {
        let report = Scorer::new().evaluate(&CandidateRecord::default());
        assert_eq!(report.total, 0);
        assert_eq!(report.breakdown, ScoreBreakdown::default());
        assert_eq!(report.recommendation, Recommendation::WeakMatch);
        assert_eq!(report.display_score(), "0/100");
    }

    #[test]
    fn test_full_marks() {
        let report = Scorer::new().evaluate(&strong_candidate());
        assert_eq!(
            report.breakdown,
            ScoreBreakdown {
                basic_information: 15,
                skills: 25,
                education: 20,
                work_experience: 25,
                projects_certifications: 15,
            }
        );
        assert_eq!(report.total, 100);
        assert_eq!(report.recommendation, Recommendation::StrongMatch);
    }

    #[test]
    fn test_score_augments_record() {
        let mut rec = record(json!({"name": "Jane Doe", "skills": ["python", "sql", "excel"]}));
        let report = Scorer::new().score(&mut rec);

        assert_eq!(report.total, 5 + 9);
        assert_eq!(rec.total_score, Some(14));
        assert_eq!(rec.detailed_scores, Some(report.breakdown));
        assert_eq!(rec.ats_recommendation, Some(Recommendation::WeakMatch));
        // The display string is left to the caller
        assert!(rec.resume_score.is_none());

        let out = serde_json::to_value(&rec).unwrap();
        assert_eq!(out["detailed_scores"]["skills"], 9);
        assert_eq!(out["ats_recommendation"], "Weak Match - May Need Improvement");
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let scorer = Scorer::new();
        let original = strong_candidate();

        let mut first = original.clone();
        let first_report = scorer.score(&mut first);

        // Rescoring an already augmented record changes nothing
        let mut second = first.clone();
        let second_report = scorer.score(&mut second);

        assert_eq!(first_report, second_report);
        assert_eq!(first, second);
        assert_eq!(scorer.evaluate(&original), first_report);
    }

    #[test]
    fn test_malformed_record_never_panics() {
        let rec = record(json!({
            "name": ["Jane", "Doe"],
            "email": 12,
            "phone": {"mobile": "5551234567"},
            "skills": "python",
            "education": [{"percentage": "eighty", "cgpa": "9"}, 5],
            "work_experience": [{"duration": null}, {"duration": "ten years"}],
            "projects": null,
            "certifications": 3
        }));
        let report = Scorer::new().evaluate(&rec);
        assert_eq!(report.breakdown.education, 10);
        assert_eq!(report.breakdown.work_experience, 10);
        assert_eq!(report.total, 20);
    }

    #[test]
    fn test_recommendation_follows_total() {
        // 15 basic + 25 skills + 10 education + 19 experience, one short of the next tier
        let rec = record(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "5551234567",
            "skills": ["Python", "Java", "SQL", "AWS", "Docker", "Kubernetes", "React", "Node"],
            "education": [{}, {}],
            "work_experience": [{}, {}, {"duration": "2 years"}]
        }));
        let report = Scorer::new().evaluate(&rec);
        assert_eq!(report.total, 15 + 25 + 10 + 19);
        assert_eq!(report.recommendation, Recommendation::PotentialMatch);

        let mut rec = rec;
        rec.certifications = Some(json!(["CKA"]));
        let report = Scorer::new().evaluate(&rec);
        assert_eq!(report.total, 71);
        assert_eq!(report.recommendation, Recommendation::GoodMatch);
    }

    #[test]
    fn test_total_bounded() {
        let scorer = Scorer::new();
        for rec in [CandidateRecord::default(), strong_candidate()] {
            let report = scorer.evaluate(&rec);
            assert!(report.total <= MAX_SCORE);
            assert_eq!(report.total, report.breakdown.sum().min(MAX_SCORE));
        }
    }

    #[test]
    fn test_oversized_record_stays_within_caps() {
        let skills: Vec<&str> = rubric::TECHNICAL_KEYWORDS.iter().copied().cycle().take(1000).collect();
        let rec = record(json!({
            "name": "Jane Q Public Doe",
            "skills": skills,
            "education": vec![json!({"percentage": 99, "cgpa": 9.9}); 100],
            "work_experience": vec![json!({"duration": "99 years"}); 100],
            "projects": vec![json!({"name": "P"}); 100],
            "certifications": vec!["CKA"; 100]
        }));
        let report = Scorer::new().evaluate(&rec);

        for (name, points, max) in report.breakdown.categories() {
            assert!(points <= max, "{} scored {} over its cap of {}", name, points, max);
        }
        assert_eq!(
            report.breakdown,
            ScoreBreakdown {
                basic_information: 5,
                skills: 25,
                education: 20,
                work_experience: 25,
                projects_certifications: 15,
            }
        );
        assert_eq!(report.total, 90);
        assert!(report.total <= MAX_SCORE);
    }

    #[test]
    fn test_breakdown_categories_order() {
        let names: Vec<&str> = ScoreBreakdown::default()
            .categories()
            .iter()
            .map(|(name, _, _)| *name)
            .collect();
        assert_eq!(
            names,
            vec![
                "basic_information",
                "skills",
                "education",
                "work_experience",
                "projects_certifications"
            ]
        );
    }

    #[test]
    fn test_scorer_is_shareable_across_threads() {
        let scorer = std::sync::Arc::new(Scorer::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let scorer = scorer.clone();
                std::thread::spawn(move || scorer.evaluate(&strong_candidate()).total)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 100);
        }
    }
}
