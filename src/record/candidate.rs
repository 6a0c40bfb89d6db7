//! Candidate record model
//!
//! Records come from an upstream extraction step and are only loosely
//! shaped. Known fields are kept as raw JSON values so that nothing is
//! lost on a round trip; typed access goes through accessors and entry
//! views that return `None` whenever a value has the wrong type or does
//! not parse.

use crate::error::{Result, ResumeScorerError};
use crate::record::sanitize;
use crate::scoring::{Recommendation, ScoreBreakdown, ScoreReport};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One résumé's extracted content, plus the score fields added to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Value>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub detailed_scores: Option<ScoreBreakdown>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u32>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ats_recommendation: Option<Recommendation>,

    /// Display form of the total, e.g. `"72/100"`
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub resume_score: Option<String>,

    /// Any keys the scorer does not know about, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept any JSON value and keep it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn as_list(field: &Option<Value>) -> Option<&[Value]> {
    field.as_ref().and_then(Value::as_array).map(Vec::as_slice)
}

fn as_str(field: &Option<Value>) -> Option<&str> {
    field.as_ref().and_then(Value::as_str)
}

impl CandidateRecord {
    /// Parse a record from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Build a record from an already parsed JSON value.
    ///
    /// Only the top-level shape is checked; every field inside is accepted
    /// as-is.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ResumeScorerError::InvalidInput(format!(
                "expected a JSON object for a candidate record, found {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn name(&self) -> Option<&str> {
        as_str(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        as_str(&self.email)
    }

    pub fn phone(&self) -> Option<&str> {
        as_str(&self.phone)
    }

    /// Raw skill list. Elements are usually strings but are not guaranteed to be.
    pub fn skills(&self) -> Option<&[Value]> {
        as_list(&self.skills)
    }

    pub fn education(&self) -> Option<&[Value]> {
        as_list(&self.education)
    }

    pub fn work_experience(&self) -> Option<&[Value]> {
        as_list(&self.work_experience)
    }

    pub fn certifications(&self) -> Option<&[Value]> {
        as_list(&self.certifications)
    }

    pub fn projects(&self) -> Option<&[Value]> {
        as_list(&self.projects)
    }

    /// Education entries that are JSON objects; other elements are skipped.
    pub fn education_entries(&self) -> impl Iterator<Item = EducationEntry<'_>> {
        self.education()
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_object)
            .map(|fields| EducationEntry { fields })
    }

    pub fn experience_entries(&self) -> impl Iterator<Item = ExperienceEntry<'_>> {
        self.work_experience()
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_object)
            .map(|fields| ExperienceEntry { fields })
    }

    pub fn project_entries(&self) -> impl Iterator<Item = ProjectEntry<'_>> {
        self.projects()
            .unwrap_or_default()
            .iter()
            .filter_map(Value::as_object)
            .map(|fields| ProjectEntry { fields })
    }

    /// Record the scorer's results on this record.
    pub fn apply_score(&mut self, report: &ScoreReport) {
        self.detailed_scores = Some(report.breakdown);
        self.total_score = Some(report.total);
        self.ats_recommendation = Some(report.recommendation);
    }

    /// Set the `"score/100"` display string used by tracking sheets.
    pub fn set_display_score(&mut self, report: &ScoreReport) {
        self.resume_score = Some(report.display_score());
    }

    /// Replace a decorated email with the bare address found in it.
    ///
    /// An email string without any `@` becomes empty. Returns whether the
    /// field was touched; non-string emails are left alone.
    pub fn normalize_email(&mut self) -> bool {
        match &self.email {
            Some(Value::String(raw)) => {
                let address = sanitize::extract_email_address(raw).unwrap_or_default();
                self.email = Some(Value::String(address));
                true
            }
            _ => false,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Borrowed view over one education entry.
#[derive(Debug, Clone, Copy)]
pub struct EducationEntry<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> EducationEntry<'a> {
    pub fn institution(&self) -> Option<&'a str> {
        self.fields.get("institution").and_then(Value::as_str)
    }

    pub fn degree(&self) -> Option<&'a str> {
        self.fields.get("degree").and_then(Value::as_str)
    }

    pub fn graduation(&self) -> Option<&'a Value> {
        self.fields.get("graduation")
    }

    pub fn year(&self) -> Option<&'a Value> {
        self.fields.get("year")
    }

    /// Percentage as a number. Accepts numbers and strings such as `"85%"`.
    pub fn percentage(&self) -> Option<f64> {
        match self.fields.get("percentage")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .strip_suffix('%')
                    .unwrap_or(trimmed)
                    .trim()
                    .parse()
                    .ok()
            }
            _ => None,
        }
    }

    /// CGPA, only when given as a JSON number.
    pub fn cgpa(&self) -> Option<f64> {
        self.fields.get("cgpa").and_then(Value::as_f64)
    }
}

/// Borrowed view over one work experience entry.
#[derive(Debug, Clone, Copy)]
pub struct ExperienceEntry<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> ExperienceEntry<'a> {
    pub fn company(&self) -> Option<&'a str> {
        self.fields.get("company").and_then(Value::as_str)
    }

    pub fn role(&self) -> Option<&'a str> {
        self.fields.get("role").and_then(Value::as_str)
    }

    pub fn duration(&self) -> Option<&'a str> {
        self.fields.get("duration").and_then(Value::as_str)
    }

    pub fn responsibilities(&self) -> Vec<&'a str> {
        self.fields
            .get("responsibilities")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Years of experience read from a duration like `"3 years"`.
    ///
    /// Every digit in the duration is concatenated, so `"2018-2021, 3 years"`
    /// reads as one large number. Overlong digit runs saturate at `u64::MAX`.
    /// `None` when the duration does not mention years or has no digits.
    pub fn duration_years(&self) -> Option<u64> {
        let duration = self.duration()?;
        if !duration.to_lowercase().contains("year") {
            return None;
        }
        let digits = sanitize::digits(duration);
        if digits.is_empty() {
            return None;
        }
        Some(
            digits
                .chars()
                .filter_map(sanitize::decimal_value)
                .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d))),
        )
    }
}

/// Borrowed view over one project entry.
#[derive(Debug, Clone, Copy)]
pub struct ProjectEntry<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> ProjectEntry<'a> {
    pub fn name(&self) -> Option<&'a str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&'a str> {
        self.fields.get("description").and_then(Value::as_str)
    }

    /// Technologies, whether listed as an array or as one comma-separated string.
    pub fn technologies(&self) -> Vec<&'a str> {
        match self.fields.get("technologies_used") {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(s)) => s.split(',').map(str::trim).filter(|t| !t.is_empty()).collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CandidateRecord {
        CandidateRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_object_parses() {
        let rec = CandidateRecord::from_json("{}").unwrap();
        assert_eq!(rec, CandidateRecord::default());
        assert!(rec.name().is_none());
        assert_eq!(rec.education_entries().count(), 0);
    }

    #[test]
    fn test_non_object_rejected() {
        let err = CandidateRecord::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, ResumeScorerError::InvalidInput(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_wrong_types_are_kept_but_not_readable() {
        let rec = record(json!({
            "name": 42,
            "skills": "Python, Java",
            "education": {"degree": "BSc"}
        }));
        assert!(rec.name().is_none());
        assert!(rec.skills().is_none());
        assert!(rec.education().is_none());
        assert_eq!(rec.name, Some(json!(42)));
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let input = json!({"name": "Jane Doe", "linkedin": "in/jane", "summary": {"years": 4}});
        let rec = record(input.clone());
        assert_eq!(rec.extra.len(), 2);
        assert_eq!(serde_json::to_value(&rec).unwrap(), input);
    }

    #[test]
    fn test_stale_score_fields_are_dropped() {
        let rec = record(json!({
            "total_score": "lots",
            "detailed_scores": [1, 2, 3],
            "ats_recommendation": "Maybe?"
        }));
        assert!(rec.total_score.is_none());
        assert!(rec.detailed_scores.is_none());
        assert!(rec.ats_recommendation.is_none());
        assert!(rec.extra.is_empty());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let rec = record(json!({"email": null, "skills": null}));
        assert!(rec.email.is_none());
        assert!(rec.skills.is_none());
    }

    #[test]
    fn test_percentage_parsing() {
        let rec = record(json!({"education": [
            {"percentage": "85%"},
            {"percentage": " 72.5 % "},
            {"percentage": 91},
            {"percentage": "not-a-number"},
            {"percentage": null},
            {}
        ]}));
        let values: Vec<Option<f64>> = rec.education_entries().map(|e| e.percentage()).collect();
        assert_eq!(values, vec![Some(85.0), Some(72.5), Some(91.0), None, None, None]);
    }

    #[test]
    fn test_cgpa_requires_number() {
        let rec = record(json!({"education": [{"cgpa": 8.5}, {"cgpa": "8.5"}, {"cgpa": 4}]}));
        let values: Vec<Option<f64>> = rec.education_entries().map(|e| e.cgpa()).collect();
        assert_eq!(values, vec![Some(8.5), None, Some(4.0)]);
    }

    #[test]
    fn test_non_object_entries_skipped() {
        let rec = record(json!({"education": ["BSc", {"degree": "MSc"}, 3]}));
        assert_eq!(rec.education().unwrap().len(), 3);
        let degrees: Vec<_> = rec.education_entries().filter_map(|e| e.degree()).collect();
        assert_eq!(degrees, vec!["MSc"]);
    }

    #[test]
    fn test_duration_years() {
        let rec = record(json!({"work_experience": [
            {"duration": "3 years"},
            {"duration": "1 Year 6 months"},
            {"duration": "6 months"},
            {"duration": "several years"},
            {"duration": 3},
            {"duration": "99999999999999999999999999 years"},
            {"duration": "１２ years"}
        ]}));
        let years: Vec<Option<u64>> = rec.experience_entries().map(|e| e.duration_years()).collect();
        assert_eq!(
            years,
            vec![Some(3), Some(16), None, None, None, Some(u64::MAX), Some(12)]
        );
    }

    #[test]
    fn test_experience_details() {
        let rec = record(json!({"work_experience": [{
            "company": "Acme",
            "role": "Engineer",
            "responsibilities": ["Built things", 7, "Fixed things"]
        }]}));
        let entry = rec.experience_entries().next().unwrap();
        assert_eq!(entry.company(), Some("Acme"));
        assert_eq!(entry.role(), Some("Engineer"));
        assert_eq!(entry.responsibilities(), vec!["Built things", "Fixed things"]);
    }

    #[test]
    fn test_project_technologies() {
        let rec = record(json!({"projects": [
            {"name": "Crawler", "technologies_used": ["Rust", "Tokio"]},
            {"name": "Site", "technologies_used": "React, Node"}
        ]}));
        let techs: Vec<Vec<&str>> = rec.project_entries().map(|p| p.technologies()).collect();
        assert_eq!(techs, vec![vec!["Rust", "Tokio"], vec!["React", "Node"]]);
    }

    #[test]
    fn test_normalize_email() {
        let mut rec = record(json!({"email": "📧 jane@example.com"}));
        assert!(rec.normalize_email());
        assert_eq!(rec.email(), Some("jane@example.com"));

        let mut rec = record(json!({"email": "not an email"}));
        assert!(rec.normalize_email());
        assert_eq!(rec.email(), Some(""));

        let mut rec = record(json!({"email": ["a@b.com"]}));
        assert!(!rec.normalize_email());
    }
}
