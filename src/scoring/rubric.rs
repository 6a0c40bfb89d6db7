//! Rubric category calculators
//!
//! Each function scores one category of a [`CandidateRecord`]. Fields that
//! are missing, wrongly typed or unparseable contribute nothing; none of
//! these functions can fail.

use crate::record::{sanitize, CandidateRecord, EducationEntry};
use std::collections::HashSet;

pub const BASIC_INFORMATION_MAX: u32 = 15;
pub const SKILLS_MAX: u32 = 25;
pub const EDUCATION_MAX: u32 = 20;
pub const WORK_EXPERIENCE_MAX: u32 = 25;
pub const PROJECTS_CERTIFICATIONS_MAX: u32 = 15;

const CONTACT_POINTS: u32 = 5;
const MIN_PHONE_DIGITS: usize = 10;

const TECHNICAL_SKILL_POINTS: u32 = 2;
const TECHNICAL_SKILL_CAP: u32 = 10;

const EDUCATION_ENTRY_POINTS: u32 = 5;
const EDUCATION_COUNT_CAP: u32 = 10;

const EXPERIENCE_ENTRY_POINTS: u32 = 5;
const EXPERIENCE_COUNT_CAP: u32 = 15;
const POINTS_PER_YEAR: u64 = 2;
const DURATION_CAP: u32 = 10;

const PROJECT_POINTS: u32 = 3;
const PROJECT_CAP: u32 = 8;
const CERTIFICATION_POINTS: u32 = 2;
const CERTIFICATION_CAP: u32 = 7;

/// Keywords that earn the technical skill bonus, matched case-insensitively.
pub const TECHNICAL_KEYWORDS: [&str; 10] = [
    "python",
    "java",
    "javascript",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "react",
    "angular",
    "node",
];

/// `per_item * count`, capped, without overflowing on huge lists.
fn capped_count(count: usize, per_item: u32, cap: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(per_item).min(cap)
}

/// Name, email and phone, 5 points each.
pub fn basic_information(record: &CandidateRecord) -> u32 {
    let mut score = 0;

    if record
        .name()
        .is_some_and(|name| name.split_whitespace().count() >= 2)
    {
        score += CONTACT_POINTS;
    }

    if record
        .email()
        .is_some_and(|email| sanitize::has_email_shape(&sanitize::clean_email(email)))
    {
        score += CONTACT_POINTS;
    }

    if record
        .phone()
        .is_some_and(|phone| sanitize::digits(phone).chars().count() >= MIN_PHONE_DIGITS)
    {
        score += CONTACT_POINTS;
    }

    score
}

/// Stepped bonus on the number of skills plus 2 points per technical keyword.
pub fn skills(record: &CandidateRecord, technical_keywords: &HashSet<String>) -> u32 {
    let Some(skills) = record.skills() else {
        return 0;
    };

    let breadth = match skills.len() {
        8.. => 15,
        5..=7 => 10,
        3..=4 => 5,
        _ => 0,
    };

    let technical = skills
        .iter()
        .filter_map(|skill| skill.as_str())
        .filter(|skill| technical_keywords.contains(&skill.to_lowercase()))
        .count();

    breadth + capped_count(technical, TECHNICAL_SKILL_POINTS, TECHNICAL_SKILL_CAP)
}

/// Entry count bonus plus per-entry grade bonuses, capped at 20.
pub fn education(record: &CandidateRecord) -> u32 {
    let Some(entries) = record.education() else {
        return 0;
    };

    let count_bonus = capped_count(entries.len(), EDUCATION_ENTRY_POINTS, EDUCATION_COUNT_CAP);
    let grade_bonus: u32 = record.education_entries().map(grade_points).sum();

    (count_bonus + grade_bonus).min(EDUCATION_MAX)
}

/// Percentage and CGPA bonuses for one entry, each scored on its own.
fn grade_points(entry: EducationEntry<'_>) -> u32 {
    let percentage = match entry.percentage() {
        Some(p) if p >= 80.0 => 3,
        Some(p) if p >= 70.0 => 2,
        _ => 0,
    };

    // The 10-point and 4-point thresholds are checked together since the
    // scale is never stated; any cgpa >= 3.5 already earns the top bonus.
    let cgpa = match entry.cgpa() {
        Some(c) if c >= 8.0 || c >= 3.5 => 3,
        Some(c) if c >= 7.0 || c >= 3.0 => 2,
        _ => 0,
    };

    percentage + cgpa
}

/// Entry count bonus plus a duration bonus, capped at 25.
///
/// The duration bonus is `2 * years` per entry, but the 10 point cap
/// applies to the running total across entries: one entry with an
/// oversized digit string can take the whole cap.
pub fn work_experience(record: &CandidateRecord) -> u32 {
    let Some(entries) = record.work_experience() else {
        return 0;
    };

    let count_bonus =
        capped_count(entries.len(), EXPERIENCE_ENTRY_POINTS, EXPERIENCE_COUNT_CAP);

    let mut duration_bonus: u32 = 0;
    for entry in record.experience_entries() {
        if let Some(years) = entry.duration_years() {
            let points = years.saturating_mul(POINTS_PER_YEAR);
            let total = u64::from(duration_bonus).saturating_add(points);
            duration_bonus = total.min(u64::from(DURATION_CAP)) as u32;
        }
    }

    (count_bonus + duration_bonus).min(WORK_EXPERIENCE_MAX)
}

/// 3 points per project (max 8) plus 2 per certification (max 7).
pub fn projects_certifications(record: &CandidateRecord) -> u32 {
    let projects = record.projects().map_or(0, <[_]>::len);
    let certifications = record.certifications().map_or(0, <[_]>::len);

    capped_count(projects, PROJECT_POINTS, PROJECT_CAP)
        + capped_count(certifications, CERTIFICATION_POINTS, CERTIFICATION_CAP)
}
