//! Candidate record model
//! Holds the loosely typed record produced by extraction and the helpers used to read it

pub mod candidate;
pub mod sanitize;

pub use candidate::{CandidateRecord, EducationEntry, ExperienceEntry, ProjectEntry};
