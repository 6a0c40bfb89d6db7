//! Qualitative recommendation tiers for a final score

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Match - Highly Recommended")]
    StrongMatch,
    #[serde(rename = "Good Match - Recommended")]
    GoodMatch,
    #[serde(rename = "Potential Match - Consider for Review")]
    PotentialMatch,
    #[serde(rename = "Weak Match - May Need Improvement")]
    WeakMatch,
}

impl Recommendation {
    /// Tier for a clamped total, checked from the highest threshold down.
    pub fn for_score(total: u32) -> Self {
        match total {
            85.. => Recommendation::StrongMatch,
            70.. => Recommendation::GoodMatch,
            60.. => Recommendation::PotentialMatch,
            _ => Recommendation::WeakMatch,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::StrongMatch => "Strong Match - Highly Recommended",
            Recommendation::GoodMatch => "Good Match - Recommended",
            Recommendation::PotentialMatch => "Potential Match - Consider for Review",
            Recommendation::WeakMatch => "Weak Match - May Need Improvement",
        }
    }

    /// Short badge text for compact displays
    pub fn badge(&self) -> &'static str {
        match self {
            Recommendation::StrongMatch => "STRONG",
            Recommendation::GoodMatch => "GOOD",
            Recommendation::PotentialMatch => "POTENTIAL",
            Recommendation::WeakMatch => "WEAK",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
