//! Candidate projection consumed by the matching function.
//!
//! Candidates live in another bounded context; this is only the slice of a
//! profile that scoring needs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::foundation::Percentage;

/// One past job, reduced to its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub duration_months: u32,
}

impl WorkExperience {
    pub fn months(duration_months: u32) -> Self {
        Self { duration_months }
    }
}

/// What the matching function knows about a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProjection {
    pub skills: BTreeSet<String>,
    pub languages: BTreeSet<String>,
    pub work_experience: Vec<WorkExperience>,
    pub nationality: Option<String>,
    pub profile_completeness: Percentage,
}

impl CandidateProjection {
    /// Total experience in fractional years.
    pub fn experience_years(&self) -> f64 {
        let months: u64 = self
            .work_experience
            .iter()
            .map(|w| u64::from(w.duration_months))
            .sum();
        months as f64 / 12.0
    }
}
