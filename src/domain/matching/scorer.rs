//! Weighted compatibility score between a posting and a candidate.
//!
//! Five factors contribute to a 100-point scale:
//!
//! | Factor       | Weight | Earned                                         |
//! |--------------|--------|------------------------------------------------|
//! | Skills       | 30     | share of required skills the candidate has     |
//! | Languages    | 25     | share of required languages the candidate has  |
//! | Experience   | 20     | candidate years / required years, capped at 1  |
//! | Nationality  | 15     | all or nothing against the preference          |
//! | Completeness | 10     | profile completeness percentage                |
//!
//! An empty requirement (no skills, no languages, zero years, no preferred
//! nationality) earns the factor's full weight.

use std::collections::BTreeSet;

use crate::domain::posting::Posting;

use super::CandidateProjection;

pub const SKILLS_WEIGHT: f64 = 30.0;
pub const LANGUAGES_WEIGHT: f64 = 25.0;
pub const EXPERIENCE_WEIGHT: f64 = 20.0;
pub const NATIONALITY_WEIGHT: f64 = 15.0;
pub const COMPLETENESS_WEIGHT: f64 = 10.0;

/// Highest attainable weighted sum.
pub const MAX_WEIGHT: f64 =
    SKILLS_WEIGHT + LANGUAGES_WEIGHT + EXPERIENCE_WEIGHT + NATIONALITY_WEIGHT + COMPLETENESS_WEIGHT;

/// Points earned per factor, each between zero and its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchBreakdown {
    pub skills: f64,
    pub languages: f64,
    pub experience: f64,
    pub nationality: f64,
    pub completeness: f64,
}

impl MatchBreakdown {
    pub fn compute(posting: &Posting, candidate: &CandidateProjection) -> Self {
        let details = posting.details();

        Self {
            skills: overlap_points(&details.required_skills, &candidate.skills, SKILLS_WEIGHT),
            languages: overlap_points(
                &details.required_languages,
                &candidate.languages,
                LANGUAGES_WEIGHT,
            ),
            experience: experience_points(
                details.min_experience_years,
                candidate.experience_years(),
            ),
            nationality: nationality_points(
                details.preferred_nationality.as_deref(),
                candidate.nationality.as_deref(),
            ),
            completeness: candidate.profile_completeness.of(COMPLETENESS_WEIGHT),
        }
    }

    pub fn weighted_sum(&self) -> f64 {
        self.skills + self.languages + self.experience + self.nationality + self.completeness
    }

    /// Weighted sum scaled to 0-100 and rounded to the nearest integer.
    pub fn score(&self) -> u8 {
        let scaled = (self.weighted_sum() / MAX_WEIGHT * 100.0).round();
        scaled.clamp(0.0, 100.0) as u8
    }
}

/// Compatibility of `candidate` with `posting`, from 0 to 100.
pub fn match_score(posting: &Posting, candidate: &CandidateProjection) -> u8 {
    MatchBreakdown::compute(posting, candidate).score()
}

fn overlap_points(required: &BTreeSet<String>, offered: &BTreeSet<String>, weight: f64) -> f64 {
    let required: BTreeSet<String> = required.iter().filter_map(|s| normalize(s)).collect();
    if required.is_empty() {
        return weight;
    }
    let offered: BTreeSet<String> = offered.iter().filter_map(|s| normalize(s)).collect();

    let matched = required.intersection(&offered).count();
    matched as f64 / required.len() as f64 * weight
}

fn experience_points(required_years: u32, candidate_years: f64) -> f64 {
    if required_years == 0 {
        return EXPERIENCE_WEIGHT;
    }
    let ratio = candidate_years / f64::from(required_years);
    ratio.min(1.0) * EXPERIENCE_WEIGHT
}

fn nationality_points(preferred: Option<&str>, candidate: Option<&str>) -> f64 {
    let Some(preferred) = preferred.and_then(normalize) else {
        return NATIONALITY_WEIGHT;
    };
    match candidate.and_then(normalize) {
        Some(nationality) if nationality == preferred => NATIONALITY_WEIGHT,
        _ => 0.0,
    }
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}
