//! Matching module - scores how well a candidate fits a posting.

mod candidate;
mod scorer;

pub use candidate::{CandidateProjection, WorkExperience};
pub use scorer::{
    match_score, MatchBreakdown, COMPLETENESS_WEIGHT, EXPERIENCE_WEIGHT, LANGUAGES_WEIGHT,
    MAX_WEIGHT, NATIONALITY_WEIGHT, SKILLS_WEIGHT,
};
