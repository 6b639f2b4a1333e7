//! Descriptive attributes of a posting.
//!
//! `PostingDetails` is what a sponsor fills in while drafting; it is supplied
//! whole on creation and on every `update_details` call.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the job is located.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub city: String,
}

impl Location {
    pub fn new(country: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            city: city.into(),
        }
    }

    /// True when both country and city are non-blank.
    pub fn is_fully_specified(&self) -> bool {
        !self.country.trim().is_empty() && !self.city.trim().is_empty()
    }
}

/// Housing arrangement offered with the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccommodationType {
    /// Worker lives in the sponsor's household.
    LiveIn,
    /// Worker arranges their own housing.
    LiveOut,
    /// Sponsor provides separate housing.
    Provided,
}

/// Everything about a posting that a sponsor edits while in draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingDetails {
    pub title: String,
    pub description: String,
    pub required_skills: BTreeSet<String>,
    pub required_languages: BTreeSet<String>,
    pub min_experience_years: u32,
    pub preferred_nationality: Option<String>,
    pub location: Location,
    pub contract_duration_months: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub benefits: BTreeSet<String>,
    pub working_hours: Option<String>,
    pub days_off: Option<String>,
    pub accommodation_type: Option<AccommodationType>,
}

impl PostingDetails {
    /// Trims free-text fields and drops blank tags from the sets.
    pub(crate) fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            required_skills: normalize_tags(self.required_skills),
            required_languages: normalize_tags(self.required_languages),
            preferred_nationality: self
                .preferred_nationality
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            location: Location::new(self.location.country.trim(), self.location.city.trim()),
            benefits: normalize_tags(self.benefits),
            working_hours: non_blank(self.working_hours),
            days_off: non_blank(self.days_off),
            ..self
        }
    }
}

fn normalize_tags(tags: BTreeSet<String>) -> BTreeSet<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
