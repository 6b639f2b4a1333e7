//! Search criteria for posting lookups.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SponsorId;

use super::{Posting, PostingStatus};

/// Salary bounds, compared against the posting's compensation amount in the
/// same currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub currency: Option<String>,
}

impl SalaryRange {
    /// A posting without compensation never satisfies a salary filter.
    pub fn matches(&self, posting: &Posting) -> bool {
        let Some(pay) = posting.compensation() else {
            return false;
        };
        if let Some(currency) = &self.currency {
            if !pay.currency().eq_ignore_ascii_case(currency.trim()) {
                return false;
            }
        }
        self.min.map_or(true, |min| pay.amount() >= min)
            && self.max.map_or(true, |max| pay.amount() <= max)
    }
}

/// Conjunctive filter over postings; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingSearchCriteria {
    pub sponsor_id: Option<SponsorId>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub status: Option<PostingStatus>,
    pub preferred_nationality: Option<String>,
    pub salary: Option<SalaryRange>,
    pub limit: Option<usize>,
}

impl PostingSearchCriteria {
    pub fn for_sponsor(sponsor_id: SponsorId) -> Self {
        Self {
            sponsor_id: Some(sponsor_id),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: PostingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn in_location(mut self, country: impl Into<String>, city: Option<String>) -> Self {
        self.country = Some(country.into());
        self.city = city;
        self
    }

    pub fn with_salary(mut self, salary: SalaryRange) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True if `posting` satisfies every set filter. `limit` is applied by
    /// the repository, not here.
    pub fn matches(&self, posting: &Posting) -> bool {
        let details = posting.details();

        self.sponsor_id.map_or(true, |id| posting.sponsor_id() == id)
            && self.status.map_or(true, |s| posting.status() == s)
            && text_matches(self.country.as_deref(), Some(&details.location.country))
            && text_matches(self.city.as_deref(), Some(&details.location.city))
            && text_matches(
                self.preferred_nationality.as_deref(),
                details.preferred_nationality.as_deref(),
            )
            && self.salary.as_ref().map_or(true, |range| range.matches(posting))
    }
}

fn text_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match (wanted, actual) {
        (None, _) => true,
        (Some(w), Some(a)) => w.trim().eq_ignore_ascii_case(a.trim()),
        (Some(_), None) => false,
    }
}
