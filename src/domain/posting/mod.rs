//! Posting module - the job-posting aggregate and its value objects.
//!
//! A posting moves `draft → open → {closed | filled | cancelled}`, gated by a
//! completeness check on publish and an application ceiling while open.

mod aggregate;
mod compensation;
mod criteria;
mod details;
mod errors;
mod events;
mod status;

pub use aggregate::{Posting, MAX_EXPIRY_DAYS};
pub use compensation::{Compensation, PaymentPeriod};
pub use criteria::{PostingSearchCriteria, SalaryRange};
pub use details::{AccommodationType, Location, PostingDetails};
pub use errors::PostingError;
pub use events::{
    PostingEvent, PostingEventKind, MAX_APPLICATIONS_REACHED, POSTING_AGGREGATE_TYPE,
};
pub use status::PostingStatus;
