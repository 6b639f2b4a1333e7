//! Hireflow - Job posting lifecycle and candidate matching
//!
//! Sponsors draft postings for domestic-worker roles, publish them for a
//! bounded window and take applications up to a ceiling. Candidates are
//! scored against open postings with a weighted match score.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
