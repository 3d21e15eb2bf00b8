//! Scoring, classification and population statistics for hospital AI
//! maturity surveys.
//!
//! The [`assessment`] module holds the pure engine; [`survey`] turns CSV
//! exports into [`assessment::Submission`] values for it.

pub mod assessment;
pub mod config;
pub mod error;
pub mod survey;
pub mod telemetry;
