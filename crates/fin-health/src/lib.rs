//! Financial health scoring for lead-generation funnels.
//!
//! [`scoring`] is the pure engine; [`leads`] wraps it with review, storage and
//! delivery seams plus an axum router.

pub mod config;
pub mod error;
pub mod leads;
pub mod scoring;
pub mod telemetry;
