//! Lead intake: scoring submissions, holding outsized advice for review and
//! handing cleared profiles to the delivery pipeline.

pub mod domain;
pub mod import;
pub mod repository;
pub mod review;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{LeadId, LeadStatus, LeadSubmission, ReviewFlag};
pub use import::{LeadCsvImporter, LeadImportError};
pub use repository::{
    DeliveryError, DeliveryNotice, DeliveryPublisher, LeadRecord, LeadRepository, LeadStatusView,
    RepositoryError,
};
pub use review::{ReviewGate, ReviewPolicy};
pub use router::lead_router;
pub use service::{LeadService, LeadServiceError};
