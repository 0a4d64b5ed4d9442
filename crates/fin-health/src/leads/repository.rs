use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{LeadId, LeadStatus, LeadSubmission, ReviewFlag};
use crate::scoring::{FinancialProfile, ScoringVariant};

/// Stored lead: the raw submission verbatim plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub submission: LeadSubmission,
    pub profile: FinancialProfile,
    pub status: LeadStatus,
    pub review_flags: Vec<ReviewFlag>,
    pub received_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_note: Option<String>,
    /// Set once the delivery notice has been published.
    #[serde(default)]
    pub delivered: bool,
}

impl LeadRecord {
    pub fn review_reasons(&self) -> Vec<String> {
        self.review_flags.iter().map(ReviewFlag::summary).collect()
    }

    pub fn status_view(&self) -> LeadStatusView {
        LeadStatusView {
            lead_id: self.id.clone(),
            status: self.status.label(),
            variant: self.profile.variant,
            overall_financial_health_score: self.profile.scores.overall_financial_health_score,
            review_reasons: self.review_reasons(),
            received_at: self.received_at,
            delivered: self.delivered,
        }
    }
}

/// Storage abstraction so the service can be exercised without a document store.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn pending_review(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the e-mail/report pipeline once content may be sent.
pub trait DeliveryPublisher: Send + Sync {
    fn publish(&self, notice: DeliveryNotice) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryNotice {
    pub template: String,
    pub lead_id: LeadId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("delivery transport unavailable: {0}")]
    Transport(String),
}

/// Public projection of a lead; contact details and raw figures stay server side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadStatusView {
    pub lead_id: LeadId,
    pub status: &'static str,
    pub variant: ScoringVariant,
    pub overall_financial_health_score: u8,
    pub review_reasons: Vec<String>,
    pub received_at: DateTime<Utc>,
    pub delivered: bool,
}
