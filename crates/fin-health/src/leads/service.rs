use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{LeadId, LeadStatus, LeadSubmission};
use super::repository::{
    DeliveryError, DeliveryNotice, DeliveryPublisher, LeadRecord, LeadRepository, RepositoryError,
};
use super::review::ReviewGate;
use crate::scoring::{FinancialProfile, FinancialScoringEngine, ScoreSet, UserFinancialInput};

/// Service composing the scoring engine, review gate, repository and delivery hook.
pub struct LeadService<R, D> {
    engine: Arc<FinancialScoringEngine>,
    gate: Arc<ReviewGate>,
    repository: Arc<R>,
    delivery: Arc<D>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

impl<R, D> LeadService<R, D>
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    pub fn new(
        engine: FinancialScoringEngine,
        gate: ReviewGate,
        repository: Arc<R>,
        delivery: Arc<D>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            gate: Arc::new(gate),
            repository,
            delivery,
        }
    }

    pub fn scores(&self, input: &UserFinancialInput) -> ScoreSet {
        self.engine.scores(input)
    }

    pub fn profile(&self, input: &UserFinancialInput) -> FinancialProfile {
        self.engine.profile(input)
    }

    /// Score a submission, run the review gate and persist the result.
    ///
    /// Leads that clear the gate are handed to delivery straight away.
    pub fn submit(&self, submission: LeadSubmission) -> Result<LeadRecord, LeadServiceError> {
        let profile = self.engine.profile(&submission.input);
        let review_flags = self.gate.assess(&submission.input, &profile);
        let status = if review_flags.is_empty() {
            LeadStatus::Scored
        } else {
            LeadStatus::PendingReview
        };

        let record = LeadRecord {
            id: next_lead_id(),
            submission,
            profile,
            status,
            review_flags,
            received_at: Utc::now(),
            reviewer_note: None,
            delivered: false,
        };

        let stored = self.repository.insert(record)?;
        info!(
            lead_id = %stored.id.0,
            status = stored.status.label(),
            overall = stored.profile.scores.overall_financial_health_score,
            flags = stored.review_flags.len(),
            "lead scored"
        );

        if stored.status == LeadStatus::Scored {
            return self.deliver(stored);
        }

        Ok(stored)
    }

    pub fn get(&self, id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn pending_review(&self, limit: usize) -> Result<Vec<LeadRecord>, LeadServiceError> {
        Ok(self.repository.pending_review(limit)?)
    }

    /// Reviewer sign-off; releases the lead to delivery.
    ///
    /// The approval is stored even when delivery fails; [`Self::redeliver`]
    /// retries it.
    pub fn approve(
        &self,
        id: &LeadId,
        note: Option<String>,
    ) -> Result<LeadRecord, LeadServiceError> {
        let record = self.transition(id, LeadStatus::Approved, note)?;
        self.deliver(record)
    }

    /// Re-send a cleared lead whose delivery failed. Already delivered leads
    /// are returned unchanged.
    pub fn redeliver(&self, id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self.get(id)?;
        if record.delivered {
            return Ok(record);
        }
        if !record.status.is_deliverable() {
            return Err(LeadServiceError::NotDeliverable {
                status: record.status.label(),
            });
        }
        info!(lead_id = %id.0, status = record.status.label(), "retrying delivery");
        self.deliver(record)
    }

    pub fn reject(&self, id: &LeadId, note: Option<String>) -> Result<LeadRecord, LeadServiceError> {
        self.transition(id, LeadStatus::Rejected, note)
    }

    fn transition(
        &self,
        id: &LeadId,
        next: LeadStatus,
        note: Option<String>,
    ) -> Result<LeadRecord, LeadServiceError> {
        let mut record = self.get(id)?;
        if record.status != LeadStatus::PendingReview {
            warn!(lead_id = %id.0, from = record.status.label(), to = next.label(), "rejected review transition");
            return Err(LeadServiceError::InvalidTransition {
                from: record.status.label(),
                to: next.label(),
            });
        }

        record.status = next;
        record.reviewer_note = note;
        self.repository.update(record.clone())?;
        info!(lead_id = %id.0, status = next.label(), "lead reviewed");
        Ok(record)
    }

    /// Publish, then persist the delivered mark. A failed publish leaves the
    /// stored record undelivered.
    fn deliver(&self, mut record: LeadRecord) -> Result<LeadRecord, LeadServiceError> {
        if let Err(error) = self.publish_ready(&record) {
            warn!(lead_id = %record.id.0, %error, "delivery failed");
            return Err(error);
        }
        record.delivered = true;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    fn publish_ready(&self, record: &LeadRecord) -> Result<(), LeadServiceError> {
        let scores = &record.profile.scores;
        let mut details = BTreeMap::new();
        details.insert("status".to_string(), record.status.label().to_string());
        details.insert(
            "overall_financial_health_score".to_string(),
            scores.overall_financial_health_score.to_string(),
        );
        details.insert(
            "monthly_investment".to_string(),
            format!("{:.0}", record.profile.recommendations.monthly_investment),
        );

        self.delivery.publish(DeliveryNotice {
            template: "financial_profile_ready".to_string(),
            lead_id: record.id.clone(),
            details,
        })?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error("lead in status {status} cannot be delivered")]
    NotDeliverable { status: &'static str },
    #[error("lead cannot move from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}
