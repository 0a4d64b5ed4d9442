use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::leads::domain::{LeadId, LeadStatus, LeadSubmission};
use crate::leads::repository::{
    DeliveryError, DeliveryNotice, DeliveryPublisher, LeadRecord, LeadRepository, RepositoryError,
};
use crate::leads::review::{ReviewGate, ReviewPolicy};
use crate::leads::{lead_router, LeadService};
use crate::scoring::tests::common::{stretched_household, young_saver};
use crate::scoring::FinancialScoringEngine;

/// Clears the gate: modest advice and a contact e-mail.
pub(super) fn cleared_submission() -> LeadSubmission {
    LeadSubmission {
        input: young_saver(),
        source: Some("landing-page".to_string()),
    }
}

/// Needs roughly 2 959 a month towards retirement.
pub(super) fn oversized_retirement_submission() -> LeadSubmission {
    LeadSubmission::from(stretched_household())
}

/// High earner whose 10% baseline investment (2 000) tops the default limit.
pub(super) fn high_earner_submission() -> LeadSubmission {
    let mut input = young_saver();
    input.personal_details.annual_income = 240_000.0;
    input.expenses_assets.total_investments = 0.0;
    LeadSubmission::from(input)
}

pub(super) fn build_service() -> (
    LeadService<MemoryRepository, MemoryDelivery>,
    Arc<MemoryRepository>,
    Arc<MemoryDelivery>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let delivery = Arc::new(MemoryDelivery::default());
    let service = LeadService::new(
        FinancialScoringEngine::default(),
        ReviewGate::with_policy(ReviewPolicy::default()),
        repository.clone(),
        delivery.clone(),
    );
    (service, repository, delivery)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&record.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending_review(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut pending: Vec<LeadRecord> = guard
            .values()
            .filter(|record| record.status == LeadStatus::PendingReview)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.id.cmp(&b.id));
        pending.truncate(limit);
        Ok(pending)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDelivery {
    notices: Arc<Mutex<Vec<DeliveryNotice>>>,
}

impl MemoryDelivery {
    pub(super) fn notices(&self) -> Vec<DeliveryNotice> {
        self.notices.lock().expect("delivery mutex poisoned").clone()
    }
}

impl DeliveryPublisher for MemoryDelivery {
    fn publish(&self, notice: DeliveryNotice) -> Result<(), DeliveryError> {
        self.notices
            .lock()
            .expect("delivery mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl LeadRepository for ConflictRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending_review(&self, _limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn pending_review(&self, _limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }
}

pub(super) struct FailingDelivery;

impl DeliveryPublisher for FailingDelivery {
    fn publish(&self, _notice: DeliveryNotice) -> Result<(), DeliveryError> {
        Err(DeliveryError::Transport("smtp relay refused".to_string()))
    }
}

/// Refuses the first `outages` publishes, then records notices.
#[derive(Default)]
pub(super) struct FlakyDelivery {
    outages: AtomicUsize,
    delivered: MemoryDelivery,
}

impl FlakyDelivery {
    pub(super) fn failing_once() -> Self {
        Self {
            outages: AtomicUsize::new(1),
            delivered: MemoryDelivery::default(),
        }
    }

    pub(super) fn notices(&self) -> Vec<DeliveryNotice> {
        self.delivered.notices()
    }
}

impl DeliveryPublisher for FlakyDelivery {
    fn publish(&self, notice: DeliveryNotice) -> Result<(), DeliveryError> {
        let remaining = self.outages.load(Ordering::SeqCst);
        if remaining > 0 {
            self.outages.store(remaining - 1, Ordering::SeqCst);
            return Err(DeliveryError::Transport("relay timed out".to_string()));
        }
        self.delivered.publish(notice)
    }
}

pub(super) fn build_flaky_service() -> (
    LeadService<MemoryRepository, FlakyDelivery>,
    Arc<MemoryRepository>,
    Arc<FlakyDelivery>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let delivery = Arc::new(FlakyDelivery::failing_once());
    let service = LeadService::new(
        FinancialScoringEngine::default(),
        ReviewGate::with_policy(ReviewPolicy::default()),
        repository.clone(),
        delivery.clone(),
    );
    (service, repository, delivery)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: LeadService<MemoryRepository, MemoryDelivery>,
) -> axum::Router {
    lead_router(Arc::new(service))
}
