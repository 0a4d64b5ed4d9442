use fin_health::config::ScoringConfig;
use fin_health::error::AppError;
use fin_health::leads::{
    DeliveryError, DeliveryNotice, DeliveryPublisher, LeadId, LeadRecord, LeadRepository,
    LeadStatus, RepositoryError,
};
use fin_health::scoring::{FinancialScoringEngine, ScoringVariant};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<FinancialScoringEngine>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl InMemoryLeadRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<LeadId, LeadRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("lead store lock poisoned".to_string()))
    }
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn pending_review(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.lock()?;
        let mut pending: Vec<LeadRecord> = guard
            .values()
            .filter(|record| record.status == LeadStatus::PendingReview)
            .cloned()
            .collect();
        pending.sort_by_key(|record| record.received_at);
        pending.truncate(limit);
        Ok(pending)
    }
}

/// Stand-in for the e-mail/report pipeline: records notices and logs them.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDeliveryPublisher {
    notices: Arc<Mutex<Vec<DeliveryNotice>>>,
}

impl DeliveryPublisher for InMemoryDeliveryPublisher {
    fn publish(&self, notice: DeliveryNotice) -> Result<(), DeliveryError> {
        info!(lead_id = %notice.lead_id.0, template = %notice.template, "delivery queued");
        let mut guard = self
            .notices
            .lock()
            .map_err(|_| DeliveryError::Transport("delivery log lock poisoned".to_string()))?;
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryDeliveryPublisher {
    pub(crate) fn notices(&self) -> Vec<DeliveryNotice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Engine for the configured benchmarks, optionally forcing a variant.
pub(crate) fn scoring_engine(
    config: &ScoringConfig,
    variant: Option<ScoringVariant>,
) -> Result<FinancialScoringEngine, AppError> {
    let benchmarks = config.benchmarks()?;
    Ok(FinancialScoringEngine::new(
        benchmarks,
        variant.unwrap_or(config.variant),
    ))
}

pub(crate) fn parse_variant(raw: &str) -> Result<ScoringVariant, String> {
    ScoringVariant::parse(raw)
        .ok_or_else(|| format!("unknown scoring variant '{raw}' (expected full or simple)"))
}
