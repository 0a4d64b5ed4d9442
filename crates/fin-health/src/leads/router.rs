use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{LeadId, LeadSubmission};
use super::repository::{DeliveryPublisher, LeadRepository, LeadStatusView, RepositoryError};
use super::service::{LeadService, LeadServiceError};
use crate::scoring::UserFinancialInput;

const DEFAULT_REVIEW_PAGE: usize = 50;

/// Router exposing pure scoring plus lead intake and review endpoints.
pub fn lead_router<R, D>(service: Arc<LeadService<R, D>>) -> Router
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    Router::new()
        .route("/api/v1/scores", post(scores_handler::<R, D>))
        .route("/api/v1/profile", post(profile_handler::<R, D>))
        .route("/api/v1/leads", post(submit_handler::<R, D>))
        .route("/api/v1/leads/review", get(review_queue_handler::<R, D>))
        .route("/api/v1/leads/:lead_id", get(status_handler::<R, D>))
        .route(
            "/api/v1/leads/:lead_id/approve",
            post(approve_handler::<R, D>),
        )
        .route("/api/v1/leads/:lead_id/reject", post(reject_handler::<R, D>))
        .route(
            "/api/v1/leads/:lead_id/redeliver",
            post(redeliver_handler::<R, D>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReviewDecision {
    #[serde(default)]
    pub(crate) note: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReviewQueueQuery {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn scores_handler<R, D>(
    State(service): State<Arc<LeadService<R, D>>>,
    axum::Json(input): axum::Json<UserFinancialInput>,
) -> Response
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    (StatusCode::OK, axum::Json(service.scores(&input))).into_response()
}

pub(crate) async fn profile_handler<R, D>(
    State(service): State<Arc<LeadService<R, D>>>,
    axum::Json(input): axum::Json<UserFinancialInput>,
) -> Response
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    (StatusCode::OK, axum::Json(service.profile(&input))).into_response()
}

pub(crate) async fn submit_handler<R, D>(
    State(service): State<Arc<LeadService<R, D>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::ACCEPTED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, D>(
    State(service): State<Arc<LeadService<R, D>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    match service.get(&LeadId(lead_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn review_queue_handler<R, D>(
    State(service): State<Arc<LeadService<R, D>>>,
    Query(query): Query<ReviewQueueQuery>,
) -> Response
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_REVIEW_PAGE);
    match service.pending_review(limit) {
        Ok(records) => {
            let views: Vec<LeadStatusView> =
                records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn approve_handler<R, D>(
    State(service): State<Arc<LeadService<R, D>>>,
    Path(lead_id): Path<String>,
    decision: Option<axum::Json<ReviewDecision>>,
) -> Response
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    let note = decision.and_then(|axum::Json(decision)| decision.note);
    match service.approve(&LeadId(lead_id), note) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reject_handler<R, D>(
    State(service): State<Arc<LeadService<R, D>>>,
    Path(lead_id): Path<String>,
    decision: Option<axum::Json<ReviewDecision>>,
) -> Response
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    let note = decision.and_then(|axum::Json(decision)| decision.note);
    match service.reject(&LeadId(lead_id), note) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn redeliver_handler<R, D>(
    State(service): State<Arc<LeadService<R, D>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    match service.redeliver(&LeadId(lead_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: LeadServiceError) -> Response {
    let status = match &error {
        LeadServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        LeadServiceError::Repository(RepositoryError::Conflict)
        | LeadServiceError::InvalidTransition { .. }
        | LeadServiceError::NotDeliverable { .. } => StatusCode::CONFLICT,
        LeadServiceError::Repository(RepositoryError::Unavailable(_))
        | LeadServiceError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
