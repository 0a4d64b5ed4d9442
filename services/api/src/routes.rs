use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use fin_health::error::AppError;
use fin_health::leads::{
    lead_router, DeliveryPublisher, LeadCsvImporter, LeadRepository, LeadService,
};
use fin_health::scoring::ScoreSet;
use serde::Serialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct BatchScoreEntry {
    pub(crate) row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) source: Option<String>,
    pub(crate) scores: ScoreSet,
}

pub(crate) fn with_lead_routes<R, D>(service: Arc<LeadService<R, D>>) -> axum::Router
where
    R: LeadRepository + 'static,
    D: DeliveryPublisher + 'static,
{
    lead_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/scores/batch",
            axum::routing::post(batch_scores_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "variant": state.engine.variant().label() })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores a CSV export in one call; nothing is stored or delivered.
pub(crate) async fn batch_scores_endpoint(
    Extension(state): Extension<AppState>,
    body: String,
) -> Result<Json<Vec<BatchScoreEntry>>, AppError> {
    let submissions = LeadCsvImporter::from_reader(Cursor::new(body.into_bytes()))?;

    let entries = submissions
        .into_iter()
        .enumerate()
        .map(|(index, submission)| BatchScoreEntry {
            row: index + 1,
            scores: state.engine.scores(&submission.input),
            source: submission.source,
        })
        .collect();

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryDeliveryPublisher, InMemoryLeadRepository};
    use fin_health::leads::ReviewGate;
    use fin_health::scoring::FinancialScoringEngine;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    const EXPORT: &str = "\
age,annual_income,monthly_expenses,emergency_funds,savings,total_debt,total_investments,retirement_age,target_retirement_savings,current_retirement_savings,source
28,60000,1800,12000,40000,20000,20000,60,100000,0,webinar
28,60000,1800,12000,40000,0,20000,60,100000,0,
";

    fn state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            engine: Arc::new(FinancialScoringEngine::default()),
        }
    }

    fn app(state: AppState) -> axum::Router {
        let service = Arc::new(LeadService::new(
            FinancialScoringEngine::default(),
            ReviewGate::default(),
            Arc::new(InMemoryLeadRepository::default()),
            Arc::new(InMemoryDeliveryPublisher::default()),
        ));
        with_lead_routes(service).layer(Extension(state))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn batch_scores_endpoint_scores_each_row() {
        let Json(entries) =
            batch_scores_endpoint(Extension(state(true)), EXPORT.to_string())
                .await
                .expect("export scores");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].row, 1);
        assert_eq!(entries[0].source.as_deref(), Some("webinar"));
        assert_eq!(entries[0].scores.overall_financial_health_score, 67);
        assert_eq!(entries[1].scores.dti_score, 100);
        assert!(entries[1].source.is_none());
    }

    #[tokio::test]
    async fn batch_route_rejects_malformed_csv() {
        let response = app(state(true))
            .oneshot(
                axum::http::Request::post("/api/v1/scores/batch")
                    .header(header::CONTENT_TYPE, "text/csv")
                    .body(axum::body::Body::from("age,annual_income\nold,lots\n"))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .unwrap_or_default()
            .contains("import error"));
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let response = app(state(false))
            .oneshot(
                axum::http::Request::get("/ready")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(response).await["status"], json!("initializing"));
    }

    #[tokio::test]
    async fn readiness_names_active_variant() {
        let response = app(state(true))
            .oneshot(
                axum::http::Request::get("/ready")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["variant"], json!("full_profile"));
    }

    #[tokio::test]
    async fn health_and_lead_routes_share_one_router() {
        let router = app(state(true));

        let health = router
            .clone()
            .oneshot(
                axum::http::Request::get("/health")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(health.status(), StatusCode::OK);

        let missing = router
            .oneshot(
                axum::http::Request::get("/api/v1/leads/lead-unknown")
                    .body(axum::body::Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}
