use axum::{
    body::Body,
    routing::{get, post},
    Router,
};
use http::{HeaderName, Request};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::handlers;
use crate::observability::HealthChecker;
use crate::services::LedgerApi;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerApi>,
    pub health_checker: Arc<HealthChecker>,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(ledger: Arc<dyn LedgerApi>, health_checker: Arc<HealthChecker>) -> Self {
        Self {
            ledger,
            health_checker,
            metrics_handle: None,
        }
    }

    /// Adds metrics handle to the state.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }
}

/// Creates the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/accounts", get(handlers::list_accounts))
        .route("/balances", get(handlers::list_balances))
        .route("/journal", post(handlers::post_journal))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id,
            )
        }))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}
