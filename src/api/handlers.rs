use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::api::requests::PostJournalRequest;
use crate::api::responses::{
    AccountResponse, BalanceResponse, ErrorResponse, HealthResponse, JournalPostedResponse,
};
use crate::error::AppError;

use super::routes::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a service error to a status and body. Store failures are logged in
/// full and reported to the caller generically.
fn error_response(context: &str, err: AppError) -> ApiError {
    match err {
        AppError::InvalidRequest(details) => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                    .with_details(details),
            ),
        ),
        AppError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", msg)),
        ),
        AppError::UnknownAccount(name) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "UNKNOWN_ACCOUNT",
                format!("No such account: {}", name),
            )),
        ),
        e => {
            tracing::error!("{}: {}", context, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")),
            )
        }
    }
}

/// Journal entry form and trial balance table.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// Store reachability probe.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = state.health_checker.check_database().await;

    if database.status.is_healthy() {
        tracing::debug!(latency_ms = ?database.latency_ms, "Health check passed");
        (StatusCode::OK, Json(HealthResponse::healthy()))
    } else {
        tracing::warn!(
            "Health check failed: {}",
            database.message.as_deref().unwrap_or("unknown")
        );
        (StatusCode::SERVICE_UNAVAILABLE, Json(HealthResponse::unhealthy()))
    }
}

/// Prometheus exposition.
pub async fn metrics_endpoint(State(state): State<AppState>) -> Response {
    match &state.metrics_handle {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}

/// List the chart of accounts.
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountResponse>>, ApiError> {
    let accounts = state
        .ledger
        .list_accounts()
        .await
        .map_err(|e| error_response("Failed to list accounts", e))?;

    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Trial balance.
pub async fn list_balances(
    State(state): State<AppState>,
) -> Result<Json<Vec<BalanceResponse>>, ApiError> {
    let balances = state
        .ledger
        .list_balances()
        .await
        .map_err(|e| error_response("Failed to compute balances", e))?;

    Ok(Json(balances.into_iter().map(BalanceResponse::from).collect()))
}

/// Post a two-line journal.
pub async fn post_journal(
    State(state): State<AppState>,
    payload: Result<Json<PostJournalRequest>, JsonRejection>,
) -> Result<Json<JournalPostedResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", rejection.body_text())),
        )
    })?;

    let command = request
        .into_command()
        .map_err(|details| error_response("Invalid journal request", AppError::InvalidRequest(details)))?;

    let posted = state
        .ledger
        .post_journal(command)
        .await
        .map_err(|e| error_response("Failed to post journal", e))?;

    Ok(Json(JournalPostedResponse {
        journal_id: posted.journal.id,
    }))
}
