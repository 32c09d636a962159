//! HTTP routes for the digest service.
//!
//! | Method | Path            | Body                 | Response                |
//! |--------|-----------------|----------------------|-------------------------|
//! | POST   | `/hash`         | `password=<secret>`  | job ID                  |
//! | GET    | `/hash/id/{id}` |                      | encoded digest          |
//! | POST   | `/hashsync`     | `password=<secret>`  | encoded digest          |
//! | GET    | `/stats`        |                      | `{"total":N,"average":X}` |
//! | GET    | `/shutdown`     |                      | empty, fires shutdown   |
//!
//! Handlers only decode and validate input; all state lives behind the
//! [`HashService`] and [`ShutdownSignal`] handles in [`AppState`].

use crate::server::error::ApiError;
use axum::{
    Form, Json, Router,
    extract::{Path, State, rejection::FormRejection},
    http::StatusCode,
    routing::{get, post},
};
use hashkeep::{EncodedDigest, HashService, JobId, ShutdownSignal, Stats};

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub service: HashService,
    pub shutdown: ShutdownSignal,
}

impl AppState {
    pub fn new(service: HashService, shutdown: ShutdownSignal) -> Self {
        Self { service, shutdown }
    }
}

/// Decoded `application/x-www-form-urlencoded` pairs, in body order.
type FormPairs = Vec<(String, String)>;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/hash", post(start_job).fallback(require_post))
        .route("/hash/id", get(missing_id).fallback(require_get))
        .route("/hash/id/", get(missing_id).fallback(require_get))
        .route("/hash/id/{*id}", get(lookup_job).fallback(require_get))
        .route("/hashsync", post(hash_sync).fallback(require_post))
        .route("/stats", get(stats).fallback(require_get))
        .route("/shutdown", get(shutdown).fallback(require_get))
        .with_state(state)
}

async fn require_post() -> ApiError {
    ApiError::MethodNotAllowed { required: "POST" }
}

async fn require_get() -> ApiError {
    ApiError::MethodNotAllowed { required: "GET" }
}

fn password(form: Result<Form<FormPairs>, FormRejection>) -> Result<String, ApiError> {
    let Form(pairs) = match form {
        Ok(form) => form,
        // A body that is not form-encoded carries no `password` field either.
        Err(FormRejection::InvalidFormContentType(_)) => return Err(ApiError::MissingPassword),
        Err(rejection) => return Err(ApiError::InvalidForm(rejection.body_text())),
    };

    // A repeated field is not an error; the first value wins.
    pairs
        .into_iter()
        .find_map(|(key, value)| (key == "password").then_some(value))
        .ok_or(ApiError::MissingPassword)
}

#[tracing::instrument(skip_all)]
async fn start_job(
    State(state): State<AppState>,
    form: Result<Form<FormPairs>, FormRejection>,
) -> Result<String, ApiError> {
    if state.shutdown.is_fired() {
        return Err(ApiError::ShuttingDown);
    }

    let password = password(form)?;
    let id = state.service.start(password);
    tracing::debug!(%id, "digest job accepted");
    Ok(id.to_string())
}

async fn missing_id() -> ApiError {
    hashkeep::Error::InvalidJobId {
        input: String::new(),
    }
    .into()
}

#[tracing::instrument(skip_all)]
async fn lookup_job(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<EncodedDigest, ApiError> {
    let id: JobId = raw.trim_start_matches('/').parse()?;
    Ok(state.service.lookup(id)?)
}

#[tracing::instrument(skip_all)]
async fn hash_sync(
    State(state): State<AppState>,
    form: Result<Form<FormPairs>, FormRejection>,
) -> Result<EncodedDigest, ApiError> {
    let password = password(form)?;
    Ok(state.service.compute_sync(&password).await)
}

async fn stats(State(state): State<AppState>) -> Json<Stats> {
    let stats = state.service.stats();
    tracing::debug!(total = stats.total, average_ms = stats.average, "stats requested");
    Json(stats)
}

async fn shutdown(State(state): State<AppState>) -> StatusCode {
    if state.shutdown.trigger() {
        tracing::info!("Shutdown requested over HTTP");
    }
    StatusCode::OK
}
