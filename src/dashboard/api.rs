use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use mime_guess::mime;

use super::facts;
use super::git::GitHelper;
use super::models::{DevOpsFact, EchoRequest, EchoResponse, Outcome, StatusResponse, VersionInfo};

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub service_name: String,
    pub frontend_dir: PathBuf,
    pub git: GitHelper,
}

pub type SharedState = Arc<AppState>;

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        (status, Json(serde_json::json!({"detail": detail}))).into_response()
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(root))
        .route("/api", get(root))
        .route("/echo", post(echo))
        .route("/version", get(version))
        .route("/api/devops-fact", get(devops_fact))
        .route("/api/git-status", get(git_status))
        .route("/api/git-commit", post(git_commit))
        .route("/api/git-push", post(git_push))
        .route("/health", get(health_check))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> &'static str {
    "ok"
}

async fn root(State(state): State<SharedState>) -> Json<StatusResponse> {
    Json(StatusResponse::ok(&state.service_name))
}

async fn echo(headers: HeaderMap, body: Bytes) -> Result<Json<EchoResponse>, ApiError> {
    let req = decode_echo(&headers, &body)?;
    Ok(Json(EchoResponse::from(req)))
}

/// Decode an `/echo` body. A body with no `Content-Type` is still read as
/// JSON; every failure is a validation error.
fn decode_echo(headers: &HeaderMap, body: &[u8]) -> Result<EchoRequest, ApiError> {
    if let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .filter(|value| !is_json(value))
    {
        return Err(ApiError::Validation(format!(
            "Expected a JSON body, got Content-Type {}",
            content_type.to_str().unwrap_or("<non-ascii>")
        )));
    }

    serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))
}

/// `application/json` or any `application/*+json` type.
fn is_json(content_type: &HeaderValue) -> bool {
    content_type
        .to_str()
        .ok()
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .is_some_and(|m| {
            m.type_() == mime::APPLICATION
                && (m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
        })
}

async fn version() -> Json<VersionInfo> {
    Json(VersionInfo::current())
}

async fn devops_fact() -> Json<DevOpsFact> {
    Json(facts::devops_fact())
}

async fn git_status(State(state): State<SharedState>) -> Json<Outcome> {
    Json(state.git.status().await)
}

async fn git_commit(State(state): State<SharedState>) -> Json<Outcome> {
    Json(state.git.commit().await)
}

async fn git_push(State(state): State<SharedState>) -> Json<Outcome> {
    Json(state.git.push().await)
}
