//! HTML dashboard pages.
//!
//! The simulated-pipeline pages are embedded at compile time. `/frontend` is
//! read from disk on every request, no caching.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tracing::warn;

use super::api::{ApiError, SharedState};
use super::embedded::Pages;
use super::models::Outcome;

pub const FRONTEND_INDEX: &str = "index.html";

/// Embedded dashboard pages and the routes they're served on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashboard {
    Demo,
    CicdDemo,
    CicdLive,
    ManualVsAutomated,
}

impl Dashboard {
    pub const ALL: [Dashboard; 4] = [
        Dashboard::Demo,
        Dashboard::CicdDemo,
        Dashboard::CicdLive,
        Dashboard::ManualVsAutomated,
    ];

    pub fn route(&self) -> &'static str {
        match self {
            Self::Demo => "/demo",
            Self::CicdDemo => "/cicd-demo",
            Self::CicdLive => "/cicd-live",
            Self::ManualVsAutomated => "/manual-vs-automated",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Demo => "demo.html",
            Self::CicdDemo => "cicd-demo.html",
            Self::CicdLive => "cicd-live.html",
            Self::ManualVsAutomated => "manual-vs-automated.html",
        }
    }

    /// The embedded document, if present in the build.
    pub fn html(&self) -> Option<String> {
        Pages::get(self.file_name()).map(|file| String::from_utf8_lossy(&file.data).into_owned())
    }
}

pub fn pages_router() -> Router<SharedState> {
    let router = Dashboard::ALL.iter().fold(Router::<SharedState>::new(), |router, page| {
        let page = *page;
        router.route(page.route(), get(move || render(page)))
    });

    router
        .route("/frontend", get(frontend_page))
        .route("/frontend/{file}", get(frontend_asset))
}

async fn render(page: Dashboard) -> Result<Html<String>, ApiError> {
    page.html()
        .map(Html)
        .ok_or_else(|| ApiError::NotFound(format!("Page {} is not embedded", page.file_name())))
}

/// Serve `frontend/index.html`; a read failure is reported as a failed
/// `Outcome` with status 200.
async fn frontend_page(State(state): State<SharedState>) -> Response {
    let path = state.frontend_dir.join(FRONTEND_INDEX);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read frontend page");
            Json(Outcome::failure(format!("{}: {}", path.display(), e))).into_response()
        }
    }
}

/// Serve the stylesheet and script that sit next to the frontend page.
async fn frontend_asset(
    State(state): State<SharedState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    if file.contains("..") || file.contains('/') || file.contains('\\') {
        return Err(ApiError::BadRequest("Invalid path".into()));
    }

    let full_path = state.frontend_dir.join(&file);
    let bytes = tokio::fs::read(&full_path)
        .await
        .map_err(|_| ApiError::NotFound(format!("Asset not found: {}", file)))?;

    let mime = mime_guess::from_path(&full_path).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.as_ref().to_string())], bytes))
}
