use std::sync::Arc;

use axum::{Json, Router, http::StatusCode, response::IntoResponse};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::api::{self, AppState, SharedState};
use super::git::{GitHelper, GitRunner, ShellGit};
use super::pages;
use crate::config::DemoConfig;
use crate::errors::ServerError;

/// Build shared state from the effective configuration.
pub fn build_state(config: &DemoConfig, runner: Arc<dyn GitRunner>) -> SharedState {
    Arc::new(AppState {
        service_name: config.server.service_name.clone(),
        frontend_dir: config.frontend.dir.clone(),
        git: GitHelper::new(runner, &config.git),
    })
}

/// Build the full application router: JSON API, dashboard pages, JSON 404.
pub fn build_router(state: SharedState) -> Router {
    api::api_router()
        .merge(pages::pages_router())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"detail": "Not Found"})),
    )
}

/// Start the demo server and block until Ctrl+C.
pub async fn start_server(config: &DemoConfig) -> Result<(), ServerError> {
    let state = build_state(config, Arc::new(ShellGit));

    let mut app = build_router(state).layer(TraceLayer::new_for_http());
    if config.dev_mode {
        app = app.layer(CorsLayer::permissive());
    }

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let local_addr = listener.local_addr().map_err(ServerError::Serve)?;
    info!(
        addr = %local_addr,
        repo_dir = %config.git.repo_dir.display(),
        frontend_dir = %config.frontend.dir.display(),
        "DevOps demo running at http://{}",
        local_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
