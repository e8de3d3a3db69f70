//! HTTP server command — `devops-demo serve`.

use std::path::Path;

use anyhow::{Context, Result};
use devops_demo::config::{CliOverrides, DemoConfig};
use devops_demo::dashboard::pages::Dashboard;
use tracing::warn;

pub async fn cmd_serve(
    config_path: &Path,
    overrides: CliOverrides,
    open: bool,
    dev: bool,
    verbose: bool,
) -> Result<()> {
    let config = DemoConfig::load(config_path, &overrides)
        .context("Failed to load configuration")?
        .with_dev_mode(dev);

    let _log_guard = devops_demo::logging::init(verbose, &config.logging)?;

    for warning in config.validate() {
        warn!("{}", warning);
    }

    // Spawn browser open before starting the server (which blocks)
    if open {
        let url = format!(
            "http://localhost:{}{}",
            config.server.port,
            Dashboard::Demo.route()
        );
        tokio::spawn(async move {
            // Small delay to let the server start binding
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
            if let Err(e) = open::that(&url) {
                warn!(url = %url, error = %e, "Failed to open browser");
            }
        });
    }

    devops_demo::dashboard::server::start_server(&config).await?;
    Ok(())
}
