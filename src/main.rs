use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "devops-demo")]
#[command(version, about = "DevOps pipeline demo API and dashboards")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (defaults to ./devops-demo.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides [server] host)
        #[arg(long)]
        host: Option<String>,

        /// Port to serve on (overrides [server] port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Working directory for the git endpoints
        #[arg(long)]
        repo_dir: Option<PathBuf>,

        /// Directory holding frontend/index.html
        #[arg(long)]
        frontend_dir: Option<PathBuf>,

        /// Open the demo dashboard in a browser once the server is up
        #[arg(long)]
        open: bool,

        /// Dev mode: bind on all interfaces, permissive CORS
        #[arg(long)]
        dev: bool,
    },
    /// View, validate or create the config file
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show file and effective configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Write a default config file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(devops_demo::config::DEFAULT_CONFIG_FILE));

    match &cli.command {
        Commands::Serve {
            host,
            port,
            repo_dir,
            frontend_dir,
            open,
            dev,
        } => {
            let overrides = devops_demo::config::CliOverrides {
                host: host.clone(),
                port: *port,
                repo_dir: repo_dir.clone(),
                frontend_dir: frontend_dir.clone(),
            };
            cmd::cmd_serve(&config_path, overrides, *open, *dev, cli.verbose).await?;
        }
        Commands::Config { command } => cmd::cmd_config(&config_path, command.clone())?,
    }

    Ok(())
}
