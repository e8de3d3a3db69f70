//! Configuration view and validation commands — `devops-demo config`.

use std::path::Path;

use anyhow::Result;
use devops_demo::config::{CliOverrides, DemoConfig, DemoToml};

use super::super::ConfigCommands;

pub fn cmd_config(config_path: &Path, command: Option<ConfigCommands>) -> Result<()> {
    match command {
        None | Some(ConfigCommands::Show) => show(config_path)?,
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!(
                    "No config file at {}. Checking defaults.",
                    config_path.display()
                );
            }

            let toml = DemoToml::load_or_default(config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("Config file already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            DemoToml::default().save_new(config_path)?;

            println!("Created config file at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [server] host, port, service_name");
            println!("  - [git] repo_dir, trust_directory, commit_message");
            println!("  - [frontend] dir");
            println!("  - [logging] format, dir");
            println!();
        }
    }

    Ok(())
}

fn show(config_path: &Path) -> Result<()> {
    println!();
    println!("DevOps Demo Configuration");
    println!("=========================");
    println!();

    let config = DemoConfig::load(config_path, &CliOverrides::default())?;

    if config.config_path.exists() {
        println!("Config file: {}", config.config_path.display());
    } else {
        println!("No config file at {}", config.config_path.display());
        println!("Using default configuration. Run 'devops-demo config init' to create one.");
    }
    println!();

    println!("Effective values (with env overrides):");
    println!("[server]");
    println!("  host = \"{}\"", config.server.host());
    println!("  port = {}", config.server.port);
    println!("  service_name = \"{}\"", config.server.service_name);
    println!();
    println!("[git]");
    println!("  repo_dir = \"{}\"", config.git.repo_dir.display());
    println!("  trust_directory = {}", config.git.trust_directory);
    println!("  commit_message = \"{}\"", config.git.commit_message);
    println!();
    println!("[frontend]");
    println!("  dir = \"{}\"", config.frontend.dir.display());
    println!();
    println!("[logging]");
    println!("  format = \"{}\"", config.logging.format);
    if let Some(dir) = &config.logging.dir {
        println!("  dir = \"{}\"", dir.display());
    }
    println!();

    Ok(())
}
