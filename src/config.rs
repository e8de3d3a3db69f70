//! Layered configuration for the demo server.
//!
//! Settings are read from `devops-demo.toml` (missing file means defaults),
//! then overridden by environment variables, then by CLI flags.
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//! service_name = "DevOps Demo API"
//!
//! [git]
//! repo_dir = "."
//! trust_directory = true
//! commit_message = "Update from DevOps dashboard"
//!
//! [frontend]
//! dir = "frontend"
//!
//! [logging]
//! format = "pretty"
//! dir = "logs"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default config file name, resolved against the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "devops-demo.toml";

pub const ENV_HOST: &str = "DEVOPS_DEMO_HOST";
pub const ENV_PORT: &str = "DEVOPS_DEMO_PORT";
pub const ENV_REPO_DIR: &str = "DEVOPS_DEMO_REPO_DIR";

/// Bind address when no host is configured anywhere.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Bind address `--dev` uses when no host is configured anywhere.
pub const DEV_HOST: &str = "0.0.0.0";

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Unset means [`DEFAULT_HOST`], or [`DEV_HOST`] in dev mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Reported as `service` by the status endpoint
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_port() -> u16 {
    8000
}

fn default_service_name() -> String {
    "DevOps Demo API".to_string()
}

impl ServerSection {
    /// The configured host, or [`DEFAULT_HOST`].
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: None,
            port: default_port(),
            service_name: default_service_name(),
        }
    }
}

/// `[git]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSection {
    /// Working directory every git helper runs in
    #[serde(default = "default_repo_dir")]
    pub repo_dir: PathBuf,
    /// Register `repo_dir` as a git `safe.directory` before each call
    #[serde(default = "default_trust_directory")]
    pub trust_directory: bool,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

fn default_repo_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_trust_directory() -> bool {
    true
}

fn default_commit_message() -> String {
    "Update from DevOps dashboard".to_string()
}

impl Default for GitSection {
    fn default() -> Self {
        Self {
            repo_dir: default_repo_dir(),
            trust_directory: default_trust_directory(),
            commit_message: default_commit_message(),
        }
    }
}

/// `[frontend]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendSection {
    /// Directory holding `index.html` and its assets, read on every request
    #[serde(default = "default_frontend_dir")]
    pub dir: PathBuf,
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

impl Default for FrontendSection {
    fn default() -> Self {
        Self {
            dir: default_frontend_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub format: LogFormat,
    /// When set, logs go to a daily-rolling file in this directory instead of stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Raw contents of `devops-demo.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoToml {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub git: GitSection,
    #[serde(default)]
    pub frontend: FrontendSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl DemoToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load from `path`, or return defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write configuration to `path`. Refuses to overwrite an existing file.
    pub fn save_new(&self, path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Apply environment overrides using `lookup` to resolve variables.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = Some(host);
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(dir) = lookup(ENV_REPO_DIR) {
            self.git.repo_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Return human-readable warnings; an empty list means the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0: the OS will pick a random port".to_string());
        }
        if self.server.service_name.trim().is_empty() {
            warnings.push("server.service_name is empty".to_string());
        }
        if self.git.commit_message.trim().is_empty() {
            warnings.push("git.commit_message is empty: `git commit` will refuse it".to_string());
        }
        if !self.git.repo_dir.is_dir() {
            warnings.push(format!(
                "git.repo_dir '{}' is not a directory: git endpoints will report failure",
                self.git.repo_dir.display()
            ));
        }
        if !self.frontend.dir.join("index.html").is_file() {
            warnings.push(format!(
                "frontend.dir '{}' has no index.html: /frontend will report failure",
                self.frontend.dir.display()
            ));
        }

        warnings
    }
}

/// CLI flags that override file and environment settings.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub repo_dir: Option<PathBuf>,
    pub frontend_dir: Option<PathBuf>,
}

/// Effective configuration (file → environment → CLI).
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub config_path: PathBuf,
    pub server: ServerSection,
    pub git: GitSection,
    pub frontend: FrontendSection,
    pub logging: LoggingSection,
    /// Bind on all interfaces and allow any CORS origin
    pub dev_mode: bool,
}

impl DemoConfig {
    /// Resolve configuration from `config_path`, the process environment and `cli`.
    pub fn load(config_path: &Path, cli: &CliOverrides) -> Result<Self, ConfigError> {
        let mut toml = DemoToml::load_or_default(config_path)?;
        toml.apply_env()?;
        Ok(Self::from_toml(config_path, toml, cli))
    }

    /// Build the effective config from already-loaded file contents.
    pub fn from_toml(config_path: &Path, toml: DemoToml, cli: &CliOverrides) -> Self {
        let DemoToml {
            mut server,
            mut git,
            mut frontend,
            logging,
        } = toml;

        if let Some(host) = &cli.host {
            server.host = Some(host.clone());
        }
        if let Some(port) = cli.port {
            server.port = port;
        }
        if let Some(dir) = &cli.repo_dir {
            git.repo_dir = dir.clone();
        }
        if let Some(dir) = &cli.frontend_dir {
            frontend.dir = dir.clone();
        }

        Self {
            config_path: config_path.to_path_buf(),
            server,
            git,
            frontend,
            logging,
            dev_mode: false,
        }
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        if dev_mode && self.server.host.is_none() {
            self.server.host = Some(DEV_HOST.to_string());
        }
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host(), self.server.port)
    }

    /// The effective settings in file form.
    pub fn to_toml(&self) -> DemoToml {
        DemoToml {
            server: self.server.clone(),
            git: self.git.clone(),
            frontend: self.frontend.clone(),
            logging: self.logging.clone(),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        self.to_toml().validate()
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::from_toml(
            Path::new(DEFAULT_CONFIG_FILE),
            DemoToml::default(),
            &CliOverrides::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults() {
        let toml = DemoToml::default();
        assert_eq!(toml.server.host, None);
        assert_eq!(toml.server.host(), "127.0.0.1");
        assert_eq!(toml.server.port, 8000);
        assert_eq!(toml.server.service_name, "DevOps Demo API");
        assert_eq!(toml.git.repo_dir, PathBuf::from("."));
        assert!(toml.git.trust_directory);
        assert_eq!(toml.frontend.dir, PathBuf::from("frontend"));
        assert_eq!(toml.logging.format, LogFormat::Pretty);
        assert!(toml.logging.dir.is_none());
    }

    #[test]
    fn test_parse_partial_file_keeps_other_defaults() {
        let toml = DemoToml::parse(
            r#"
[server]
port = 9090

[git]
commit_message = "ci: automated"
"#,
        )
        .unwrap();
        assert_eq!(toml.server.port, 9090);
        assert_eq!(toml.server.host(), "127.0.0.1");
        assert_eq!(toml.git.commit_message, "ci: automated");
        assert!(toml.git.trust_directory);
    }

    #[test]
    fn test_parse_json_log_format() {
        let toml = DemoToml::parse("[logging]\nformat = \"json\"\ndir = \"logs\"\n").unwrap();
        assert_eq!(toml.logging.format, LogFormat::Json);
        assert_eq!(toml.logging.dir, Some(PathBuf::from("logs")));
    }

    #[test]
    fn test_parse_unknown_log_format_fails() {
        assert!(DemoToml::parse("[logging]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let toml = DemoToml::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(toml, DemoToml::default());
    }

    #[test]
    fn test_load_invalid_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devops-demo.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = DemoToml::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("devops-demo.toml"));
    }

    #[test]
    fn test_save_new_round_trips_and_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devops-demo.toml");
        let mut toml = DemoToml::default();
        toml.server.port = 8123;

        toml.save_new(&path).unwrap();
        assert_eq!(DemoToml::load(&path).unwrap().server.port, 8123);

        let err = DemoToml::default().save_new(&path).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
        assert_eq!(DemoToml::load(&path).unwrap().server.port, 8123);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut toml = DemoToml::parse("[server]\nport = 9000\nhost = \"10.0.0.1\"\n").unwrap();
        toml.apply_env_with(env_of(&[
            (ENV_PORT, "9100"),
            (ENV_REPO_DIR, "/srv/repo"),
        ]))
        .unwrap();
        assert_eq!(toml.server.port, 9100);
        assert_eq!(toml.server.host(), "10.0.0.1");
        assert_eq!(toml.git.repo_dir, PathBuf::from("/srv/repo"));
    }

    #[test]
    fn test_env_invalid_port() {
        let mut toml = DemoToml::default();
        let err = toml
            .apply_env_with(env_of(&[(ENV_PORT, "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
        assert_eq!(toml.server.port, 8000);
    }

    #[test]
    fn test_cli_overrides_everything() {
        let mut toml = DemoToml::default();
        toml.apply_env_with(env_of(&[(ENV_PORT, "9100"), (ENV_HOST, "10.0.0.2")]))
            .unwrap();
        let cli = CliOverrides {
            port: Some(7000),
            frontend_dir: Some(PathBuf::from("/srv/frontend")),
            ..Default::default()
        };
        let config = DemoConfig::from_toml(Path::new("x.toml"), toml, &cli);
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.host(), "10.0.0.2");
        assert_eq!(config.frontend.dir, PathBuf::from("/srv/frontend"));
        assert_eq!(config.bind_addr(), "10.0.0.2:7000");
    }

    #[test]
    fn test_dev_mode_binds_all_interfaces_only_when_host_unset() {
        let config = DemoConfig::default().with_dev_mode(true);
        assert!(config.dev_mode);
        assert_eq!(config.server.host(), "0.0.0.0");

        let cli = CliOverrides {
            host: Some("192.168.1.5".into()),
            ..Default::default()
        };
        let config = DemoConfig::from_toml(Path::new("x.toml"), DemoToml::default(), &cli)
            .with_dev_mode(true);
        assert_eq!(config.server.host(), "192.168.1.5");
    }

    #[test]
    fn test_dev_mode_keeps_explicit_loopback_host() {
        let toml = DemoToml::parse("[server]\nhost = \"127.0.0.1\"\n").unwrap();
        let config = DemoConfig::from_toml(Path::new("x.toml"), toml, &CliOverrides::default())
            .with_dev_mode(true);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");

        let mut toml = DemoToml::default();
        toml.apply_env_with(env_of(&[(ENV_HOST, "127.0.0.1")])).unwrap();
        let config = DemoConfig::from_toml(Path::new("x.toml"), toml, &CliOverrides::default())
            .with_dev_mode(true);
        assert_eq!(config.server.host(), "127.0.0.1");
    }

    #[test]
    fn test_default_file_leaves_host_unset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("devops-demo.toml");
        DemoToml::default().save_new(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("host"));
        assert_eq!(DemoToml::load(&path).unwrap().server.host, None);
    }

    #[test]
    fn test_validate_clean_config() {
        let dir = tempdir().unwrap();
        let frontend = dir.path().join("frontend");
        std::fs::create_dir(&frontend).unwrap();
        std::fs::write(frontend.join("index.html"), "<html></html>").unwrap();

        let mut toml = DemoToml::default();
        toml.git.repo_dir = dir.path().to_path_buf();
        toml.frontend.dir = frontend;
        assert!(toml.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_problems() {
        let dir = tempdir().unwrap();
        let mut toml = DemoToml::default();
        toml.server.port = 0;
        toml.server.service_name = "  ".into();
        toml.git.commit_message = String::new();
        toml.git.repo_dir = dir.path().join("missing");
        toml.frontend.dir = dir.path().to_path_buf();

        let warnings = toml.validate();
        assert_eq!(warnings.len(), 5);
        assert!(warnings.iter().any(|w| w.contains("server.port")));
        assert!(warnings.iter().any(|w| w.contains("service_name")));
        assert!(warnings.iter().any(|w| w.contains("commit_message")));
        assert!(warnings.iter().any(|w| w.contains("repo_dir")));
        assert!(warnings.iter().any(|w| w.contains("index.html")));
    }
}
