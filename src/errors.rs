//! Typed error hierarchy for the demo server.
//!
//! Three enums cover the three places that can fail:
//! - `ConfigError` — loading, parsing and writing `devops-demo.toml`
//! - `ServerError` — binding and serving the HTTP listener
//! - `GitError` — spawning `git`; never reaches the wire, the git helper
//!   folds it into an `Outcome { success: false }`

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the configuration layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("Invalid value '{value}' for {var}")]
    InvalidEnv { var: String, value: String },
}

/// Errors from starting or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Errors from invoking the `git` binary.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Working directory {0} does not exist")]
    MissingWorkDir(PathBuf),

    #[error("Failed to run `git {command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_read_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = ConfigError::Read {
            path: PathBuf::from("/etc/devops-demo.toml"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/devops-demo.toml"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn config_error_invalid_env_names_variable() {
        let err = ConfigError::InvalidEnv {
            var: "DEVOPS_DEMO_PORT".into(),
            value: "eighty".into(),
        };
        assert_eq!(err.to_string(), "Invalid value 'eighty' for DEVOPS_DEMO_PORT");
    }

    #[test]
    fn server_error_bind_is_matchable() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use");
        let err = ServerError::Bind {
            addr: "127.0.0.1:8000".into(),
            source: io_err,
        };
        match &err {
            ServerError::Bind { addr, source } => {
                assert_eq!(addr, "127.0.0.1:8000");
                assert_eq!(source.kind(), std::io::ErrorKind::AddrInUse);
            }
            _ => panic!("Expected Bind variant"),
        }
    }

    #[test]
    fn git_error_spawn_mentions_command() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = GitError::Spawn {
            command: "status".into(),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("`git status`"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn git_error_missing_work_dir_display() {
        let err = GitError::MissingWorkDir(PathBuf::from("/nowhere"));
        assert_eq!(err.to_string(), "Working directory /nowhere does not exist");
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ServerError>();
        assert_send_sync::<GitError>();
    }
}
