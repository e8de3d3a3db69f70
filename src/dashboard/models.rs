use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const GITHUB_URL: &str = "https://github.com/hadeedkhan117/devops-github-actions-fastapi";
pub const AUTHOR: &str = "Hadeed Khan";
pub const DESCRIPTION: &str = "Complete DevOps Pipeline Demo with Rust, Docker & GitHub Actions";

/// Build identifier stamped in by CI through `DEVOPS_DEMO_BUILD`.
pub const BUILD: &str = match option_env!("DEVOPS_DEMO_BUILD") {
    Some(build) => build,
    None => "local",
};

/// Current UTC time as an ISO-8601 string with microseconds.
pub fn utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    pub status: String,
    pub service: String,
    pub time: String,
}

impl StatusResponse {
    pub fn ok(service: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            time: utc_timestamp(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EchoRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EchoResponse {
    pub you_said: String,
    pub length: usize,
}

impl From<EchoRequest> for EchoResponse {
    fn from(req: EchoRequest) -> Self {
        // Characters, not bytes.
        let length = req.message.chars().count();
        Self {
            you_said: req.message,
            length,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    pub build: String,
    pub author: String,
    pub description: String,
    pub github: String,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            build: BUILD.to_string(),
            author: AUTHOR.to_string(),
            description: DESCRIPTION.to_string(),
            github: GITHUB_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DevOpsFact {
    pub fact: String,
    pub timestamp: String,
    pub source: String,
}

/// `{output, success}` payload returned by the git helpers and by
/// downgraded file reads. Failures are reported here, never as an HTTP error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub success: bool,
}

impl Outcome {
    pub fn failure(err: impl std::fmt::Display) -> Self {
        Self {
            output: err.to_string(),
            success: false,
        }
    }
}
