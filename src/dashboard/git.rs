//! Best-effort `git` shell-outs behind the `/api/git-*` endpoints.
//!
//! Every public operation returns an [`Outcome`] and never fails: spawn
//! errors and non-zero exits both come back as `success: false` with the raw
//! text in `output`. There is no retry, timeout or locking.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::models::Outcome;
use crate::config::GitSection;
use crate::errors::GitError;

/// Captured result of one `git` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutput {
    /// stdout followed by stderr, trimmed.
    pub fn combined(&self) -> String {
        format!("{}{}", self.stdout, self.stderr).trim().to_string()
    }
}

impl From<CommandOutput> for Outcome {
    fn from(out: CommandOutput) -> Self {
        Self {
            output: out.combined(),
            success: out.success,
        }
    }
}

/// Abstraction over running `git` for testability.
/// Real implementation: `ShellGit`. Test double: `StubGit`.
#[async_trait]
pub trait GitRunner: Send + Sync {
    async fn run(&self, work_dir: &Path, args: &[&str]) -> Result<CommandOutput, GitError>;
}

/// Runs the `git` binary found on `PATH`.
pub struct ShellGit;

#[async_trait]
impl GitRunner for ShellGit {
    async fn run(&self, work_dir: &Path, args: &[&str]) -> Result<CommandOutput, GitError> {
        if !work_dir.is_dir() {
            return Err(GitError::MissingWorkDir(work_dir.to_path_buf()));
        }

        let output = tokio::process::Command::new("git")
            .args(args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| GitError::Spawn {
                command: args.join(" "),
                source,
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
        })
    }
}

/// Status/commit/push helpers bound to one working directory.
#[derive(Clone)]
pub struct GitHelper {
    runner: Arc<dyn GitRunner>,
    repo_dir: PathBuf,
    trust_directory: bool,
    commit_message: String,
}

impl GitHelper {
    pub fn new(runner: Arc<dyn GitRunner>, settings: &GitSection) -> Self {
        Self {
            runner,
            repo_dir: settings.repo_dir.clone(),
            trust_directory: settings.trust_directory,
            commit_message: settings.commit_message.clone(),
        }
    }

    /// `git status`
    pub async fn status(&self) -> Outcome {
        match self.trusted_run(&["status"]).await {
            Ok(out) => self.finish("status", out.into()),
            Err(e) => self.finish("status", Outcome::failure(e)),
        }
    }

    /// `git add -A` followed by `git commit -m <message>`.
    ///
    /// A failed `add` short-circuits with its own output.
    pub async fn commit(&self) -> Outcome {
        let outcome = match self.add_and_commit().await {
            Ok(outcome) => outcome,
            Err(e) => Outcome::failure(e),
        };
        self.finish("commit", outcome)
    }

    /// `git push`
    pub async fn push(&self) -> Outcome {
        match self.trusted_run(&["push"]).await {
            Ok(out) => self.finish("push", out.into()),
            Err(e) => self.finish("push", Outcome::failure(e)),
        }
    }

    async fn add_and_commit(&self) -> Result<Outcome, GitError> {
        let add = self.trusted_run(&["add", "-A"]).await?;
        if !add.success {
            return Ok(add.into());
        }

        let commit = self
            .runner
            .run(&self.repo_dir, &["commit", "-m", &self.commit_message])
            .await?;

        let output = [add.combined(), commit.combined()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Outcome {
            output,
            success: commit.success,
        })
    }

    async fn trusted_run(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        if self.trust_directory {
            self.ensure_trusted().await?;
        }
        info!(repo_dir = %self.repo_dir.display(), command = %args.join(" "), "Running git");
        self.runner.run(&self.repo_dir, args).await
    }

    /// Register the working directory as a git `safe.directory` unless it
    /// already is.
    ///
    /// Spawn errors propagate; a non-zero exit from `git config` is logged
    /// and ignored so the real command still runs.
    async fn ensure_trusted(&self) -> Result<(), GitError> {
        let dir = trust_path(&self.repo_dir).await;

        let existing = self
            .runner
            .run(
                &self.repo_dir,
                &["config", "--global", "--get-all", "safe.directory"],
            )
            .await?;
        if is_trusted(&existing.stdout, &dir) {
            debug!(dir = %dir, "Directory already trusted");
            return Ok(());
        }

        let added = self
            .runner
            .run(
                &self.repo_dir,
                &["config", "--global", "--add", "safe.directory", &dir],
            )
            .await?;
        if added.success {
            debug!(dir = %dir, "Added safe.directory");
        } else {
            warn!(dir = %dir, output = %added.combined(), "Failed to add safe.directory");
        }
        Ok(())
    }

    fn finish(&self, op: &str, outcome: Outcome) -> Outcome {
        if !outcome.success {
            warn!(op, output = %outcome.output, "git command failed");
        }
        outcome
    }
}

/// Absolute form of `dir` as git stores it in `safe.directory`.
async fn trust_path(dir: &Path) -> String {
    tokio::fs::canonicalize(dir)
        .await
        .unwrap_or_else(|_| dir.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

/// Whether `--get-all safe.directory` output already covers `dir`.
fn is_trusted(config_output: &str, dir: &str) -> bool {
    config_output
        .lines()
        .map(str::trim)
        .any(|entry| entry == "*" || entry == dir)
}
