//! Staged diff and commit via the system `git` binary.
//!
//! Shelling out inherits the user's git config, hooks, signing setup, and
//! credential helpers, which libgit2 would bypass.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::GitError;

/// Read staged changes and commit them.
///
/// This abstraction allows mocking git in workflow tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StagedChanges: Send + Sync {
    /// Return the staged diff (`git diff --cached`) with surrounding whitespace trimmed.
    async fn staged_diff(&self, cancel: &CancellationToken) -> Result<String, GitError>;

    /// Commit the staged changes with `message`.
    async fn commit(&self, message: &str, cancel: &CancellationToken) -> Result<(), GitError>;
}

/// [`StagedChanges`] backed by the `git` command line.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Run a git command in the work tree and return its stdout.
    ///
    /// The child is killed if `cancel` fires before it exits.
    async fn run_git(
        &self,
        args: &[&str],
        operation: &'static str,
        cancel: &CancellationToken,
    ) -> Result<String, GitError> {
        debug!("Running git {} in {}", operation, self.workdir.display());

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();

        let output = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GitError::Cancelled { operation }),
            result = output => result.map_err(|source| GitError::SpawnFailed { operation, source })?,
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::CommandFailed {
                operation,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl StagedChanges for GitCli {
    async fn staged_diff(&self, cancel: &CancellationToken) -> Result<String, GitError> {
        let diff = self.run_git(&["diff", "--cached"], "diff", cancel).await?;
        Ok(diff.trim().to_string())
    }

    async fn commit(&self, message: &str, cancel: &CancellationToken) -> Result<(), GitError> {
        self.run_git(&["commit", "-m", message], "commit", cancel)
            .await
            .map(|_| ())
    }
}
