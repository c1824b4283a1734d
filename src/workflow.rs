//! Generate a commit message for the staged changes and optionally commit.

use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{ProviderError, WorkflowError};
use crate::git::StagedChanges;
use crate::guidance::collect_guidelines;
use crate::llm::CommitMessageProvider;

/// Options for a single generate run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Print the message without committing.
    pub dry_run: bool,
    /// Repository root to read commit guidance from; `None` disables guidance.
    pub guidance_root: Option<PathBuf>,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub committed: bool,
}

/// Read the staged diff, generate a message, report it, then commit unless dry-run.
///
/// `report` is called with the message before the commit is attempted. Any
/// failure before that point leaves the repository untouched.
pub async fn generate_and_commit<V, P, R>(
    vcs: &V,
    provider: &P,
    options: &GenerateOptions,
    cancel: &CancellationToken,
    report: R,
) -> Result<Outcome, WorkflowError>
where
    V: StagedChanges + ?Sized,
    P: CommitMessageProvider + ?Sized,
    R: FnOnce(&str),
{
    let diff = vcs
        .staged_diff(cancel)
        .await
        .map_err(WorkflowError::Diff)?;

    if diff.is_empty() {
        return Err(WorkflowError::NoStagedChanges);
    }
    debug!("Staged diff: {} chars", diff.len());

    let guidance = options
        .guidance_root
        .as_deref()
        .map(collect_guidelines)
        .unwrap_or_default();
    if !guidance.is_empty() {
        debug!("Including {} chars of repository guidance", guidance.len());
    }

    let message = provider
        .generate_commit_message(&diff, &guidance, cancel)
        .await
        .map_err(WorkflowError::Generate)?
        .trim()
        .to_string();

    if message.is_empty() {
        return Err(WorkflowError::Generate(ProviderError::EmptyResponse {
            provider: provider.kind(),
        }));
    }

    report(&message);

    if options.dry_run {
        return Ok(Outcome {
            message,
            committed: false,
        });
    }

    vcs.commit(&message, cancel)
        .await
        .map_err(WorkflowError::Commit)?;

    Ok(Outcome {
        message,
        committed: true,
    })
}
