//! Repository discovery and git availability checks.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::GitError;

/// Check that the `git` executable is on PATH.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed() -> Result<PathBuf, GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)
}

/// Find the work tree root of the repository containing `start`.
///
/// Walks up parent directories like git does, so the tool can run from
/// any subdirectory.
pub fn discover_workdir(start: &Path) -> Result<PathBuf, GitError> {
    let repo = Repository::discover(start).map_err(GitError::RepositoryNotFound)?;
    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or_else(|| GitError::BareRepository(repo.path().to_path_buf()))
}
