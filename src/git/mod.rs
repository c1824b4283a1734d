//! Git operations: staged diff and commit through the `git` binary,
//! repository discovery through git2.

pub mod cli;
pub mod repo;

pub use cli::{GitCli, StagedChanges};
pub use repo::{check_git_installed, discover_workdir};
