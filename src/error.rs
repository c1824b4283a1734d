//! Error types for git-auto-commit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ProviderKind;

/// Errors from loading, validating, or saving the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the home directory (set HOME or pass --config)")]
    NoHomeDir,

    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(#[source] serde_yaml::Error),

    #[error("Failed to write config file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown provider: '{0}'. Expected one of: openai, azure, claude, github")]
    UnknownProvider(String),

    #[error(
        "{} configuration is required: add a `{}` section to the config file or run `git-auto-commit configure`",
        .0.display_name(),
        .0.as_str()
    )]
    MissingSettings(ProviderKind),

    #[error("{} configuration is missing a value for `{field}`", .provider.display_name())]
    MissingField {
        provider: ProviderKind,
        field: &'static str,
    },

    #[error("Invalid provider selection: {0}")]
    InvalidSelection(usize),

    #[error("Failed to read configuration answer: {0}")]
    PromptFailed(#[source] dialoguer::Error),
}

/// Errors from git subprocess operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found in PATH. Install git and try again.")]
    NotInstalled,

    #[error("Not a git repository (or any parent directory): {0}")]
    RepositoryNotFound(#[source] git2::Error),

    #[error("Repository at {0} has no working tree")]
    BareRepository(PathBuf),

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} exited with {}: {stderr}",
            .code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    CommandFailed {
        operation: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("git {operation} was cancelled")]
    Cancelled { operation: &'static str },
}

/// Errors from LLM provider calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to {} failed: {source}", .provider.display_name())]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{} API error: {message}", .provider.display_name())]
    Api {
        provider: ProviderKind,
        message: String,
    },

    #[error("{} returned HTTP {status}: {body}", .provider.display_name())]
    Http {
        provider: ProviderKind,
        status: u16,
        body: String,
    },

    #[error("{} returned an unparseable response: {source}", .provider.display_name())]
    InvalidResponse {
        provider: ProviderKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("No result returned from {}", .provider.display_name())]
    EmptyResponse { provider: ProviderKind },

    #[error("Request to {} was cancelled", .provider.display_name())]
    Cancelled { provider: ProviderKind },
}

/// Errors from the generate-and-commit workflow, tagged with the failing step.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Failed to get staged changes: {0}")]
    Diff(#[source] GitError),

    #[error("No staged changes found. Stage files with `git add` first.")]
    NoStagedChanges,

    #[error("Failed to generate commit message: {0}")]
    Generate(#[source] ProviderError),

    #[error("Failed to commit: {0}")]
    Commit(#[source] GitError),
}

impl WorkflowError {
    /// Whether the failure came from a Ctrl-C cancellation rather than a real error.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            WorkflowError::Diff(GitError::Cancelled { .. })
                | WorkflowError::Commit(GitError::Cancelled { .. })
                | WorkflowError::Generate(ProviderError::Cancelled { .. })
        )
    }
}
