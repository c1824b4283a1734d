//! git-auto-commit - generate commit messages for staged changes with hosted LLMs.
//!
//! # Overview
//!
//! git-auto-commit reads the staged diff, gathers any commit conventions the
//! repository documents (CONTRIBUTING.md, assistant instruction files,
//! `.gitmessage`), asks one of OpenAI, Azure OpenAI, Anthropic Claude, or
//! GitHub Models for a conventional commit message, and commits with it.

pub mod config;
pub mod error;
pub mod git;
pub mod guidance;
pub mod llm;
pub mod workflow;

// Re-export commonly used types
pub use config::{ConfigFile, ProviderKind, ProviderSettings};
pub use error::{ConfigError, GitError, ProviderError, WorkflowError};
pub use git::{GitCli, StagedChanges};
pub use guidance::{collect_guidelines, extract_commit_section};
pub use llm::{
    CommitMessageProvider, HttpProvider, build_prompt, build_prompt_with_guidance, create_provider,
};
pub use workflow::{GenerateOptions, Outcome, generate_and_commit};
