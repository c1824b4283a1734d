//! Provider identities and their credential records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_GITHUB_MODEL: &str = "gpt-4o";

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Azure,
    Claude,
    GitHub,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::OpenAi,
        ProviderKind::Azure,
        ProviderKind::Claude,
        ProviderKind::GitHub,
    ];

    /// Identifier used in the config file's `provider` field and section names.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Azure => "azure",
            ProviderKind::Claude => "claude",
            ProviderKind::GitHub => "github",
        }
    }

    /// Human-readable vendor name for messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Azure => "Azure OpenAI",
            ProviderKind::Claude => "Claude",
            ProviderKind::GitHub => "GitHub Models",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownProvider(s.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureSettings {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub deployment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_claude_model")]
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubSettings {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_github_model")]
    pub model: String,
}

fn default_openai_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_claude_model() -> String {
    DEFAULT_CLAUDE_MODEL.to_string()
}

fn default_github_model() -> String {
    DEFAULT_GITHUB_MODEL.to_string()
}

/// The selected backend together with exactly its credential record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSettings {
    OpenAi(OpenAiSettings),
    Azure(AzureSettings),
    Claude(ClaudeSettings),
    GitHub(GitHubSettings),
}

impl ProviderSettings {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderSettings::OpenAi(_) => ProviderKind::OpenAi,
            ProviderSettings::Azure(_) => ProviderKind::Azure,
            ProviderSettings::Claude(_) => ProviderKind::Claude,
            ProviderSettings::GitHub(_) => ProviderKind::GitHub,
        }
    }

    /// Reject records whose required fields are blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let kind = self.kind();
        let required: Vec<(&'static str, &str)> = match self {
            ProviderSettings::OpenAi(s) => {
                vec![("api_key", s.api_key.as_str()), ("model", s.model.as_str())]
            }
            ProviderSettings::Azure(s) => vec![
                ("endpoint", s.endpoint.as_str()),
                ("api_key", s.api_key.as_str()),
                ("deployment", s.deployment.as_str()),
            ],
            ProviderSettings::Claude(s) => {
                vec![("api_key", s.api_key.as_str()), ("model", s.model.as_str())]
            }
            ProviderSettings::GitHub(s) => {
                vec![("token", s.token.as_str()), ("model", s.model.as_str())]
            }
        };

        match required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(ConfigError::MissingField {
                provider: kind,
                field,
            }),
            None => Ok(()),
        }
    }
}
