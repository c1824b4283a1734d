//! Configuration file handling.
//!
//! The file lives at `~/.git-auto-commit.yaml` by default and holds the
//! selected provider plus one credential section per provider:
//!
//! ```yaml
//! provider: claude
//! claude:
//!   api_key: sk-ant-...
//!   model: claude-3-5-sonnet-20241022
//! ```
//!
//! On load the document is resolved into a [`ProviderSettings`] so the rest
//! of the crate never sees a record with the wrong section populated.

pub mod provider;
pub mod wizard;

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub use provider::{
    AzureSettings, ClaudeSettings, GitHubSettings, OpenAiSettings, ProviderKind, ProviderSettings,
};

/// File name of the default configuration file in the home directory.
pub const CONFIG_FILE_NAME: &str = ".git-auto-commit.yaml";

/// Environment variable that overrides the default config path.
pub const CONFIG_ENV_VAR: &str = "GIT_AUTO_COMMIT_CONFIG";

/// The configuration document as persisted on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claude: Option<ClaudeSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubSettings>,
}

impl ConfigFile {
    /// Load and parse the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a configuration document from YAML text.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Resolve the declared provider into its credential record.
    ///
    /// Fails when the provider name is unknown, when its section is absent,
    /// or when a required field in that section is blank.
    pub fn provider_settings(&self) -> Result<ProviderSettings, ConfigError> {
        let kind: ProviderKind = self.provider.parse()?;

        let settings = match kind {
            ProviderKind::OpenAi => self.openai.clone().map(ProviderSettings::OpenAi),
            ProviderKind::Azure => self.azure.clone().map(ProviderSettings::Azure),
            ProviderKind::Claude => self.claude.clone().map(ProviderSettings::Claude),
            ProviderKind::GitHub => self.github.clone().map(ProviderSettings::GitHub),
        }
        .ok_or(ConfigError::MissingSettings(kind))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Write the configuration atomically with owner-only permissions.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self).map_err(ConfigError::SerializeFailed)?;
        let write_err = |source| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            source,
        };

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(write_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(write_err)?;
        tmp.write_all(yaml.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        restrict_permissions(tmp.path()).map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        debug!("Saved configuration to {}", path.display());
        Ok(())
    }
}

impl From<ProviderSettings> for ConfigFile {
    fn from(settings: ProviderSettings) -> Self {
        let mut config = ConfigFile {
            provider: settings.kind().as_str().to_string(),
            ..Default::default()
        };
        match settings {
            ProviderSettings::OpenAi(s) => config.openai = Some(s),
            ProviderSettings::Azure(s) => config.azure = Some(s),
            ProviderSettings::Claude(s) => config.claude = Some(s),
            ProviderSettings::GitHub(s) => config.github = Some(s),
        }
        config
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Determine which config file to use.
///
/// Checks in order:
/// 1. an explicit `--config` path
/// 2. the `GIT_AUTO_COMMIT_CONFIG` environment variable
/// 3. `~/.git-auto-commit.yaml`
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    home_dir()
        .map(|home| home.join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
