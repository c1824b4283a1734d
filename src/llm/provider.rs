//! Provider abstraction and selection.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{ConfigFile, ProviderKind};
use crate::error::ProviderError;
use crate::llm::http::HttpProvider;

/// Something that turns a staged diff into a commit message.
#[async_trait]
pub trait CommitMessageProvider: Send + Sync {
    /// The backend this provider talks to.
    fn kind(&self) -> ProviderKind;

    /// Generate a commit message for `diff`, honoring `guidance` when non-empty.
    ///
    /// Makes a single attempt; cancelling `cancel` aborts the in-flight request.
    async fn generate_commit_message(
        &self,
        diff: &str,
        guidance: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError>;
}

/// Create the provider selected by the configuration.
///
/// Configuration problems (unknown provider, missing or incomplete
/// credentials) are reported here, before any network call.
pub fn create_provider(
    config: &ConfigFile,
) -> Result<Box<dyn CommitMessageProvider>, ProviderError> {
    let settings = config.provider_settings()?;
    debug!("Using provider {}", settings.kind().display_name());
    Ok(Box::new(HttpProvider::from_settings(&settings)?))
}
