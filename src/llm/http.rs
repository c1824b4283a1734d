//! HTTP adapter shared by all hosted providers.
//!
//! Vendors differ only in endpoint, auth headers, and envelope shape, all of
//! which live in a [`VendorProfile`]. A single [`HttpProvider`] does the
//! request/response round trip for any profile.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{ProviderKind, ProviderSettings};
use crate::error::ProviderError;
use crate::llm::prompt::build_prompt_with_guidance;
use crate::llm::provider::CommitMessageProvider;
use crate::llm::wire::{Reply, WireFormat};

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const ANTHROPIC_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
pub const GITHUB_MODELS_ENDPOINT: &str = "https://models.inference.ai.azure.com/chat/completions";
pub const AZURE_API_VERSION: &str = "2024-02-15-preview";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum characters of a non-JSON error body kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// How a vendor expects the credential to be sent.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `api-key: <key>` (Azure OpenAI)
    ApiKey(String),
    /// `x-api-key: <key>` plus `anthropic-version`
    Anthropic(String),
}

impl AuthScheme {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            AuthScheme::Bearer(token) => request.bearer_auth(token),
            AuthScheme::ApiKey(key) => request.header("api-key", key),
            AuthScheme::Anthropic(key) => request
                .header("x-api-key", key)
                .header("anthropic-version", ANTHROPIC_VERSION),
        }
    }
}

// Credentials stay out of debug logs.
impl std::fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AuthScheme::Bearer(_) => "Bearer",
            AuthScheme::ApiKey(_) => "ApiKey",
            AuthScheme::Anthropic(_) => "Anthropic",
        };
        write!(f, "{name}(<redacted>)")
    }
}

/// Everything that distinguishes one vendor's API from another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorProfile {
    pub kind: ProviderKind,
    pub endpoint: String,
    pub auth: AuthScheme,
    pub wire: WireFormat,
    pub model: Option<String>,
}

impl VendorProfile {
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        match settings {
            ProviderSettings::OpenAi(s) => VendorProfile {
                kind: ProviderKind::OpenAi,
                endpoint: OPENAI_ENDPOINT.to_string(),
                auth: AuthScheme::Bearer(s.api_key.clone()),
                wire: WireFormat::ChatCompletions,
                model: Some(s.model.clone()),
            },
            ProviderSettings::Azure(s) => VendorProfile {
                kind: ProviderKind::Azure,
                endpoint: azure_endpoint(&s.endpoint, &s.deployment),
                auth: AuthScheme::ApiKey(s.api_key.clone()),
                wire: WireFormat::ChatCompletions,
                // The deployment in the URL selects the model.
                model: None,
            },
            ProviderSettings::Claude(s) => VendorProfile {
                kind: ProviderKind::Claude,
                endpoint: ANTHROPIC_ENDPOINT.to_string(),
                auth: AuthScheme::Anthropic(s.api_key.clone()),
                wire: WireFormat::AnthropicMessages,
                model: Some(s.model.clone()),
            },
            ProviderSettings::GitHub(s) => VendorProfile {
                kind: ProviderKind::GitHub,
                endpoint: GITHUB_MODELS_ENDPOINT.to_string(),
                auth: AuthScheme::Bearer(s.token.clone()),
                wire: WireFormat::ChatCompletions,
                model: Some(s.model.clone()),
            },
        }
    }
}

/// Build the Azure OpenAI chat completions URL for a resource endpoint and deployment.
pub fn azure_endpoint(endpoint: &str, deployment: &str) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        endpoint.trim().trim_end_matches('/'),
        deployment.trim(),
        AZURE_API_VERSION
    )
}

/// A provider that talks to a hosted chat API over HTTP.
pub struct HttpProvider {
    client: Client,
    profile: VendorProfile,
}

impl HttpProvider {
    pub fn new(profile: VendorProfile) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(concat!("git-auto-commit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ProviderError::ClientBuild)?;

        Ok(Self { client, profile })
    }

    /// Build a provider straight from a validated credential record.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        Self::new(VendorProfile::from_settings(settings))
    }

    /// Send requests to `endpoint` instead of the vendor's default URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.profile.endpoint = endpoint.into();
        self
    }

    pub fn profile(&self) -> &VendorProfile {
        &self.profile
    }

    /// Send one prompt and return the first result's text.
    pub async fn complete(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        let provider = self.profile.kind;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProviderError::Cancelled { provider }),
            result = self.round_trip(prompt) => result,
        }
    }

    async fn round_trip(&self, prompt: &str) -> Result<String, ProviderError> {
        let provider = self.profile.kind;
        let body = self
            .profile
            .wire
            .request_body(self.profile.model.as_deref(), prompt);

        debug!(
            "Sending {} char prompt to {} ({})",
            prompt.len(),
            provider.display_name(),
            self.profile.endpoint
        );

        let request = self.client.post(&self.profile.endpoint).json(&body);
        let response = self
            .profile
            .auth
            .apply(request)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { provider, source })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ProviderError::Transport { provider, source })?;

        debug!("{} responded with HTTP {}", provider.display_name(), status);

        let reply = match self.profile.wire.parse_reply(&bytes) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => {
                return Err(ProviderError::Http {
                    provider,
                    status: status.as_u16(),
                    body: truncate_body(&bytes),
                });
            }
            Err(source) => return Err(ProviderError::InvalidResponse { provider, source }),
        };

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::Error(message) => Err(ProviderError::Api { provider, message }),
            Reply::Empty if !status.is_success() => Err(ProviderError::Http {
                provider,
                status: status.as_u16(),
                body: truncate_body(&bytes),
            }),
            Reply::Empty => Err(ProviderError::EmptyResponse { provider }),
        }
    }
}

#[async_trait]
impl CommitMessageProvider for HttpProvider {
    fn kind(&self) -> ProviderKind {
        self.profile.kind
    }

    async fn generate_commit_message(
        &self,
        diff: &str,
        guidance: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        let prompt = build_prompt_with_guidance(diff, guidance);
        self.complete(&prompt, cancel).await
    }
}

fn truncate_body(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.chars().count() <= MAX_ERROR_BODY_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
    format!("{truncated}...")
}
