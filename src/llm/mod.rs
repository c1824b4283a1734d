//! LLM providers and prompt construction.

pub mod http;
pub mod prompt;
pub mod provider;
pub mod wire;

pub use http::{AuthScheme, HttpProvider, VendorProfile};
pub use prompt::{build_prompt, build_prompt_with_guidance};
pub use provider::{CommitMessageProvider, create_provider};
pub use wire::{ChatMessage, Reply, RequestBody, Role, WireFormat};
