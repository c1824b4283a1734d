//! JSON request and response envelopes for the supported chat APIs.
//!
//! OpenAI, Azure OpenAI, and GitHub Models share the chat completions shape;
//! Anthropic uses the messages shape. Both are reduced to a [`Reply`].

use serde::{Deserialize, Serialize};

/// Maximum tokens requested from the Anthropic messages API.
pub const ANTHROPIC_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A single chat message. Every request carries exactly one, from the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Which request/response envelope a vendor speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    ChatCompletions,
    AnthropicMessages,
}

impl WireFormat {
    /// Build the request body for a single user prompt.
    pub fn request_body<'a>(&self, model: Option<&'a str>, prompt: &str) -> RequestBody<'a> {
        let messages = vec![ChatMessage::user(prompt)];
        match self {
            WireFormat::ChatCompletions => {
                RequestBody::ChatCompletions(ChatCompletionRequest { model, messages })
            }
            WireFormat::AnthropicMessages => RequestBody::AnthropicMessages(AnthropicRequest {
                model: model.unwrap_or_default(),
                max_tokens: ANTHROPIC_MAX_TOKENS,
                messages,
            }),
        }
    }

    /// Parse a response body into a [`Reply`].
    pub fn parse_reply(&self, body: &[u8]) -> Result<Reply, serde_json::Error> {
        match self {
            WireFormat::ChatCompletions => {
                serde_json::from_slice::<ChatCompletionResponse>(body).map(Envelope::into_reply)
            }
            WireFormat::AnthropicMessages => {
                serde_json::from_slice::<AnthropicResponse>(body).map(Envelope::into_reply)
            }
        }
    }
}

/// Outcome of a well-formed response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text of the first result.
    Text(String),
    /// The vendor's error message.
    Error(String),
    /// A success envelope with no usable result.
    Empty,
}

impl Reply {
    /// Blank text counts as no result.
    fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            Reply::Empty
        } else {
            Reply::Text(text)
        }
    }
}

trait Envelope {
    fn into_reply(self) -> Reply;
}

/// JSON request body in the envelope a vendor expects.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RequestBody<'a> {
    ChatCompletions(ChatCompletionRequest<'a>),
    AnthropicMessages(AnthropicRequest<'a>),
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ErrorPayload>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl Envelope for ChatCompletionResponse {
    fn into_reply(self) -> Reply {
        if let Some(error) = self.error {
            return Reply::Error(error.message);
        }
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map_or(Reply::Empty, Reply::from_text)
    }
}

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    error: Option<ErrorPayload>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl Envelope for AnthropicResponse {
    fn into_reply(self) -> Reply {
        if let Some(error) = self.error {
            return Reply::Error(error.message);
        }
        self.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .map_or(Reply::Empty, Reply::from_text)
    }
}
