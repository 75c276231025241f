//! The request body for OpenAI-compatible chat completions.

use crate::Message;
use compact_str::CompactString;
use serde::Serialize;

/// A streaming chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: CompactString,
    /// The messages to send to the API.
    pub messages: Vec<Message>,
    /// Whether to stream the response.
    pub stream: bool,
    /// The maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Request {
    /// Create a streaming request with no messages yet.
    pub fn new(model: impl Into<CompactString>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            stream: true,
            max_tokens,
            temperature,
        }
    }

    /// Attach the full message history.
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Attach a single user prompt.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.messages = vec![Message::user(prompt)];
        self
    }
}
