//! Unified upstream completion interface.
//!
//! Shared types for the OpenAI-compatible chat completions API plus
//! the streaming HTTP transport the gateway relays from: `Message`,
//! `Request`, `StreamChunk`, an incremental SSE parser, and the
//! `OpenAI` provider.

pub use message::{Message, Role};
pub use provider::{OPENAI_ENDPOINT, OpenAI, ProviderError};
pub use request::Request;
pub use reqwest::{self, Client};
pub use stream::{Choice, Delta, FinishReason, SseEvent, SseParser, StreamChunk};

mod message;
mod provider;
mod request;
mod stream;
