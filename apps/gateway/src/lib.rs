//! IdeaForge gateway — a rate-limited streaming proxy in front of an
//! OpenAI-compatible completion API.
//!
//! One pipeline per request: resolve configuration, validate the
//! body, debit the caller's token bucket, build the prompt, then
//! relay the upstream token stream to the caller byte-for-byte.

pub use config::{EnvConfig, EnvSource, GenConfig};
pub use error::ApiError;
pub use identity::{UNKNOWN_IDENTITY, client_identity};
pub use routes::router;
pub use state::AppState;

pub mod chat;
pub mod config;
mod error;
mod identity;
pub mod generate;
mod proxy;
mod routes;
mod state;
