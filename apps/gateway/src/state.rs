//! Shared state for the gateway's request handlers.

use crate::config::EnvSource;
use icore::RateLimiter;
use std::sync::Arc;

/// Shared state available to all request handlers.
///
/// The rate limiter is constructor-injected rather than module-global
/// so tests can build isolated instances.
#[derive(Clone)]
pub struct AppState {
    /// Per-identity token buckets.
    pub limiter: Arc<RateLimiter>,
    /// Upstream HTTP client, shared across requests.
    pub client: llm::Client,
    /// Configuration source.
    pub env: EnvSource,
}

impl AppState {
    /// State backed by the process environment.
    pub fn new() -> Self {
        Self::with_env(EnvSource::Process)
    }

    /// State with an explicit configuration source.
    pub fn with_env(env: EnvSource) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::default()),
            client: llm::Client::new(),
            env,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
