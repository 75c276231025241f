//! HTTP client for the gateway endpoints.

use anyhow::{Result, bail};
use llm::Message;
use serde_json::{Value, json};

/// A client bound to one gateway base URL.
pub struct GatewayClient {
    client: reqwest::Client,
    base: String,
}

impl GatewayClient {
    /// Create a client for the gateway at `base` (no trailing slash).
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into(),
        }
    }

    /// Request a generation; returns the streaming response.
    pub async fn generate(&self, params: Value) -> Result<reqwest::Response> {
        self.open("/api/generate", params).await
    }

    /// Continue a chat; returns the streaming response.
    pub async fn chat(&self, messages: &[Message]) -> Result<reqwest::Response> {
        self.open("/api/chat", json!({ "messages": messages })).await
    }

    /// POST a body and surface the gateway's `{"error": ...}` message
    /// on any non-success status.
    async fn open(&self, path: &str, body: Value) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(format!("{}{path}", self.base))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%status, path, "gateway response");
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("error")?.as_str().map(str::to_owned))
                .unwrap_or_else(|| format!("gateway returned {status}"));
            bail!(message);
        }
        Ok(response)
    }
}
