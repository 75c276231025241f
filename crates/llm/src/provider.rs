//! OpenAI-compatible streaming provider.

use crate::{Request, SseEvent, SseParser, StreamChunk};
use async_stream::try_stream;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::{
    Client, StatusCode,
    header::{self, HeaderMap},
};

/// OpenAI chat completions endpoint.
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Errors from the upstream completion provider.
///
/// Variants are grouped the way the gateway maps them to status
/// codes: transient transport failures invite a retry, credential and
/// protocol rejections do not.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The upstream request timed out.
    #[error("upstream request timed out")]
    Timeout,
    /// Could not connect to the upstream endpoint.
    #[error("failed to connect to upstream")]
    Connect(#[source] reqwest::Error),
    /// Upstream rejected the credential.
    #[error("upstream rejected credentials (status {0})")]
    Auth(StatusCode),
    /// Upstream returned a non-success status.
    #[error("upstream API error (status {0})")]
    Api(StatusCode),
    /// Any other transport failure.
    #[error("upstream transport error")]
    Http(#[source] reqwest::Error),
    /// The credential could not be encoded into a header.
    #[error("invalid credential header")]
    Header(#[from] header::InvalidHeaderValue),
}

impl ProviderError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e)
        } else {
            Self::Http(e)
        }
    }
}

/// An OpenAI-compatible streaming completion provider.
#[derive(Clone)]
pub struct OpenAI {
    /// The HTTP client.
    client: Client,
    /// Request headers (authorization, content-type).
    headers: HeaderMap,
    /// Chat completions endpoint URL.
    endpoint: String,
}

impl OpenAI {
    /// Create a provider targeting the OpenAI API.
    pub fn api(client: Client, key: &str) -> Result<Self, ProviderError> {
        Self::custom(client, key, OPENAI_ENDPOINT)
    }

    /// Create a provider targeting a custom OpenAI-compatible endpoint.
    pub fn custom(client: Client, key: &str, endpoint: &str) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse()?);
        headers.insert(header::ACCEPT, "application/json".parse()?);
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Send the completion request and return the chunk stream.
    ///
    /// The HTTP status is checked before any stream is handed back, so
    /// credential and API failures surface as errors rather than as a
    /// broken body. Chunks are yielded in arrival order; the stream
    /// ends at `[DONE]` or upstream EOF.
    pub async fn open_stream(
        &self,
        req: &Request,
    ) -> Result<BoxStream<'static, Result<StreamChunk, ProviderError>>, ProviderError> {
        tracing::debug!(endpoint = %self.endpoint, model = %req.model, "opening completion stream");
        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(req)
            .send()
            .await
            .map_err(ProviderError::from_transport)?;

        let status = response.status();
        tracing::debug!(%status, "upstream responded");
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProviderError::Auth(status));
        }
        if !status.is_success() {
            return Err(ProviderError::Api(status));
        }

        let mut bytes = response.bytes_stream();
        let stream = try_stream! {
            let mut parser = SseParser::new();
            'read: while let Some(read) = bytes.next().await {
                let read = read.map_err(ProviderError::from_transport)?;
                for event in parser.push(&read) {
                    match event {
                        SseEvent::Chunk(chunk) => yield chunk,
                        SseEvent::Done => break 'read,
                    }
                }
            }
        };
        Ok(stream.boxed())
    }
}
