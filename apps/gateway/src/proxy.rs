//! Shared request pipeline: configuration, rate limiting, upstream
//! relay.

use crate::config::EnvConfig;
use crate::{ApiError, AppState, client_identity};
use axum::body::Body;
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use compact_str::CompactString;
use futures_util::stream::BoxStream;
use futures_util::{Stream, StreamExt};
use llm::{Message, OpenAI, ProviderError, Request, StreamChunk};
use std::io;
use std::time::Duration;
use tokio::time::Instant;

/// Hard wall-clock budget for the whole request, relay included.
pub const REQUEST_BUDGET: Duration = Duration::from_secs(30);

/// Resolve configuration and identity, rejecting early when the
/// upstream credential is absent. The missing field is never named in
/// the response.
pub fn begin(state: &AppState, headers: &HeaderMap) -> Result<(EnvConfig, CompactString), ApiError> {
    let config = EnvConfig::resolve(&state.env);
    let identity = client_identity(headers);
    if config.api_key.is_none() {
        tracing::error!("upstream API key is not configured");
        return Err(ApiError::Config);
    }
    Ok((config, identity))
}

/// Debit one token from the caller's bucket or reject with 429.
pub fn check_rate_limit(
    state: &AppState,
    identity: &str,
    production: bool,
) -> Result<(), ApiError> {
    if !state.limiter.allow(identity, std::time::Instant::now()) {
        if !production {
            tracing::warn!(%identity, "rate limit exceeded");
        }
        return Err(ApiError::RateLimited);
    }
    Ok(())
}

/// Open the upstream stream and relay it as the response body.
///
/// The upstream call and the relay share one deadline. Failures before
/// the first byte map to a status code; once the 200 has been sent, a
/// broken upstream can only end the body early.
pub async fn relay(
    state: &AppState,
    config: &EnvConfig,
    messages: Vec<Message>,
) -> Result<Response, ApiError> {
    let Some(key) = config.api_key.as_deref() else {
        return Err(ApiError::Config);
    };

    let provider = match config.base_url.as_deref() {
        Some(url) => OpenAI::custom(state.client.clone(), key, url),
        None => OpenAI::api(state.client.clone(), key),
    }
    .map_err(|e| {
        tracing::error!("failed to construct provider: {e}");
        ApiError::Internal
    })?;

    let req = Request::new(
        config.r#gen.model.clone(),
        config.r#gen.max_tokens,
        config.r#gen.temperature,
    )
    .messages(messages);

    let deadline = Instant::now() + REQUEST_BUDGET;
    let stream = tokio::time::timeout_at(deadline, provider.open_stream(&req))
        .await
        .map_err(|_| {
            tracing::error!("upstream call exceeded the request budget");
            ApiError::UpstreamUnavailable
        })?
        .map_err(|e| {
            tracing::error!("upstream call failed: {e}");
            ApiError::from(e)
        })?;

    let body = Body::from_stream(relay_body(stream, deadline));
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}

/// Relay upstream chunks as raw text bytes, in arrival order, until
/// EOF, an error, or the request deadline.
fn relay_body(
    mut stream: BoxStream<'static, Result<StreamChunk, ProviderError>>,
    deadline: Instant,
) -> impl Stream<Item = Result<Bytes, io::Error>> + Send {
    async_stream::stream! {
        loop {
            let next = match tokio::time::timeout_at(deadline, stream.next()).await {
                Ok(next) => next,
                Err(_) => {
                    tracing::warn!("request budget exhausted mid-stream, dropping upstream");
                    yield Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        "request budget exhausted",
                    ));
                    break;
                }
            };
            match next {
                Some(Ok(chunk)) => {
                    if let Some(content) = chunk.content() {
                        yield Ok(Bytes::copy_from_slice(content.as_bytes()));
                    }
                }
                Some(Err(e)) => {
                    tracing::error!("upstream stream broke mid-relay: {e}");
                    yield Err(io::Error::other(e));
                    break;
                }
                None => break,
            }
        }
    }
}
