//! `POST /api/chat` — chat-style generation with message history.

use crate::{ApiError, AppState, proxy};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use icore::ValidationError;
use llm::Message;
use serde_json::Value;

/// Continue a chat and stream the reply as raw text.
pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let (config, identity) = proxy::begin(&state, &headers)?;
    let history = parse_messages(&body)?;
    proxy::check_rate_limit(&state, &identity, config.production)?;

    if !config.production {
        tracing::info!(
            %identity,
            config = ?config.r#gen,
            messages = history.len(),
            "chat request"
        );
    }

    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(icore::SYSTEM_PROMPT));
    messages.extend(history);
    proxy::relay(&state, &config, messages).await
}

/// Parse `{ messages: Array<{role, content}> }`. A missing `messages`
/// field means an empty history; anything that is not an array of
/// messages is a 400.
fn parse_messages(body: &[u8]) -> Result<Vec<Message>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::BadJson)?;
    let Value::Object(obj) = value else {
        return Err(ValidationError::BadMessages.into());
    };
    match obj.get("messages") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(entries @ Value::Array(_)) => serde_json::from_value(entries.clone())
            .map_err(|_| ValidationError::BadMessages.into()),
        Some(_) => Err(ValidationError::BadMessages.into()),
    }
}
