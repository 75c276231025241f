//! `POST /api/generate` — parameter-driven project idea generation.

use crate::{ApiError, AppState, proxy};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use icore::GenerationParams;
use llm::Message;

/// Generate one project idea and stream the raw text back.
pub async fn generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let (config, identity) = proxy::begin(&state, &headers)?;
    let params = parse_params(&body)?;
    proxy::check_rate_limit(&state, &identity, config.production)?;

    if !config.production {
        tracing::info!(
            %identity,
            config = ?config.r#gen,
            topic = params.topic.is_some(),
            domain = params.domain.is_some(),
            difficulty = params.difficulty.is_some(),
            "generate request"
        );
    }

    let prompt = icore::build_prompt(&params);
    proxy::relay(&state, &config, vec![Message::user(prompt)]).await
}

/// Parse the optional parameter body. An absent or blank body is
/// valid and yields all defaults; malformed JSON and invalid fields
/// are distinct 400s.
fn parse_params(body: &[u8]) -> Result<GenerationParams, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerationParams::default());
    }
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|_| ApiError::BadJson)?;
    GenerationParams::from_value(&value).map_err(Into::into)
}
