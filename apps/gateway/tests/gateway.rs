//! End-to-end handler tests against a local mock upstream.

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use http_body_util::BodyExt;
use ideaforge_gateway::{AppState, EnvSource, chat, generate};
use serde_json::{Value, json};

/// Serve a canned SSE response on an ephemeral port; returns the
/// endpoint URL.
async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || async move { (status, [(header::CONTENT_TYPE, "text/event-stream")], body) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1/chat/completions")
}

const HELLO_WORLD_SSE: &str = "data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}\n\n\
                               data: {\"choices\":[{\"delta\":{\"content\":\", world\"}}]}\n\n\
                               data: [DONE]\n\n";

fn state_with(vars: Vec<(&str, &str)>) -> AppState {
    AppState::with_env(EnvSource::fixed(vars))
}

fn forwarded_from(ip: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", ip.parse().unwrap());
    headers
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn missing_credential_is_a_500_regardless_of_body() {
    let state = state_with(Vec::new());

    for body in ["", "not valid json", "{\"topic\":\"x\"}"] {
        let response = generate::generate(
            State(state.clone()),
            HeaderMap::new(),
            Bytes::from(body.to_owned()),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Service configuration error" })
        );
    }
}

#[tokio::test]
async fn eleventh_request_in_the_same_second_is_rate_limited() {
    let endpoint = spawn_upstream(StatusCode::OK, HELLO_WORLD_SSE).await;
    let state = state_with(vec![
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", endpoint.leak()),
    ]);
    let headers = forwarded_from("1.2.3.4");

    for i in 0..10 {
        let response = generate::generate(State(state.clone()), headers.clone(), Bytes::new())
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK, "request {i}");
    }

    let response = generate::generate(State(state.clone()), headers, Bytes::new())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Rate limit exceeded. Please try again later." })
    );
}

#[tokio::test]
async fn rate_limit_buckets_are_per_identity() {
    let endpoint = spawn_upstream(StatusCode::OK, HELLO_WORLD_SSE).await;
    let state = state_with(vec![
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", endpoint.leak()),
    ]);

    for _ in 0..10 {
        generate::generate(
            State(state.clone()),
            forwarded_from("1.2.3.4"),
            Bytes::new(),
        )
        .await
        .into_response();
    }

    // A different caller still gets through.
    let response = generate::generate(
        State(state.clone()),
        forwarded_from("9.9.9.9"),
        Bytes::new(),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unidentified_callers_share_the_sentinel_bucket() {
    let endpoint = spawn_upstream(StatusCode::OK, HELLO_WORLD_SSE).await;
    let state = AppState {
        limiter: std::sync::Arc::new(icore::RateLimiter::new(1, 1, 64)),
        client: llm::Client::new(),
        env: EnvSource::fixed([
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", endpoint.leak()),
        ]),
    };

    let first = generate::generate(State(state.clone()), HeaderMap::new(), Bytes::new())
        .await
        .into_response();
    assert_eq!(first.status(), StatusCode::OK);

    // No headers again: same "unknown" bucket, now empty.
    let second = generate::generate(State(state.clone()), HeaderMap::new(), Bytes::new())
        .await
        .into_response();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn malformed_json_is_a_400_naming_invalid_json() {
    let state = state_with(vec![("OPENAI_API_KEY", "sk-test")]);
    let response = generate::generate(
        State(state.clone()),
        HeaderMap::new(),
        Bytes::from_static(b"not valid json"),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid JSON in request body" })
    );
}

#[tokio::test]
async fn invalid_fields_are_a_400_naming_the_shape() {
    let state = state_with(vec![("OPENAI_API_KEY", "sk-test")]);

    let response = generate::generate(
        State(state.clone()),
        HeaderMap::new(),
        Bytes::from_static(b"{\"difficulty\":\"expert\"}"),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = body_json(response).await["error"].as_str().unwrap().to_owned();
    assert!(error.contains("difficulty"));
    assert!(!error.contains("expert"));

    let response = generate::generate(
        State(state.clone()),
        HeaderMap::new(),
        Bytes::from_static(b"{\"topic\":\"   \"}"),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn relay_returns_upstream_text_in_order() {
    let endpoint = spawn_upstream(StatusCode::OK, HELLO_WORLD_SSE).await;
    let state = state_with(vec![
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", endpoint.leak()),
    ]);

    let response = generate::generate(
        State(state.clone()),
        HeaderMap::new(),
        Bytes::from_static(b"{\"topic\":\"budgeting\"}"),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    assert_eq!(body_text(response).await, "Hello, world");
}

#[tokio::test]
async fn upstream_auth_failure_is_a_502() {
    let endpoint = spawn_upstream(StatusCode::UNAUTHORIZED, "").await;
    let state = state_with(vec![
        ("OPENAI_API_KEY", "sk-bad"),
        ("OPENAI_BASE_URL", endpoint.leak()),
    ]);

    let response = generate::generate(State(state.clone()), HeaderMap::new(), Bytes::new())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Service configuration error" })
    );
}

#[tokio::test]
async fn unreachable_upstream_is_a_503() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let state = state_with(vec![
        ("OPENAI_API_KEY", "sk-test"),
        (
            "OPENAI_BASE_URL",
            format!("http://{addr}/v1/chat/completions").leak(),
        ),
    ]);

    let response = generate::generate(State(state.clone()), HeaderMap::new(), Bytes::new())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Service temporarily unavailable. Please try again." })
    );
}

#[tokio::test]
async fn chat_accepts_a_message_history() {
    let endpoint = spawn_upstream(StatusCode::OK, HELLO_WORLD_SSE).await;
    let state = state_with(vec![
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", endpoint.leak()),
    ]);

    let body = json!({ "messages": [
        { "role": "user", "content": "an idea about plants" }
    ]});
    let response = chat::chat(
        State(state.clone()),
        HeaderMap::new(),
        Bytes::from(body.to_string()),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Hello, world");
}

#[tokio::test]
async fn chat_with_no_messages_field_is_valid() {
    let endpoint = spawn_upstream(StatusCode::OK, HELLO_WORLD_SSE).await;
    let state = state_with(vec![
        ("OPENAI_API_KEY", "sk-test"),
        ("OPENAI_BASE_URL", endpoint.leak()),
    ]);

    let response = chat::chat(
        State(state.clone()),
        HeaderMap::new(),
        Bytes::from_static(b"{}"),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn chat_rejects_non_array_messages() {
    let state = state_with(vec![("OPENAI_API_KEY", "sk-test")]);

    let response = chat::chat(
        State(state.clone()),
        HeaderMap::new(),
        Bytes::from_static(b"{\"messages\":\"hello\"}"),
    )
    .await
    .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid request body. Expected: { messages: Array }" })
    );
}
