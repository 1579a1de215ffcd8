//! Chat API endpoint
//!
//! The boundary of the routing pipeline: decode the inbound message, run
//! Routing Policy then Completion Dispatcher, and encode the outbound
//! response in either the structured or the legacy shape.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::error;

use switchboard_llm::PerformanceSnapshot;

use super::ApiResponse;
use crate::server::AppState;

/// Which outbound response shape the chat endpoint emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStyle {
    /// `{model, reasoning, performance, reply}` — the primary shape
    Structured,
    /// `{message}` with a pre-formatted "Model: X / Reply: Y" string
    Legacy,
}

/// Inbound chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The user's message
    pub message: String,
}

/// Structured chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Model that answered
    pub model: String,
    /// Classifier's one-sentence justification
    pub reasoning: String,
    /// Static catalog metadata plus the measured latency
    pub performance: PerformanceSnapshot,
    /// The (possibly cleaned) reply text
    pub reply: String,
}

/// Legacy chat response: everything folded into one display string
#[derive(Debug, Serialize)]
pub struct LegacyChatResponse {
    /// Pre-formatted reply
    pub message: String,
}

impl From<&ChatResponse> for LegacyChatResponse {
    fn from(response: &ChatResponse) -> Self {
        Self {
            message: format!("Model: {}\n\nReply: {}", response.model, response.reply),
        }
    }
}

/// The chat endpoint body, one of the two supported shapes
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatReplyBody {
    /// Structured shape
    Structured(ChatResponse),
    /// Legacy shape
    Legacy(LegacyChatResponse),
}

/// Handle one chat turn
async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReplyBody>, (StatusCode, Json<ApiResponse<()>>)> {
    let decision = state.policy.route(&request.message).await;

    let dispatched = state
        .dispatcher
        .dispatch(&decision.model, &request.message)
        .await
        .map_err(|e| {
            error!(error = %e, model = %decision.model, "completion dispatch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::error(
                    "Sorry, I couldn't reach the model right now. Please try again.",
                )),
            )
        })?;

    let response = ChatResponse {
        model: dispatched.model,
        reasoning: decision.reasoning,
        performance: dispatched.performance,
        reply: dispatched.reply,
    };

    let body = match state.response_style {
        ResponseStyle::Structured => ChatReplyBody::Structured(response),
        ResponseStyle::Legacy => ChatReplyBody::Legacy(LegacyChatResponse::from(&response)),
    };

    Ok(Json(body))
}

/// Create chat routes
pub fn chat_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/chat", post(chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use switchboard_llm::MockProvider;

    fn state_with_mock(style: ResponseStyle) -> (AppState, Arc<MockProvider>) {
        let mock = Arc::new(MockProvider::new());
        (AppState::new(mock.clone(), style), mock)
    }

    #[tokio::test]
    async fn test_chat_structured_response() {
        let (state, mock) = state_with_mock(ResponseStyle::Structured);
        // First call: classifier. Second call: completion.
        mock.add_response(r#"{"model":"openai/gpt-5-mini","reasoning":"Coding request"}"#);
        mock.add_response("fn add(a: i32, b: i32) -> i32 { a + b }");

        let result = chat(
            State(state),
            Json(ChatRequest {
                message: "write an add function".to_string(),
            }),
        )
        .await;

        let Json(body) = result.expect("chat should succeed");
        match body {
            ChatReplyBody::Structured(response) => {
                assert_eq!(response.model, "openai/gpt-5-mini");
                assert_eq!(response.reasoning, "Coding request");
                assert!(response.reply.contains("fn add"));
                assert!(response.performance.actual_time_to_first_token.ends_with("ms"));
            }
            ChatReplyBody::Legacy(_) => panic!("expected structured shape"),
        }
    }

    #[tokio::test]
    async fn test_chat_legacy_response() {
        let (state, mock) = state_with_mock(ResponseStyle::Legacy);
        mock.add_response(r#"{"model":"anthropic/claude-sonnet-4","reasoning":"deep"}"#);
        mock.add_response("A detailed explanation.");

        let result = chat(
            State(state),
            Json(ChatRequest {
                message: "explain monads".to_string(),
            }),
        )
        .await;

        let Json(body) = result.expect("chat should succeed");
        match body {
            ChatReplyBody::Legacy(legacy) => {
                assert_eq!(
                    legacy.message,
                    "Model: anthropic/claude-sonnet-4\n\nReply: A detailed explanation."
                );
            }
            ChatReplyBody::Structured(_) => panic!("expected legacy shape"),
        }
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_maps_to_bad_gateway() {
        let (state, mock) = state_with_mock(ResponseStyle::Structured);
        mock.add_response(r#"{"model":"openai/gpt-oss-20b","reasoning":"simple"}"#);
        mock.add_error(switchboard_llm::Error::Network("connection reset".to_string()));

        let result = chat(
            State(state),
            Json(ChatRequest {
                message: "hello".to_string(),
            }),
        )
        .await;

        let (status, Json(body)) = result.expect_err("dispatch failure should surface");
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.success);
        assert!(body.error.unwrap().contains("try again"));
    }

    #[test]
    fn test_legacy_shape_serialization() {
        let legacy = LegacyChatResponse {
            message: "Model: m\n\nReply: r".to_string(),
        };
        let json = serde_json::to_value(&legacy).unwrap();
        assert_eq!(json["message"], "Model: m\n\nReply: r");
    }
}
