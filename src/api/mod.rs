//! Web API module for Switchboard
//!
//! Provides the chat endpoint (the boundary of the routing pipeline) and a
//! health check.

pub mod chat;
pub mod health;
pub mod models;

use axum::Router;
use serde::Serialize;

use crate::server::AppState;

pub use chat::chat_routes;
pub use health::health_routes;
pub use models::models_routes;

/// Standard API envelope for non-chat endpoints and errors
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<T> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Create the API router with all endpoints
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(chat_routes(state.clone()))
        .merge(models_routes())
        .merge(health_routes(state))
}
