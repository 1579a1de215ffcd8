//! Health check endpoints
//!
//! - `/health` — simple "healthy" + version (for load balancers)
//! - `/health/detailed` — adds LLM provider info (no upstream call)

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::server::AppState;

/// Simple health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed health response
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub llm: LlmHealth,
}

/// LLM provider status (lightweight — no API call)
#[derive(Debug, Serialize)]
pub struct LlmHealth {
    pub provider: String,
    pub models_available: usize,
}

/// Simple health check (for load balancers)
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Detailed health check with provider info
async fn detailed_health_check(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    Json(DetailedHealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        llm: LlmHealth {
            provider: state.provider.name().to_string(),
            models_available: state.provider.available_models().len(),
        },
    })
}

/// Create health routes
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/detailed", get(detailed_health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::chat::ResponseStyle;
    use std::sync::Arc;
    use switchboard_llm::MockProvider;

    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_detailed_health_reports_provider() {
        let state = AppState::new(Arc::new(MockProvider::new()), ResponseStyle::Structured);
        let Json(response) = detailed_health_check(State(state)).await;
        assert_eq!(response.llm.provider, "mock");
        assert_eq!(response.llm.models_available, 1);
    }
}
