//! Models API endpoint
//!
//! GET /api/v1/models - List the routable model catalog

use axum::{routing::get, Json, Router};
use serde::Serialize;

use super::ApiResponse;
use switchboard_llm::catalog;

/// Catalog entry for API response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Provider-qualified model id
    pub id: String,
    /// Strengths/limitations blurb
    pub description: String,
    /// Relative throughput class
    pub throughput: String,
    /// Typical time to first token
    pub time_to_first_token: String,
    /// Typical decode speed
    pub tokens_per_second: String,
    /// Blended price per million tokens
    pub cost: String,
    /// Whether routing falls back to this model
    pub default: bool,
}

/// List the routable models
async fn list_models() -> Json<ApiResponse<Vec<ModelInfo>>> {
    let models = catalog::CATALOG
        .iter()
        .map(|entry| ModelInfo {
            id: entry.id.to_string(),
            description: entry.description.to_string(),
            throughput: entry.throughput.to_string(),
            time_to_first_token: entry.time_to_first_token.to_string(),
            tokens_per_second: entry.tokens_per_second.to_string(),
            cost: entry.cost.to_string(),
            default: entry.id == catalog::DEFAULT_MODEL,
        })
        .collect();

    Json(ApiResponse::success(models))
}

/// Create model routes
pub fn models_routes() -> Router {
    Router::new().route("/api/v1/models", get(list_models))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_models_matches_catalog() {
        let Json(response) = list_models().await;
        assert!(response.success);

        let models = response.data.unwrap();
        assert_eq!(models.len(), catalog::CATALOG.len());
        assert_eq!(models.iter().filter(|m| m.default).count(), 1);
    }
}
