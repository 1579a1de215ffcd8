//! Server bootstrap
//!
//! Resolves the LLM provider once at startup (a missing API key fails here,
//! not per request), assembles the request-scoped pipeline state, and runs
//! the axum server.

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use switchboard_llm::{Dispatcher, LlmProvider, OpenRouterProvider, RoutingPolicy};

use crate::api::chat::ResponseStyle;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Which outbound response shape the chat endpoint emits
    pub response_style: ResponseStyle,
}

/// Shared per-process state. The policy and dispatcher are stateless across
/// requests; everything request-scoped lives on the handler stack.
#[derive(Clone)]
pub struct AppState {
    /// Routing policy (classifier call)
    pub policy: Arc<RoutingPolicy>,
    /// Completion dispatcher (downstream call + cleanup)
    pub dispatcher: Arc<Dispatcher>,
    /// The shared upstream provider (health reporting)
    pub provider: Arc<dyn LlmProvider>,
    /// Outbound response shape
    pub response_style: ResponseStyle,
}

impl AppState {
    /// Build state around a provider. Both pipeline stages share the one
    /// provider instance.
    pub fn new(provider: Arc<dyn LlmProvider>, response_style: ResponseStyle) -> Self {
        Self {
            policy: Arc::new(RoutingPolicy::new(provider.clone())),
            dispatcher: Arc::new(Dispatcher::new(provider.clone())),
            provider,
            response_style,
        }
    }
}

/// Run the server
pub async fn run(config: ServerConfig) -> Result<()> {
    let provider = OpenRouterProvider::from_env().context("LLM provider configuration")?;
    info!(provider = provider.name(), "LLM provider resolved");

    let state = AppState::new(Arc::new(provider), config.response_style);

    let app = Router::new()
        .merge(crate::api::api_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
