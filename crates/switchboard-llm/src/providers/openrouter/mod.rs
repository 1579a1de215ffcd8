//! OpenRouter provider
//!
//! OpenAI-compatible chat completions against the OpenRouter gateway.

mod provider;
mod types;

pub use provider::OpenRouterProvider;
pub use types::{OpenRouterConfig, BASE_URL, MODELS};
