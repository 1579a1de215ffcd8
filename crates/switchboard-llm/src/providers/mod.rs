//! Concrete LLM provider implementations
//!
//! One provider today: the OpenRouter-compatible chat-completion gateway
//! every upstream call goes through.

pub mod openrouter;

pub use openrouter::{OpenRouterConfig, OpenRouterProvider};
