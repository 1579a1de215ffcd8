//! Switchboard LLM - model routing and reply cleanup
//!
//! This crate provides the LLM pipeline for Switchboard:
//! - Catalog: the fixed set of routable downstream models
//! - Routing: LLM-based classification of each message to a catalog model
//! - Dispatch: the downstream completion call with latency measurement
//! - Sanitize: artifact cleanup for the one model that leaks scratch work
//! - OpenRouter: the multi-provider gateway every upstream call goes through

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod completion;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod provider;
pub mod providers;
pub mod routing;
pub mod sanitize;
pub mod session;
pub mod util;

pub use catalog::{ModelCatalogEntry, PerformanceSnapshot};
pub use completion::{CompletionRequest, CompletionResponse, ResponseFormat, TokenUsage};
pub use dispatch::{DispatchedReply, Dispatcher};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use provider::LlmProvider;
pub use providers::{OpenRouterConfig, OpenRouterProvider};
pub use routing::{MockProvider, RoutingDecision, RoutingPolicy};
pub use sanitize::ResponseSanitizer;
pub use session::{ChatMessage, ChatRole};
