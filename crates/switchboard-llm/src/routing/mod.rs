//! Routing Policy — LLM-based model selection
//!
//! A cheap classifier call maps each incoming message to one of the catalog
//! models. The classifier is reached through the [`LlmProvider`] trait so
//! the JSON-contract parsing and every fallback path stay testable without
//! a live provider.
//!
//! # Module Structure
//!
//! - `types`: The routing decision contract and fallback constants
//! - `policy`: Prompt construction, classifier invocation, parsing
//! - `mock`: Scripted provider for testing
//!
//! [`LlmProvider`]: crate::provider::LlmProvider

mod mock;
mod policy;
mod types;


pub use mock::MockProvider;
pub use policy::{RoutingPolicy, CLASSIFIER_MAX_TOKENS, CLASSIFIER_TEMPERATURE};
pub use types::{RoutingDecision, DEFAULT_REASONING, PARSE_FAILURE_REASONING};
