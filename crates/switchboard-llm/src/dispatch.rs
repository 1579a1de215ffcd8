//! Completion dispatch
//!
//! Once routing has committed to a model, the dispatcher makes the single
//! downstream completion call, measures its latency, and runs the reply
//! cleanup for the artifact-prone model. There is no retry and no fallback
//! to another model here — a failed call is the request's failure.

use crate::catalog::{self, PerformanceSnapshot};
use crate::completion::CompletionRequest;
use crate::error::Result;
use crate::message::Message;
use crate::provider::LlmProvider;
use crate::sanitize::ResponseSanitizer;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A dispatched completion: the reply plus its per-turn metadata
#[derive(Debug, Clone)]
pub struct DispatchedReply {
    /// Model that actually answered (always a catalog id)
    pub model: String,
    /// Reply text, cleaned where applicable; empty when the provider
    /// returned no content
    pub reply: String,
    /// Wall-clock latency of the completion call
    pub elapsed_ms: u64,
    /// Static catalog fields merged with the measured latency
    pub performance: PerformanceSnapshot,
}

/// Sends the routed message to its model and post-processes the reply
pub struct Dispatcher {
    provider: Arc<dyn LlmProvider>,
    sanitizer: ResponseSanitizer,
}

impl Dispatcher {
    /// Create a dispatcher with the default sanitizer table
    #[must_use]
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            sanitizer: ResponseSanitizer::default(),
        }
    }

    /// Replace the sanitizer table
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: ResponseSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Name of the backing provider
    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Dispatch a message to the chosen model.
    ///
    /// A model id outside the catalog is replaced by the default entry
    /// before the call — routing passes unrecognized classifier output
    /// through, and this is the existence check that backs it. The user
    /// message is the entire conversation; no history, no system prompt.
    #[instrument(skip(self, message), fields(model = %model))]
    pub async fn dispatch(&self, model: &str, message: &str) -> Result<DispatchedReply> {
        let model = match catalog::get(model) {
            Some(entry) => entry.id,
            None => {
                warn!(
                    requested = %model,
                    fallback = catalog::DEFAULT_MODEL,
                    "routed model is not in the catalog, substituting default"
                );
                catalog::DEFAULT_MODEL
            }
        };

        let request = CompletionRequest::new(model).with_message(Message::user(message));

        let start = Instant::now();
        let response = self.provider.complete(request).await?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let reply = self.postprocess(model, response.content);

        info!(model, elapsed_ms, reply_len = reply.len(), "completion dispatched");

        Ok(DispatchedReply {
            model: model.to_string(),
            reply,
            elapsed_ms,
            performance: catalog::performance_for(model, elapsed_ms),
        })
    }

    /// Reply cleanup, applied only to the artifact-prone model
    fn postprocess(&self, model: &str, raw: String) -> String {
        if model != catalog::ARTIFACT_PRONE_MODEL {
            return raw;
        }

        let mut reply = self.sanitizer.clean(&raw);
        if reply != raw {
            debug!("reply cleaned of artifact tokens");
        }

        if self.sanitizer.contains_artifacts(&reply) {
            if let Some(salvaged) = self.sanitizer.salvage(&reply) {
                info!("salvaged answer from leaked reasoning preamble");
                reply = salvaged;
            }
            if self.sanitizer.contains_artifacts(&reply) {
                warn!(model, "artifact tokens still present after cleaning");
            }
        }

        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::routing::MockProvider;

    fn dispatcher_with_mock() -> (Dispatcher, Arc<MockProvider>) {
        let mock = Arc::new(MockProvider::new());
        (Dispatcher::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_dispatch_returns_reply_and_metrics() {
        let (dispatcher, mock) = dispatcher_with_mock();
        mock.add_response("Paris is the capital of France.");

        let dispatched = dispatcher
            .dispatch("anthropic/claude-sonnet-4", "capital of France?")
            .await
            .unwrap();

        assert_eq!(dispatched.model, "anthropic/claude-sonnet-4");
        assert_eq!(dispatched.reply, "Paris is the capital of France.");
        assert_eq!(dispatched.performance.cost, "$3.00/M tokens");
        assert!(dispatched.performance.actual_time_to_first_token.ends_with("ms"));
    }

    #[tokio::test]
    async fn test_dispatch_substitutes_default_for_unknown_model() {
        let (dispatcher, mock) = dispatcher_with_mock();
        mock.add_response("This reply is long enough to keep.");

        let dispatched = dispatcher
            .dispatch("vendor/unknown-model", "hello")
            .await
            .unwrap();

        assert_eq!(dispatched.model, catalog::DEFAULT_MODEL);
        let request = mock.last_request().unwrap();
        assert_eq!(request.model, catalog::DEFAULT_MODEL);
        // Substitution happened before the call, so static fields resolve
        assert_ne!(dispatched.performance.cost, "N/A");
    }

    #[tokio::test]
    async fn test_dispatch_sends_single_user_message() {
        let (dispatcher, mock) = dispatcher_with_mock();
        mock.add_response("Sure, here is a haiku about rivers.");

        let _ = dispatcher
            .dispatch(catalog::REASONING_MODEL, "write a haiku")
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, "write a haiku");
        assert!(request.max_tokens.is_none());
        assert!(request.response_format.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_cleans_artifact_prone_model_only() {
        let raw = "assistantfinal The capital of France is Paris.";

        let (dispatcher, mock) = dispatcher_with_mock();
        mock.add_response(raw);
        let cleaned = dispatcher
            .dispatch(catalog::ARTIFACT_PRONE_MODEL, "capital?")
            .await
            .unwrap();
        assert_eq!(cleaned.reply, "The capital of France is Paris.");

        let (dispatcher, mock) = dispatcher_with_mock();
        mock.add_response(raw);
        let untouched = dispatcher
            .dispatch(catalog::CODING_MODEL, "capital?")
            .await
            .unwrap();
        assert_eq!(untouched.reply, raw);
    }

    #[tokio::test]
    async fn test_dispatch_salvages_leaked_preamble() {
        let (dispatcher, mock) = dispatcher_with_mock();
        mock.add_response("analysis the user wrote hello so answer: Hi there!");

        let dispatched = dispatcher
            .dispatch(catalog::ARTIFACT_PRONE_MODEL, "hello")
            .await
            .unwrap();

        assert_eq!(dispatched.reply, "Hi there!");
    }

    #[tokio::test]
    async fn test_dispatch_empty_content_is_not_an_error() {
        let (dispatcher, mock) = dispatcher_with_mock();
        mock.add_response("");

        let dispatched = dispatcher
            .dispatch(catalog::DEFAULT_MODEL, "hello")
            .await
            .unwrap();

        assert_eq!(dispatched.reply, "");
    }

    #[tokio::test]
    async fn test_dispatch_propagates_provider_failure() {
        let (dispatcher, mock) = dispatcher_with_mock();
        mock.add_error(Error::Api("upstream exploded".to_string()));

        let result = dispatcher.dispatch(catalog::DEFAULT_MODEL, "hello").await;

        assert!(matches!(result, Err(Error::Api(_))));
    }
}
