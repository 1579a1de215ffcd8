//! The routing decision contract

use crate::catalog;
use serde::{Deserialize, Serialize};

/// Reasoning attached when the classifier call fails, returns nothing, or
/// omits the `reasoning` field.
pub const DEFAULT_REASONING: &str = "Default fallback model for simple queries";

/// Reasoning attached when the classifier returned content that could not
/// be parsed into a decision.
pub const PARSE_FAILURE_REASONING: &str = "Error in model selection, using default fallback";

/// The outcome of one routing classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Chosen downstream model id
    pub model: String,
    /// One-sentence justification from the classifier
    pub reasoning: String,
}

impl RoutingDecision {
    /// Default decision for an unavailable classifier (call failure or
    /// empty content)
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            model: catalog::DEFAULT_MODEL.to_string(),
            reasoning: DEFAULT_REASONING.to_string(),
        }
    }

    /// Default decision for classifier content that failed to parse
    #[must_use]
    pub fn parse_failure_fallback() -> Self {
        Self {
            model: catalog::DEFAULT_MODEL.to_string(),
            reasoning: PARSE_FAILURE_REASONING.to_string(),
        }
    }
}
