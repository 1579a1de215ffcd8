//! Static model catalog
//!
//! The catalog is the fixed set of downstream models the router may pick
//! from, together with the static performance metadata reported back to the
//! UI. It is defined at process start, read-only, and deliberately small
//! enough to enumerate inside a single classification prompt.

use serde::{Deserialize, Serialize};

/// A routable downstream model and its static metadata
#[derive(Debug, Clone, Copy)]
pub struct ModelCatalogEntry {
    /// Provider-qualified model id (OpenRouter style, e.g. `openai/gpt-5-mini`)
    pub id: &'static str,
    /// One-paragraph strengths/limitations blurb embedded in the routing prompt
    pub description: &'static str,
    /// Relative throughput class
    pub throughput: &'static str,
    /// Typical time to first token
    pub time_to_first_token: &'static str,
    /// Typical decode speed
    pub tokens_per_second: &'static str,
    /// Blended price per million tokens
    pub cost: &'static str,
}

/// Default model: the cheapest catalog entry, used for simple queries and
/// for every routing fallback path.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";

/// The one catalog model known to leak reasoning-channel artifacts into its
/// final text. Replies from this model go through the sanitizer.
pub const ARTIFACT_PRONE_MODEL: &str = "openai/gpt-oss-20b";

/// Model the routing rules prefer for coding-intent messages.
pub const CODING_MODEL: &str = "openai/gpt-5-mini";

/// Model the routing rules prefer for complex-reasoning messages.
pub const REASONING_MODEL: &str = "anthropic/claude-sonnet-4";

/// Model used for the routing classification call. Smaller and cheaper than
/// any routing destination; never a destination itself.
pub const CLASSIFIER_MODEL: &str = "meta-llama/llama-3.2-3b-instruct";

/// The routable model set
pub const CATALOG: &[ModelCatalogEntry] = &[
    ModelCatalogEntry {
        id: "openai/gpt-oss-20b",
        description: "Open-weight 20B model. Very fast and nearly free; good for greetings, \
                      small talk, and short factual answers. Weak on multi-step reasoning.",
        throughput: "Very High",
        time_to_first_token: "~0.2s",
        tokens_per_second: "~1000 t/s",
        cost: "$0.10/M tokens",
    },
    ModelCatalogEntry {
        id: "openai/gpt-5-mini",
        description: "Strong general coder. Best choice for writing, reviewing, debugging, or \
                      explaining code and for structured technical output.",
        throughput: "High",
        time_to_first_token: "~0.5s",
        tokens_per_second: "~180 t/s",
        cost: "$0.45/M tokens",
    },
    ModelCatalogEntry {
        id: "anthropic/claude-sonnet-4",
        description: "Deep reasoner. Best for multi-step analysis, planning, and long-form \
                      explanations. Slowest and most expensive of the set.",
        throughput: "Medium",
        time_to_first_token: "~1.1s",
        tokens_per_second: "~75 t/s",
        cost: "$3.00/M tokens",
    },
];

/// Look up a catalog entry by model id
#[must_use]
pub fn get(id: &str) -> Option<&'static ModelCatalogEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}

/// Whether a model id is part of the catalog
#[must_use]
pub fn is_known(id: &str) -> bool {
    get(id).is_some()
}

/// Per-turn performance metadata: static catalog fields merged with the
/// measured request latency. Field names follow the UI wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    /// Relative throughput class
    pub throughput: String,
    /// Typical time to first token
    pub time_to_first_token: String,
    /// Typical decode speed
    pub tokens_per_second: String,
    /// Blended price per million tokens
    pub cost: String,
    /// Measured wall-clock latency for this turn. A proxy for time to first
    /// token — the completion call is non-streaming.
    pub actual_time_to_first_token: String,
}

/// Build the performance snapshot for a model and a measured latency.
///
/// Unknown model ids get `"N/A"` for every static field; the measured
/// latency is reported either way.
#[must_use]
pub fn performance_for(id: &str, elapsed_ms: u64) -> PerformanceSnapshot {
    let actual = format!("{elapsed_ms}ms");
    match get(id) {
        Some(entry) => PerformanceSnapshot {
            throughput: entry.throughput.to_string(),
            time_to_first_token: entry.time_to_first_token.to_string(),
            tokens_per_second: entry.tokens_per_second.to_string(),
            cost: entry.cost.to_string(),
            actual_time_to_first_token: actual,
        },
        None => PerformanceSnapshot {
            throughput: "N/A".to_string(),
            time_to_first_token: "N/A".to_string(),
            tokens_per_second: "N/A".to_string(),
            cost: "N/A".to_string(),
            actual_time_to_first_token: actual,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_has_three_unique_entries() {
        assert_eq!(CATALOG.len(), 3);
        let ids: HashSet<&str> = CATALOG.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_special_models_are_catalog_members() {
        assert!(is_known(DEFAULT_MODEL));
        assert!(is_known(ARTIFACT_PRONE_MODEL));
        assert!(is_known(CODING_MODEL));
        assert!(is_known(REASONING_MODEL));
    }

    #[test]
    fn test_classifier_is_not_a_destination() {
        assert!(!is_known(CLASSIFIER_MODEL));
    }

    #[test]
    fn test_performance_for_known_model() {
        let perf = performance_for(DEFAULT_MODEL, 842);
        assert_eq!(perf.cost, "$0.10/M tokens");
        assert_eq!(perf.actual_time_to_first_token, "842ms");
    }

    #[test]
    fn test_performance_for_unknown_model_reports_na() {
        let perf = performance_for("made-up/model", 12);
        assert_eq!(perf.throughput, "N/A");
        assert_eq!(perf.time_to_first_token, "N/A");
        assert_eq!(perf.tokens_per_second, "N/A");
        assert_eq!(perf.cost, "N/A");
        assert_eq!(perf.actual_time_to_first_token, "12ms");
    }

    #[test]
    fn test_snapshot_wire_names_are_camel_case() {
        let perf = performance_for(DEFAULT_MODEL, 5);
        let json = serde_json::to_value(&perf).unwrap();
        assert!(json.get("timeToFirstToken").is_some());
        assert!(json.get("tokensPerSecond").is_some());
        assert!(json.get("actualTimeToFirstToken").is_some());
    }
}
