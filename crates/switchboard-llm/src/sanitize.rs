//! Reply cleanup for the artifact-prone model
//!
//! The default catalog model sometimes leaks reasoning-channel scratch work
//! into its final text ("analysis the user wrote ... so answer: ..."). This
//! module removes the known artifact tokens, and — when a reply still looks
//! contaminated — salvages the part after an answer marker.
//!
//! The artifact table is an empirically-grown list of pattern/replacement
//! pairs, kept as data so new leaks can be added without touching control
//! flow.

use regex::Regex;
use tracing::{info, warn};

/// A cleaned reply shorter than this is assumed to be an over-aggressive
/// strip, not a legitimate short answer.
pub const MIN_REPLY_LEN: usize = 10;

/// Default artifact pattern/replacement table.
///
/// Patterns are regexes applied case-insensitively to the whole reply; each
/// removes the matched span only, never the surrounding text.
pub const DEFAULT_ARTIFACT_PATTERNS: &[(&str, &str)] = &[
    (r"(?i)\banalysis\b", ""),
    (r"(?i)\bassistantfinal\b", ""),
    (r"(?i)\bthe user is asking\b", ""),
    (r"(?i)\bthe user wants\b", ""),
    (r"(?i)\bwe need to respond\b", ""),
    (r"(?i)\bso the answer:", ""),
    (r"(?i)\bjust answer:", ""),
    (r"(?i)\bshort\.", ""),
];

/// Substrings whose presence after cleaning marks a reply as still
/// contaminated. Lowercase; matched against the lowercased reply.
pub const DEFAULT_ARTIFACT_INDICATORS: &[&str] = &[
    "analysis",
    "assistantfinal",
    "user wrote",
    "user is asking",
    "answer:",
];

/// Answer-marker phrases for the salvage pass, in scan order.
pub const DEFAULT_ANSWER_MARKERS: &[&str] =
    &["The answer is", "Final answer:", "So answer:", "Answer:"];

/// One artifact removal rule
#[derive(Debug, Clone)]
struct ArtifactRule {
    pattern: Regex,
    replacement: String,
}

/// Best-effort reply cleaner for leaked training artifacts
#[derive(Debug, Clone)]
pub struct ResponseSanitizer {
    rules: Vec<ArtifactRule>,
    indicators: Vec<String>,
    markers: Vec<Regex>,
}

impl Default for ResponseSanitizer {
    fn default() -> Self {
        Self::with_patterns(
            DEFAULT_ARTIFACT_PATTERNS,
            DEFAULT_ARTIFACT_INDICATORS,
            DEFAULT_ANSWER_MARKERS,
        )
    }
}

impl ResponseSanitizer {
    /// Build a sanitizer from a pattern table.
    ///
    /// `patterns` are regex/replacement pairs; an invalid regex is skipped
    /// with a warning rather than failing the whole table. `markers` are
    /// plain phrases, matched case-insensitively.
    #[must_use]
    pub fn with_patterns(
        patterns: &[(&str, &str)],
        indicators: &[&str],
        markers: &[&str],
    ) -> Self {
        let rules = patterns
            .iter()
            .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
                Ok(re) => Some(ArtifactRule {
                    pattern: re,
                    replacement: (*replacement).to_string(),
                }),
                Err(e) => {
                    warn!(pattern, error = %e, "skipping invalid artifact pattern");
                    None
                }
            })
            .collect();

        let markers = markers
            .iter()
            .filter_map(|marker| Regex::new(&format!("(?i){}", regex::escape(marker))).ok())
            .collect();

        Self {
            rules,
            indicators: indicators.iter().map(|s| s.to_lowercase()).collect(),
            markers,
        }
    }

    /// Remove known artifact tokens from a raw reply.
    ///
    /// Pure and total: on empty input, or when cleaning would reduce the
    /// reply below [`MIN_REPLY_LEN`], the input comes back unchanged.
    #[must_use]
    pub fn clean(&self, raw: &str) -> String {
        if raw.is_empty() {
            return raw.to_string();
        }

        let cleaned = self.strip_artifacts(raw);

        if cleaned.chars().count() < MIN_REPLY_LEN {
            info!(
                raw_len = raw.len(),
                cleaned_len = cleaned.len(),
                "cleaning reduced reply below minimum length, keeping original"
            );
            return raw.to_string();
        }
        cleaned
    }

    /// Whether a reply still contains tell-tale artifact substrings
    #[must_use]
    pub fn contains_artifacts(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.indicators.iter().any(|needle| lower.contains(needle))
    }

    /// Salvage pass for replies still contaminated after [`clean`].
    ///
    /// Scans for the answer markers in order; at the first marker whose
    /// marker-to-end segment is longer than [`MIN_REPLY_LEN`], discards the
    /// preamble and the marker, re-applies artifact removal, and returns the
    /// remainder. Returns `None` when no marker yields a usable answer.
    ///
    /// [`clean`]: ResponseSanitizer::clean
    #[must_use]
    pub fn salvage(&self, text: &str) -> Option<String> {
        for marker in &self.markers {
            let Some(found) = marker.find(text) else {
                continue;
            };
            // Too short from the marker on means a bare trailing cue, not an answer.
            if text[found.start()..].chars().count() <= MIN_REPLY_LEN {
                continue;
            }
            let answer = self.strip_artifacts(&text[found.end()..]);
            if !answer.is_empty() {
                return Some(answer);
            }
        }
        None
    }

    /// Apply the rule table, collapse whitespace, and trim edge remnants
    fn strip_artifacts(&self, text: &str) -> String {
        let mut stripped = text.to_string();
        for rule in &self.rules {
            stripped = rule
                .pattern
                .replace_all(&stripped, rule.replacement.as_str())
                .into_owned();
        }
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        trim_edge_remnants(&collapsed).to_string()
    }
}

/// Trim punctuation remnants the removals leave at the edges.
///
/// Leading separators of any kind go; at the tail only connective
/// punctuation is dropped — terminal `.`, `!`, `?` belong to the answer.
fn trim_edge_remnants(text: &str) -> &str {
    let text = text.trim_start_matches(|c: char| {
        matches!(c, ',' | '.' | ':' | ';' | '!' | '?' | '-') || c.is_whitespace()
    });
    text.trim_end_matches(|c: char| matches!(c, ',' | ':' | ';' | '-') || c.is_whitespace())
}
