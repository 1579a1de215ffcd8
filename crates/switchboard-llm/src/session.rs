//! Chat session turn types
//!
//! One turn as the UI stores it. Turns are session-scoped and in-memory
//! only; nothing here is persisted.

use crate::catalog::PerformanceSnapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// A user turn
    User,
    /// An assistant turn
    Assistant,
}

/// One turn in a chat session.
///
/// An assistant turn carries `model` and `performance` together or not at
/// all — the constructors are the only way to build one.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Opaque unique id
    pub id: String,
    /// Turn role
    pub role: ChatRole,
    /// Turn text
    pub content: String,
    /// Model that answered (assistant turns with routing metadata)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Routing justification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Per-turn performance metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<PerformanceSnapshot>,
}

impl ChatMessage {
    /// A user turn
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: ChatRole::User,
            content: content.into(),
            model: None,
            reasoning: None,
            performance: None,
        }
    }

    /// A plain assistant turn (no routing metadata)
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: ChatRole::Assistant,
            content: content.into(),
            model: None,
            reasoning: None,
            performance: None,
        }
    }

    /// An assistant turn with full routing metadata
    #[must_use]
    pub fn assistant_routed(
        content: impl Into<String>,
        model: impl Into<String>,
        reasoning: impl Into<String>,
        performance: PerformanceSnapshot,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: ChatRole::Assistant,
            content: content.into(),
            model: Some(model.into()),
            reasoning: Some(reasoning.into()),
            performance: Some(performance),
        }
    }
}
