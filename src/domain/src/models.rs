use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One persisted conversation turn. Immutable once created; owned by the
/// history store, which keeps at most the 20 most recent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl ConversationMessage {
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMode {
    Chat,
}

/// Wire payload for one generation call. Built fresh per call, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<RequestMode>,
}

impl GenerationRequest {
    /// Command-generation payload: the bare `{prompt}` shape.
    pub fn command(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            mode: None,
        }
    }

    /// Free-chat payload: the `{prompt, mode}` variant.
    pub fn chat(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            mode: Some(RequestMode::Chat),
        }
    }
}

/// Parsed result of one generation call. `command` is non-empty once the
/// sanitizer has accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiResponse {
    pub reasoning: String,
    pub command: String,
}

/// Outcome of one execution attempt. Returned to the caller rather than
/// thrown, so failures render without aborting the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: Option<String>,
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: Some(output.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            output: Some(String::new()),
            error: Some(error.into()),
        }
    }
}
