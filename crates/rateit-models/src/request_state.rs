use serde::{Deserialize, Serialize};

/// Why a request ended without a payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The catalog answered but nothing matched. Changing the query is the fix.
    NotFound,
    /// Network, HTTP status or decoding failure. Retried on the next query change.
    Transport,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequestFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestFailure {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::NotFound, message: message.into() }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self { kind: FailureKind::Transport, message: message.into() }
    }
}

/// Lifecycle of one request stream (search results or movie detail).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(RequestFailure),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            RequestState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&RequestFailure> {
        match self {
            RequestState::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// User-facing error text, empty when the stream is not failed.
    pub fn error_message(&self) -> &str {
        self.failure().map(|f| f.message.as_str()).unwrap_or("")
    }
}
