//! Error types for the homework watcher

use std::fmt;

/// Errors that can occur in the homework watcher
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Connection to {endpoint} failed (from_date={from_date}): {reason}")]
    Connection {
        endpoint: String,
        from_date: i64,
        reason: String,
    },

    #[error("Endpoint {endpoint} returned {status} {reason}")]
    StatusCode {
        endpoint: String,
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Unexpected response shape: {0}")]
    Shape(String),

    #[error("Homework is missing field `{0}`")]
    MissingField(&'static str),

    #[error("Unknown homework status: {0:?}")]
    UnknownStatus(String),

    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classification of per-cycle faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Network, timeout or malformed body from the status endpoint
    Transport,
    /// Non-success HTTP status from the status endpoint
    Protocol,
    /// Payload present but structurally or semantically invalid
    Shape,
    /// Notification channel failure; logged by the engine, never aborts a cycle
    Delivery,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::Transport => write!(f, "transport"),
            FaultKind::Protocol => write!(f, "protocol"),
            FaultKind::Shape => write!(f, "shape"),
            FaultKind::Delivery => write!(f, "delivery"),
        }
    }
}

impl WatchError {
    /// The fault kind of a per-cycle error, or `None` for startup errors
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            WatchError::Http(_) | WatchError::Connection { .. } => Some(FaultKind::Transport),
            WatchError::StatusCode { .. } => Some(FaultKind::Protocol),
            WatchError::Shape(_) | WatchError::MissingField(_) | WatchError::UnknownStatus(_) => {
                Some(FaultKind::Shape)
            }
            WatchError::Delivery(_) => Some(FaultKind::Delivery),
            WatchError::Config(_)
            | WatchError::MissingCredentials(_)
            | WatchError::Io(_)
            | WatchError::Json(_) => None,
        }
    }
}

/// Result type alias for watcher operations
pub type Result<T> = std::result::Result<T, WatchError>;
