//! Client error types

use reqwest::StatusCode;
use thiserror::Error;

/// Remote call failure
///
/// Transport errors, non-2xx statuses and undecodable bodies all collapse into
/// this one kind. Only the message is kept; callers display it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NetworkError {
    message: String,
}

impl NetworkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// `{action}: {error}` for transport and decode failures
    pub fn transport(action: &str, error: impl std::fmt::Display) -> Self {
        Self::new(format!("{action}: {error}"))
    }

    /// `{action}: HTTP {status}` with a short body preview when one exists
    pub fn status(action: &str, status: StatusCode, body: &[u8]) -> Self {
        let preview = body_preview(body);
        if preview.is_empty() {
            Self::new(format!("{action}: HTTP {status}"))
        } else {
            Self::new(format!("{action}: HTTP {status}: {preview}"))
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, NetworkError>;

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
