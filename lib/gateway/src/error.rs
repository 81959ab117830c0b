//! Remote call error types.

use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::fmt;

/// A failed call to the clinic services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// `401`: the credential is missing, expired or rejected.
    Unauthorized {
        /// Server-provided explanation, if any.
        detail: Option<String>,
    },
    /// `403`: the credential is valid but its role may not do this.
    Forbidden { detail: Option<String> },
    /// `404`.
    NotFound { detail: Option<String> },
    /// Any other non-success status.
    Rejected { status: u16, detail: Option<String> },
    /// The request never got a response.
    Transport { reason: String },
    /// The response body was not what the endpoint promises.
    InvalidResponse { reason: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: JsonValue,
}

impl RemoteError {
    /// Classifies a non-success response, pulling `detail` out of its body.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 => Self::Unauthorized { detail },
            403 => Self::Forbidden { detail },
            404 => Self::NotFound { detail },
            _ => Self::Rejected { status, detail },
        }
    }

    /// The server's `detail` text, if it sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail }
            | Self::Forbidden { detail }
            | Self::NotFound { detail }
            | Self::Rejected { detail, .. } => detail.as_deref(),
            Self::Transport { .. } | Self::InvalidResponse { .. } => None,
        }
    }

    /// Text to show the user: the server detail, else `fallback`.
    #[must_use]
    pub fn display_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    /// Returns true for a `401`.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

// `detail` is a string for handled errors and a list of `{msg, ...}` objects
// for request validation failures.
fn extract_detail(body: &str) -> Option<String> {
    let ErrorBody { detail } = serde_json::from_str(body).ok()?;
    match detail {
        JsonValue::String(text) if !text.trim().is_empty() => Some(text),
        JsonValue::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(JsonValue::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized { .. } => f.write_str("request was not authenticated")?,
            Self::Forbidden { .. } => f.write_str("request was not permitted for this role")?,
            Self::NotFound { .. } => f.write_str("resource not found")?,
            Self::Rejected { status, .. } => write!(f, "request rejected with status {status}")?,
            Self::Transport { reason } => return write!(f, "request failed: {reason}"),
            Self::InvalidResponse { reason } => {
                return write!(f, "unexpected response: {reason}");
            }
        }
        if let Some(detail) = self.detail() {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {}
