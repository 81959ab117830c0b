//! Error types for server functions and auth routes.
//!
//! Each variant keeps the internal detail for logging; `into_server_error`
//! turns it into a user-safe `ServerFnError`.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Failures that stop a page from being served at all.
#[derive(Debug)]
pub enum PageError {
    /// Server state was not provided to the request.
    MissingState,
    /// The request could not be read.
    RequestUnreadable { details: String },
    /// A clinic service call needed to render the page failed.
    ServiceUnavailable { details: String },
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingState => write!(f, "application state missing from request context"),
            Self::RequestUnreadable { details } => write!(f, "failed to read request: {details}"),
            Self::ServiceUnavailable { details } => {
                write!(f, "clinic service unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for PageError {}

impl PageError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        match &self {
            PageError::MissingState | PageError::RequestUnreadable { .. } => {
                ServerFnError::new("The portal is unavailable. Please try again.")
            }
            PageError::ServiceUnavailable { .. } => {
                ServerFnError::new("The clinic service is unavailable.")
            }
        }
    }
}

/// Login form failures.
#[derive(Debug)]
pub enum LoginError {
    /// Email or password was blank.
    MissingField { field: &'static str },
    /// The auth service refused or could not be reached.
    Rejected { details: String },
    /// The auth service answered without a usable token.
    NoToken,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "login form missing {field}"),
            Self::Rejected { details } => write!(f, "login rejected: {details}"),
            Self::NoToken => write!(f, "auth service returned an empty token"),
        }
    }
}

impl std::error::Error for LoginError {}
