//! Error types for the session crate.
//!
//! - `DecodeError`: a credential could not be parsed into claims. Callers
//!   treat it as "not signed in"; it is never shown as a failure page.

use std::fmt;

/// Errors from decoding a credential into claims.
///
/// Decoding is a structural parse only, so none of these say anything about
/// whether the credential is authentic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The token does not have the `header.payload.signature` shape.
    Malformed { segments: usize },
    /// The payload segment is not valid base64url.
    InvalidEncoding { reason: String },
    /// The payload is not the expected JSON object.
    InvalidPayload { reason: String },
    /// A required claim is missing or empty.
    MissingClaim { claim: &'static str },
    /// The role claim names a role the clinic does not know.
    UnknownRole { role: String },
    /// The expiry claim is not a representable timestamp.
    InvalidExpiry { value: i64 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { segments } => {
                write!(f, "malformed credential: expected 3 segments, found {segments}")
            }
            Self::InvalidEncoding { reason } => {
                write!(f, "credential payload is not base64url: {reason}")
            }
            Self::InvalidPayload { reason } => {
                write!(f, "credential payload is not valid claims: {reason}")
            }
            Self::MissingClaim { claim } => {
                write!(f, "missing required claim: {claim}")
            }
            Self::UnknownRole { role } => {
                write!(f, "unknown role claim: {role}")
            }
            Self::InvalidExpiry { value } => {
                write!(f, "invalid expiry claim: {value}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
