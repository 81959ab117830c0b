//! Unverified claims decoded from a credential.
//!
//! The auth service issues JWTs whose payload carries the account id
//! (`sub`), its role and an expiry. The client reads that payload to decide
//! what to show. It never checks the signature: the decoded role is a
//! display hint, and every protected call is authorized again by the API.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::credential::Credential;
use crate::error::DecodeError;
use crate::role::Role;

/// Claims extracted from a credential without verifying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account identifier (the `sub` claim).
    pub subject: String,
    /// Role the account was issued with.
    pub role: Role,
    /// When the credential stops being accepted, if it says. Informational
    /// only: expiry is detected by the API rejecting a call.
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<JsonValue>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    exp: Option<JsonValue>,
}

/// Decodes a credential's payload into [`Claims`].
///
/// # Errors
///
/// Returns a [`DecodeError`] if the credential is not a three-segment token
/// with a base64url JSON payload carrying a non-empty `sub` and a known
/// `role`.
pub fn decode(credential: &Credential) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = credential.as_str().split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::Malformed {
            segments: segments.len(),
        });
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| DecodeError::InvalidEncoding {
            reason: e.to_string(),
        })?;

    let raw: RawClaims =
        serde_json::from_slice(&payload).map_err(|e| DecodeError::InvalidPayload {
            reason: e.to_string(),
        })?;

    let subject = match raw.sub {
        Some(JsonValue::String(s)) if !s.trim().is_empty() => s,
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => return Err(DecodeError::MissingClaim { claim: "sub" }),
    };

    let role = raw
        .role
        .ok_or(DecodeError::MissingClaim { claim: "role" })?
        .parse::<Role>()
        .map_err(|e| DecodeError::UnknownRole { role: e.0 })?;

    let expires_at = match raw.exp {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::Number(n)) => {
            let seconds = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| DecodeError::InvalidPayload {
                    reason: format!("exp is not a timestamp: {n}"),
                })?;
            Some(
                DateTime::<Utc>::from_timestamp(seconds, 0)
                    .ok_or(DecodeError::InvalidExpiry { value: seconds })?,
            )
        }
        Some(other) => {
            return Err(DecodeError::InvalidPayload {
                reason: format!("exp is not a timestamp: {other}"),
            });
        }
    };

    Ok(Claims {
        subject,
        role,
        expires_at,
    })
}
