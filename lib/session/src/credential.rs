//! The opaque session credential and where it is kept.
//!
//! A credential is created by a successful login, kept by the client, and
//! sent as a bearer token on protected calls. Only [`SessionContext`]
//! writes to a store; everything else reads.
//!
//! [`SessionContext`]: crate::session::SessionContext

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Well-known key under which the client keeps its credential.
pub const CREDENTIAL_KEY: &str = "access_token";

/// An opaque bearer token issued by the auth service.
///
/// Never empty. `Debug` output is redacted so the token cannot leak into
/// logs through `{:?}`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token, returning `None` for an empty or blank value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.len() == token.len() {
            Some(Self(token))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `Authorization` header value for this credential.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Persistent holder of at most one credential.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored credential, if any.
    fn load(&self) -> Option<Credential>;

    /// Replaces the stored credential.
    fn store(&self, credential: Credential);

    /// Removes the stored credential. Clearing an empty store is a no-op.
    fn clear(&self);
}

impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    fn load(&self) -> Option<Credential> {
        (**self).load()
    }

    fn store(&self, credential: Credential) {
        (**self).store(credential);
    }

    fn clear(&self) {
        (**self).clear();
    }
}

/// In-process credential store.
///
/// Clones share the same slot, so a clear through one handle is seen by all.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<RwLock<Option<Credential>>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `credential`.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(credential))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, credential: Credential) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }

    fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
