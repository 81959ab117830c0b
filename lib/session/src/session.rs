//! Session derivation and the session context.
//!
//! A [`Session`] is recomputed from the stored credential every time it is
//! needed, so a credential cleared elsewhere (for example after the API
//! rejected it) is noticed on the next read instead of being cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::claims::{self, Claims};
use crate::credential::{Credential, CredentialStore};
use crate::policy::{self, Access, View};
use crate::role::Role;

/// Who the client is acting for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    /// No credential, or one that could not be decoded.
    Anonymous,
    /// A decodable credential is present.
    Authenticated {
        subject: String,
        role: Role,
        expires_at: Option<DateTime<Utc>>,
    },
}

impl Session {
    /// Derives the session for an optional credential.
    ///
    /// A credential that fails to decode yields [`Session::Anonymous`].
    #[must_use]
    pub fn from_credential(credential: Option<&Credential>) -> Self {
        let Some(credential) = credential else {
            return Self::Anonymous;
        };

        match claims::decode(credential) {
            Ok(claims) => Self::from(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Credential could not be decoded; treating as signed out");
                Self::Anonymous
            }
        }
    }

    /// Returns true for [`Session::Authenticated`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// Returns the claimed role, if signed in.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { role, .. } => Some(*role),
        }
    }

    /// Returns the account identifier, if signed in.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { subject, .. } => Some(subject),
        }
    }
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self::Authenticated {
            subject: claims.subject,
            role: claims.role,
            expires_at: claims.expires_at,
        }
    }
}

/// Owns the credential store for one client.
///
/// `login`, `logout` and `expire` are the only writers. Everything else
/// reads through `session`, `credential` and `enter`.
#[derive(Debug, Clone)]
pub struct SessionContext<S> {
    store: S,
}

impl<S: CredentialStore> SessionContext<S> {
    /// Wraps a credential store.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the stored credential, if any.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.store.load()
    }

    /// Derives the current session from the stored credential.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::from_credential(self.store.load().as_ref())
    }

    /// Stores a freshly issued credential and returns the session it grants.
    pub fn login(&self, credential: Credential) -> Session {
        let session = Session::from_credential(Some(&credential));
        self.store.store(credential);
        session
    }

    /// Forgets the credential at the user's request.
    pub fn logout(&self) {
        self.store.clear();
    }

    /// Forgets the credential after the API rejected it.
    pub fn expire(&self) {
        tracing::info!("Credential rejected by the API; clearing session");
        self.store.clear();
    }

    /// Checks `view` against the current session.
    ///
    /// When the view needs a sign-in that is not there, the store is
    /// cleared before [`Access::RedirectToLogin`] is returned, so an
    /// undecodable credential does not linger.
    pub fn enter(&self, view: View) -> Access {
        let access = policy::decide(&self.session(), view);
        if access == Access::RedirectToLogin {
            self.store.clear();
        }
        access
    }
}
