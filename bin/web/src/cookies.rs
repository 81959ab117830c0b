//! The credential cookie.
//!
//! The browser keeps the credential in an HTTP-only cookie named
//! [`CREDENTIAL_KEY`]. On the server each request gets its own
//! [`CookieCredentialStore`] seeded from the request cookie; writes are
//! queued as `Set-Cookie` values for the response.

use crate::config::CookieConfig;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use clinic_session::{CREDENTIAL_KEY, Credential, CredentialStore};
use std::sync::{Mutex, PoisonError, RwLock};
use time::Duration as TimeDuration;

/// Builds the cookie that carries `credential`.
pub fn credential_cookie(credential: &Credential, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((CREDENTIAL_KEY, credential.as_str().to_string()))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(config.max_age_minutes))
        .build()
}

/// Builds the cookie that removes the credential from the browser.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((CREDENTIAL_KEY, ""))
        .path("/")
        .max_age(TimeDuration::ZERO)
        .build()
}

/// Per-request credential store backed by the credential cookie.
pub struct CookieCredentialStore {
    current: RwLock<Option<Credential>>,
    had_cookie: bool,
    pending: Mutex<Vec<Cookie<'static>>>,
    config: CookieConfig,
}

impl CookieCredentialStore {
    /// Seeds the store from the request's cookies.
    pub fn from_jar(jar: &CookieJar, config: CookieConfig) -> Self {
        let cookie = jar.get(CREDENTIAL_KEY);
        Self {
            current: RwLock::new(cookie.and_then(|c| Credential::new(c.value()))),
            had_cookie: cookie.is_some(),
            pending: Mutex::new(Vec::new()),
            config,
        }
    }

    /// Drains the cookies the response must set.
    pub fn take_pending(&self) -> Vec<Cookie<'static>> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn queue(&self, cookie: Cookie<'static>) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cookie);
    }
}

impl CredentialStore for CookieCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, credential: Credential) {
        self.queue(credential_cookie(&credential, &self.config));
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }

    fn clear(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() || self.had_cookie {
            self.queue(removal_cookie());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jar_with(value: &str) -> CookieJar {
        CookieJar::new().add(Cookie::new(CREDENTIAL_KEY, value.to_string()))
    }

    #[test]
    fn credential_cookie_attributes() {
        let credential = Credential::new("abc").expect("non-empty");
        let cookie = credential_cookie(&credential, &CookieConfig::default());
        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(TimeDuration::minutes(60)));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
    }

    #[test]
    fn loads_request_cookie() {
        let store = CookieCredentialStore::from_jar(&jar_with("tok"), CookieConfig::default());
        assert_eq!(store.load().map(|c| c.as_str().to_string()), Some("tok".into()));
        assert!(store.take_pending().is_empty());
    }

    #[test]
    fn blank_cookie_is_no_credential_but_gets_removed() {
        let store = CookieCredentialStore::from_jar(&jar_with(" "), CookieConfig::default());
        assert!(store.load().is_none());
        store.clear();
        assert_eq!(store.take_pending().len(), 1);
    }

    #[test]
    fn clearing_without_cookie_sets_nothing() {
        let store = CookieCredentialStore::from_jar(&CookieJar::new(), CookieConfig::default());
        store.clear();
        assert!(store.take_pending().is_empty());
    }

    #[test]
    fn store_then_clear_queues_both() {
        let store = CookieCredentialStore::from_jar(&CookieJar::new(), CookieConfig::default());
        store.store(Credential::new("new").expect("non-empty"));
        assert!(store.load().is_some());
        store.clear();
        assert!(store.load().is_none());

        let pending = store.take_pending();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].value(), "new");
        assert_eq!(pending[1].value(), "");
    }
}
