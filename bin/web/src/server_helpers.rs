//! Helpers shared by server functions.
//!
//! Every server function works against a [`RequestSession`]: the session
//! context for this request's credential cookie. Cookie changes made through
//! it (sign-in, expiry) are written to the response when it is dropped.

use crate::config::CookieConfig;
use crate::cookies::CookieCredentialStore;
use crate::error::PageError;
use crate::types::{ActionOutcome, Loaded};
use axum::http::{HeaderValue, header::SET_COOKIE};
use axum_extra::extract::CookieJar;
use clinic_gateway::{ClinicApi, RemoteError};
use clinic_session::{Access, SessionContext, View};
use leptos::prelude::*;
use leptos_axum::ResponseOptions;
use rootcause::prelude::Report;
use std::ops::Deref;
use std::sync::Arc;

/// State shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn ClinicApi>,
    pub cookie: CookieConfig,
}

impl AppState {
    pub fn new(gateway: Arc<dyn ClinicApi>, cookie: CookieConfig) -> Self {
        Self { gateway, cookie }
    }
}

/// The session context of one request.
pub struct RequestSession {
    context: SessionContext<CookieCredentialStore>,
    response: Option<ResponseOptions>,
}

impl RequestSession {
    pub fn new(context: SessionContext<CookieCredentialStore>, response: Option<ResponseOptions>) -> Self {
        Self { context, response }
    }

    /// Drains the queued cookie changes as `Set-Cookie` header values.
    fn set_cookie_headers(&self) -> Vec<HeaderValue> {
        self.context
            .store()
            .take_pending()
            .into_iter()
            .filter_map(|cookie| match HeaderValue::from_str(&cookie.to_string()) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::error!(error = %e, "Credential cookie is not a valid header value");
                    None
                }
            })
            .collect()
    }
}

impl Deref for RequestSession {
    type Target = SessionContext<CookieCredentialStore>;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

impl Drop for RequestSession {
    fn drop(&mut self) {
        let headers = self.set_cookie_headers();
        let Some(response) = &self.response else {
            return;
        };
        for value in headers {
            response.append_header(SET_COOKIE, value);
        }
    }
}

/// Gets the shared state from the request context.
pub fn app_state() -> Result<AppState, PageError> {
    use_context::<AppState>().ok_or(PageError::MissingState)
}

/// Opens the session context for the current request.
pub async fn request_session() -> Result<(RequestSession, AppState), PageError> {
    let state = app_state()?;
    let jar = leptos_axum::extract::<CookieJar>().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to extract cookie jar");
        PageError::RequestUnreadable {
            details: e.to_string(),
        }
    })?;

    let store = CookieCredentialStore::from_jar(&jar, state.cookie.clone());
    let session = RequestSession::new(SessionContext::new(store), use_context::<ResponseOptions>());
    Ok((session, state))
}

/// Why a page or action could not go ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The credential is gone or was rejected; the user must sign in.
    SignIn,
    /// Show this text in place of the result.
    Message(String),
}

impl<T> From<Failure> for Loaded<T> {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::SignIn => Loaded::SignIn,
            Failure::Message(message) => Loaded::Unavailable { message },
        }
    }
}

impl From<Failure> for ActionOutcome {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::SignIn => ActionOutcome::SignIn,
            Failure::Message(message) => ActionOutcome::Failed { message },
        }
    }
}

/// Checks `view` against the request's session.
///
/// A missing sign-in clears the credential cookie (see
/// [`SessionContext::enter`]).
pub fn admit(session: &RequestSession, view: View) -> Result<(), Failure> {
    match session.enter(view) {
        Access::Allow => Ok(()),
        Access::RedirectToLogin => {
            tracing::debug!(view = ?view, "Sign-in required");
            Err(Failure::SignIn)
        }
        Access::Deny | Access::Hidden => {
            tracing::debug!(view = ?view, "View denied for role");
            Err(Failure::Message(denied_message(view).to_string()))
        }
    }
}

fn denied_message(view: View) -> &'static str {
    match view {
        View::Book => "Only patients can book appointments.",
        View::MyInfo => "Only patients can access this page.",
        View::UpdateSlots => "Only doctors can update slots.",
        View::Register => "You are already signed in.",
        View::Home | View::Doctors | View::Login | View::Logout => "This page is not available.",
    }
}

/// Turns a failed protected call into what the page should do.
///
/// A `401` expires the session; anything else keeps it and shows the
/// server's detail, or `fallback`.
pub fn protected_failure(
    session: &RequestSession,
    report: &Report<RemoteError>,
    fallback: &str,
) -> Failure {
    let error = report.current_context();
    if error.is_unauthorized() {
        session.expire();
        return Failure::SignIn;
    }
    tracing::warn!(error = %report, "Clinic service call failed");
    Failure::Message(error.display_message(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Cookie;
    use clinic_session::{CREDENTIAL_KEY, CredentialStore};

    // {"sub": "3", "role": "patient"}
    const PATIENT_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIzIiwicm9sZSI6InBhdGllbnQifQ.c2ln";

    fn session_with_cookie(value: &str) -> RequestSession {
        let jar = CookieJar::new().add(Cookie::new(CREDENTIAL_KEY, value.to_string()));
        let store = CookieCredentialStore::from_jar(&jar, CookieConfig::default());
        RequestSession::new(SessionContext::new(store), None)
    }

    #[test]
    fn unauthorized_expires_the_session() {
        let session = session_with_cookie("T");
        let report: Report<RemoteError> = RemoteError::Unauthorized { detail: None }.into();

        assert_eq!(protected_failure(&session, &report, "fallback"), Failure::SignIn);
        assert!(session.store().load().is_none());
    }

    #[test]
    fn expiry_queues_a_removal_header() {
        let session = session_with_cookie(PATIENT_TOKEN);
        let report: Report<RemoteError> = RemoteError::Unauthorized { detail: None }.into();
        protected_failure(&session, &report, "fallback");

        let headers = session.set_cookie_headers();
        assert_eq!(headers.len(), 1);
        let header = headers[0].to_str().expect("ascii header");
        assert!(header.starts_with(&format!("{CREDENTIAL_KEY}=;")), "{header}");
        assert!(header.contains("Max-Age=0"), "{header}");
        assert!(session.set_cookie_headers().is_empty());
    }

    #[test]
    fn redirect_to_login_queues_a_removal_header() {
        let session = session_with_cookie("stale.garbage");
        assert_eq!(admit(&session, View::Book), Err(Failure::SignIn));
        assert_eq!(session.set_cookie_headers().len(), 1);
    }

    #[test]
    fn other_failures_keep_the_session() {
        let session = session_with_cookie("T");
        let report: Report<RemoteError> = RemoteError::Rejected {
            status: 400,
            detail: Some("Slot already booked".to_string()),
        }
        .into();

        assert_eq!(
            protected_failure(&session, &report, "Failed to book appointment."),
            Failure::Message("Slot already booked".to_string())
        );
        assert!(session.store().load().is_some());
    }

    #[test]
    fn anonymous_visit_to_protected_view_asks_for_sign_in() {
        let session = session_with_cookie("garbage");
        assert_eq!(admit(&session, View::MyInfo), Err(Failure::SignIn));
        assert!(session.store().load().is_none());
    }

    #[test]
    fn signed_in_users_cannot_register() {
        let session = session_with_cookie(PATIENT_TOKEN);
        assert_eq!(
            admit(&session, View::Register),
            Err(Failure::Message("You are already signed in.".to_string()))
        );
        assert!(session.store().load().is_some());

        let anonymous = session_with_cookie("garbage");
        assert_eq!(admit(&anonymous, View::Register), Ok(()));
    }

    #[test]
    fn failure_maps_to_outcomes() {
        let loaded: Loaded<()> = Failure::Message("nope".to_string()).into();
        assert_eq!(
            loaded,
            Loaded::Unavailable {
                message: "nope".to_string()
            }
        );
        assert_eq!(ActionOutcome::from(Failure::SignIn), ActionOutcome::SignIn);
    }
}
