//! Sign-in and sign-out routes.
//!
//! Both are plain axum handlers so the credential cookie is set or removed
//! on a full page load and the header re-renders for the new session.

use crate::cookies::CookieCredentialStore;
use crate::error::LoginError;
use crate::server_helpers::AppState;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use clinic_gateway::{ClinicApi, LoginRequest};
use clinic_session::{CredentialStore, Session, SessionContext};
use serde::Deserialize;

/// Where a failed sign-in lands; the login page shows the error for it.
pub const LOGIN_FAILED_PATH: &str = "/login?failed=true";

/// Fields posted by the login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// Exchanges the posted credentials for a token and stores it.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let context = SessionContext::new(CookieCredentialStore::from_jar(&jar, state.cookie.clone()));

    let redirect = match sign_in(state.gateway.as_ref(), &context, form).await {
        Ok(session) => {
            tracing::info!(
                subject = session.subject().unwrap_or_default(),
                role = ?session.role(),
                "User signed in"
            );
            Redirect::to("/")
        }
        Err(e) => {
            tracing::warn!(error = %e, "Sign-in failed");
            Redirect::to(LOGIN_FAILED_PATH)
        }
    };

    let jar = context
        .store()
        .take_pending()
        .into_iter()
        .fold(jar, |jar, cookie| jar.add(cookie));
    (jar, redirect)
}

/// Forgets the credential and returns to the login page.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let context = SessionContext::new(CookieCredentialStore::from_jar(&jar, state.cookie.clone()));
    context.logout();
    tracing::info!("User signed out");

    let jar = context
        .store()
        .take_pending()
        .into_iter()
        .fold(jar, |jar, cookie| jar.add(cookie));
    (jar, Redirect::to("/login"))
}

async fn sign_in<S: CredentialStore>(
    gateway: &dyn ClinicApi,
    context: &SessionContext<S>,
    form: LoginForm,
) -> Result<Session, LoginError> {
    let email = form.email.trim();
    if email.is_empty() {
        return Err(LoginError::MissingField { field: "email" });
    }
    if form.password.is_empty() {
        return Err(LoginError::MissingField { field: "password" });
    }

    let token = gateway
        .login(&LoginRequest {
            email: email.to_string(),
            password: form.password,
        })
        .await
        .map_err(|e| LoginError::Rejected {
            details: e.to_string(),
        })?;

    let credential = token.credential().ok_or(LoginError::NoToken)?;
    Ok(context.login(credential))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clinic_core::{Doctor, DoctorId, Patient};
    use clinic_gateway::{
        BookingConfirmation, RegisterRequest, RemoteError, SlotsUpdated, TokenResponse,
    };
    use clinic_session::{MemoryCredentialStore, Role};
    use rootcause::prelude::Report;

    // Patient token for subject "3".
    const PATIENT_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIzIiwicm9sZSI6InBhdGllbnQifQ.c2ln";

    struct AuthOnly {
        token: Option<&'static str>,
    }

    #[async_trait]
    impl ClinicApi for AuthOnly {
        async fn list_doctors(&self) -> Result<Vec<Doctor>, Report<RemoteError>> {
            unimplemented!()
        }

        async fn list_specializations(&self) -> Result<Vec<String>, Report<RemoteError>> {
            unimplemented!()
        }

        async fn search_doctors(
            &self,
            _specialization: &str,
            _name: &str,
        ) -> Result<Vec<Doctor>, Report<RemoteError>> {
            unimplemented!()
        }

        async fn book(
            &self,
            _credential: &clinic_session::Credential,
            _doctor_id: DoctorId,
            _time: &str,
        ) -> Result<BookingConfirmation, Report<RemoteError>> {
            unimplemented!()
        }

        async fn patient(
            &self,
            _credential: &clinic_session::Credential,
        ) -> Result<Patient, Report<RemoteError>> {
            unimplemented!()
        }

        async fn update_slots(
            &self,
            _credential: &clinic_session::Credential,
            _slots: &[String],
        ) -> Result<SlotsUpdated, Report<RemoteError>> {
            unimplemented!()
        }

        async fn login(&self, _request: &LoginRequest) -> Result<TokenResponse, Report<RemoteError>> {
            match self.token {
                Some(token) => Ok(TokenResponse {
                    access_token: token.to_string(),
                    token_type: Some("bearer".to_string()),
                }),
                None => Err(RemoteError::Unauthorized {
                    detail: Some("Invalid credentials".to_string()),
                }
                .into()),
            }
        }

        async fn register(
            &self,
            _request: &RegisterRequest,
        ) -> Result<TokenResponse, Report<RemoteError>> {
            unimplemented!()
        }
    }

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn successful_sign_in_stores_credential() {
        let api = AuthOnly {
            token: Some(PATIENT_TOKEN),
        };
        let context = SessionContext::new(MemoryCredentialStore::new());

        let session = sign_in(&api, &context, form("p@x.io", "pw"))
            .await
            .expect("signed in");
        assert_eq!(session.role(), Some(Role::Patient));
        assert!(context.credential().is_some());
    }

    #[tokio::test]
    async fn rejected_sign_in_stores_nothing() {
        let api = AuthOnly { token: None };
        let context = SessionContext::new(MemoryCredentialStore::new());

        let err = sign_in(&api, &context, form("p@x.io", "wrong"))
            .await
            .expect_err("rejected");
        assert!(matches!(err, LoginError::Rejected { .. }));
        assert!(context.credential().is_none());
    }

    #[tokio::test]
    async fn blank_fields_never_reach_the_api() {
        let api = AuthOnly { token: None };
        let context = SessionContext::new(MemoryCredentialStore::new());

        let err = sign_in(&api, &context, form("  ", "pw"))
            .await
            .expect_err("blank email");
        assert!(matches!(err, LoginError::MissingField { field: "email" }));
    }

    #[tokio::test]
    async fn empty_token_is_refused() {
        let api = AuthOnly { token: Some("") };
        let context = SessionContext::new(MemoryCredentialStore::new());

        let err = sign_in(&api, &context, form("p@x.io", "pw"))
            .await
            .expect_err("empty token");
        assert!(matches!(err, LoginError::NoToken));
    }
}
