//! reqwest implementation of [`ClinicApi`].

use async_trait::async_trait;
use clinic_core::{Doctor, DoctorId, Patient, Result};
use clinic_session::Credential;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::api::ClinicApi;
use crate::config::GatewayConfig;
use crate::dto::{
    BookingConfirmation, LoginRequest, RegisterRequest, SlotsUpdate, SlotsUpdated, TokenResponse,
};
use crate::error::RemoteError;

/// Talks to the clinic services over HTTP.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    /// Builds a gateway for the configured services.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, RemoteError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RemoteError::Transport {
                reason: e.to_string(),
            })?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, RemoteError> {
        let response = request.send().await.map_err(|e| RemoteError::Transport {
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = RemoteError::from_response(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %error, "Clinic service rejected request");
            return Err(error.into());
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::InvalidResponse {
                reason: e.to_string(),
            })?;
        Ok(parsed)
    }
}

#[async_trait]
impl ClinicApi for HttpGateway {
    #[instrument(skip(self))]
    async fn list_doctors(&self) -> Result<Vec<Doctor>, RemoteError> {
        let doctors: Vec<Doctor> = self
            .send(self.http.get(self.config.app_url("/doctors")))
            .await?;
        debug!(count = doctors.len(), "Loaded doctor directory");
        Ok(doctors)
    }

    #[instrument(skip(self))]
    async fn list_specializations(&self) -> Result<Vec<String>, RemoteError> {
        self.send(self.http.get(self.config.app_url("/doctor/specializations")))
            .await
    }

    #[instrument(skip(self))]
    async fn search_doctors(
        &self,
        specialization: &str,
        name: &str,
    ) -> Result<Vec<Doctor>, RemoteError> {
        let query: Vec<(&str, &str)> = [("specialization", specialization.trim()), ("name", name.trim())]
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .collect();

        self.send(
            self.http
                .get(self.config.app_url("/doctor/search"))
                .query(&query),
        )
        .await
    }

    #[instrument(skip(self, credential), fields(doctor_id = %doctor_id))]
    async fn book(
        &self,
        credential: &Credential,
        doctor_id: DoctorId,
        time: &str,
    ) -> Result<BookingConfirmation, RemoteError> {
        let doctor_id = doctor_id.to_string();
        self.send(
            self.http
                .post(self.config.app_url("/book"))
                .header(AUTHORIZATION, credential.bearer())
                .query(&[("doctor_id", doctor_id.as_str()), ("time", time)]),
        )
        .await
    }

    #[instrument(skip(self, credential))]
    async fn patient(&self, credential: &Credential) -> Result<Patient, RemoteError> {
        self.send(
            self.http
                .get(self.config.app_url("/patient"))
                .header(AUTHORIZATION, credential.bearer()),
        )
        .await
    }

    #[instrument(skip(self, credential, slots), fields(count = slots.len()))]
    async fn update_slots(
        &self,
        credential: &Credential,
        slots: &[String],
    ) -> Result<SlotsUpdated, RemoteError> {
        let body = SlotsUpdate {
            available_slots: slots.to_vec(),
        };
        self.send(
            self.http
                .put(self.config.app_url("/doctor/slots/update"))
                .header(AUTHORIZATION, credential.bearer())
                .json(&body),
        )
        .await
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, RemoteError> {
        self.send(self.http.post(self.config.auth_url("/login")).json(request))
            .await
    }

    #[instrument(skip(self, request), fields(email = %request.email, role = %request.role))]
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<TokenResponse, RemoteError> {
        self.send(self.http.post(self.config.auth_url("/register")).json(request))
            .await
    }
}
