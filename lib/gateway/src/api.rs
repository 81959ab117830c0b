//! The operations the portal needs from the clinic services.

use async_trait::async_trait;
use clinic_core::{Doctor, DoctorId, Patient, Result};
use clinic_session::Credential;

use crate::dto::{BookingConfirmation, LoginRequest, RegisterRequest, SlotsUpdated, TokenResponse};
use crate::error::RemoteError;

/// Calls against the clinic app and auth services.
///
/// Methods that act for a user take the [`Credential`] to send. A `401`
/// comes back as [`RemoteError::Unauthorized`]; clearing the session is the
/// caller's decision.
#[async_trait]
pub trait ClinicApi: Send + Sync {
    /// `GET /doctors`.
    async fn list_doctors(&self) -> Result<Vec<Doctor>, RemoteError>;

    /// `GET /doctor/specializations`.
    async fn list_specializations(&self) -> Result<Vec<String>, RemoteError>;

    /// `GET /doctor/search`. Blank filters are left out of the query.
    /// No match is [`RemoteError::NotFound`].
    async fn search_doctors(
        &self,
        specialization: &str,
        name: &str,
    ) -> Result<Vec<Doctor>, RemoteError>;

    /// `POST /book` for the signed-in patient.
    async fn book(
        &self,
        credential: &Credential,
        doctor_id: DoctorId,
        time: &str,
    ) -> Result<BookingConfirmation, RemoteError>;

    /// `GET /patient`: the signed-in patient's profile.
    async fn patient(&self, credential: &Credential) -> Result<Patient, RemoteError>;

    /// `PUT /doctor/slots/update`: replaces the signed-in doctor's slots.
    async fn update_slots(
        &self,
        credential: &Credential,
        slots: &[String],
    ) -> Result<SlotsUpdated, RemoteError>;

    /// `POST /login` on the auth service.
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, RemoteError>;

    /// `POST /register` on the auth service.
    async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<TokenResponse, RemoteError>;
}
