//! HTTP client for the clinic services.
//!
//! The clinic backend is split in two: an app service (doctor directory,
//! booking, patient profile, slot updates) and an auth service (login,
//! registration). [`ClinicApi`] is the seam the web layer calls through;
//! [`HttpGateway`] is the reqwest implementation.
//!
//! Every protected call takes the caller's [`Credential`] explicitly and
//! sends it as a bearer token. The gateway keeps no session state.
//!
//! [`Credential`]: clinic_session::Credential

mod api;
mod client;
mod config;
mod dto;
mod error;

pub use api::ClinicApi;
pub use client::HttpGateway;
pub use config::GatewayConfig;
pub use dto::{
    BookingConfirmation, LoginRequest, Profile, RegisterRequest, SlotsUpdate, SlotsUpdated,
    TokenResponse,
};
pub use error::RemoteError;
