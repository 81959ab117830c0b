//! Core domain types and utilities for the clinic portal.
//!
//! This crate provides the records exchanged with the clinic API
//! (doctors and patients), their identifiers, and the shared `Result`
//! alias used by the other workspace crates.

pub mod error;
pub mod id;
pub mod model;

pub use error::Result;
pub use id::{DoctorId, ParseIdError, PatientId};
pub use model::{Doctor, Patient};
