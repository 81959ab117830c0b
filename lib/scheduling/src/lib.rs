//! Appointment slot rules for the clinic portal.
//!
//! This crate provides:
//!
//! - **Slot Set Editor**: the candidate time grid and the ordered,
//!   duplicate-free set of slots a doctor publishes
//! - **Booking Selector**: looking up a doctor's open slots, validating a
//!   selection, and the booking flow state machine
//!
//! Nothing here talks to the network. Callers pass the results of remote
//! calls in and read the next state out.

pub mod booking;
pub mod error;
pub mod slots;

pub use booking::{BookingFlow, BookingRequest, slots_for, validate};
pub use error::{FlowError, ValidationError};
pub use slots::{SlotSet, generate_candidates};
