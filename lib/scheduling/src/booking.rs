//! Choosing a doctor and a slot, and tracking a booking attempt.

use clinic_core::{Doctor, DoctorId};
use serde::{Deserialize, Serialize};

use crate::error::{FlowError, ValidationError};

/// Returns the open slots of the doctor with `doctor_id`.
///
/// An unknown doctor (or an empty directory) yields no slots.
#[must_use]
pub fn slots_for(doctors: &[Doctor], doctor_id: DoctorId) -> &[String] {
    doctors
        .iter()
        .find(|doctor| doctor.id == doctor_id)
        .map(|doctor| doctor.available_slots.as_slice())
        .unwrap_or_default()
}

/// A complete booking selection.
///
/// Only [`validate`] builds one, so holding a `BookingRequest` means both
/// halves were chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    doctor_id: DoctorId,
    time: String,
}

impl BookingRequest {
    #[must_use]
    pub fn doctor_id(&self) -> DoctorId {
        self.doctor_id
    }

    #[must_use]
    pub fn time(&self) -> &str {
        &self.time
    }
}

/// Checks a doctor/slot selection as it comes out of the form controls.
///
/// # Errors
///
/// Returns a [`ValidationError`] if either selection is blank or the doctor
/// selection is not an id.
pub fn validate(doctor_id: &str, time: &str) -> Result<BookingRequest, ValidationError> {
    let doctor = doctor_id.trim();
    if doctor.is_empty() {
        return Err(ValidationError::MissingDoctor);
    }
    let time = time.trim();
    if time.is_empty() {
        return Err(ValidationError::MissingTime);
    }
    let doctor_id = doctor
        .parse::<DoctorId>()
        .map_err(|_| ValidationError::InvalidDoctor {
            value: doctor.to_string(),
        })?;

    Ok(BookingRequest {
        doctor_id,
        time: time.to_string(),
    })
}

/// Where a booking attempt stands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BookingFlow {
    #[default]
    Idle,
    /// A request is in flight; further submits are refused.
    Submitting,
    /// The API confirmed the booking.
    Success { message: String },
    /// The booking failed; `reason` is ready to show.
    Failed { reason: String },
}

impl BookingFlow {
    /// Starts submitting `request`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::AlreadySubmitting`] while another request is in
    /// flight.
    pub fn begin(&mut self, request: &BookingRequest) -> Result<(), FlowError> {
        if self.is_submitting() {
            return Err(FlowError::AlreadySubmitting);
        }
        tracing::debug!(
            doctor_id = %request.doctor_id(),
            time = %request.time(),
            "Submitting booking"
        );
        *self = Self::Submitting;
        Ok(())
    }

    /// Records the API's confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotSubmitting`] if no request is in flight.
    pub fn succeed(&mut self, message: impl Into<String>) -> Result<(), FlowError> {
        self.finish(Self::Success {
            message: message.into(),
        })
    }

    /// Records a failure with a displayable reason.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotSubmitting`] if no request is in flight.
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), FlowError> {
        self.finish(Self::Failed {
            reason: reason.into(),
        })
    }

    /// The user changed the selection; a finished attempt is dismissed.
    pub fn edit(&mut self) {
        if matches!(self, Self::Success { .. } | Self::Failed { .. }) {
            *self = Self::Idle;
        }
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// The success or failure text to show, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { message } => Some(message),
            Self::Failed { reason } => Some(reason),
            Self::Idle | Self::Submitting => None,
        }
    }

    fn finish(&mut self, next: Self) -> Result<(), FlowError> {
        if !self.is_submitting() {
            return Err(FlowError::NotSubmitting);
        }
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(id: i64, slots: &[&str]) -> Doctor {
        Doctor {
            id: DoctorId::new(id),
            name: format!("Dr {id}"),
            specialization: "Cardiology".to_string(),
            available_slots: slots.iter().map(ToString::to_string).collect(),
            daily_limit: 8,
            booked_slots: 0,
            user_id: None,
        }
    }

    #[test]
    fn slots_for_matching_doctor() {
        let doctors = [doctor(1, &["09:00"]), doctor(2, &["10:00", "10:30"])];
        assert_eq!(slots_for(&doctors, DoctorId::new(2)), ["10:00", "10:30"]);
    }

    #[test]
    fn slots_for_unknown_or_empty_is_empty() {
        assert!(slots_for(&[], DoctorId::new(1)).is_empty());
        let doctors = [doctor(1, &["09:00"])];
        assert!(slots_for(&doctors, DoctorId::new(9)).is_empty());
    }

    #[test]
    fn validate_requires_both() {
        assert_eq!(validate("", "09:00"), Err(ValidationError::MissingDoctor));
        assert_eq!(validate("3", " "), Err(ValidationError::MissingTime));
        assert_eq!(
            validate("abc", "09:00"),
            Err(ValidationError::InvalidDoctor {
                value: "abc".to_string()
            })
        );

        let request = validate(" 3 ", "09:00").expect("valid selection");
        assert_eq!(request.doctor_id(), DoctorId::new(3));
        assert_eq!(request.time(), "09:00");
    }

    #[test]
    fn flow_success_path() {
        let request = validate("1", "09:00").expect("valid selection");
        let mut flow = BookingFlow::default();

        flow.begin(&request).expect("idle flow can begin");
        assert!(flow.is_submitting());
        flow.succeed("Appointment booked").expect("in flight");
        assert_eq!(flow.message(), Some("Appointment booked"));

        flow.edit();
        assert_eq!(flow, BookingFlow::Idle);
    }

    #[test]
    fn flow_rejects_duplicate_submit() {
        let request = validate("1", "09:00").expect("valid selection");
        let mut flow = BookingFlow::default();

        flow.begin(&request).expect("idle flow can begin");
        assert_eq!(flow.begin(&request), Err(FlowError::AlreadySubmitting));
    }

    #[test]
    fn flow_failure_returns_to_idle_on_edit() {
        let request = validate("1", "09:00").expect("valid selection");
        let mut flow = BookingFlow::default();

        flow.begin(&request).expect("idle flow can begin");
        flow.fail("Slot already booked").expect("in flight");
        assert_eq!(
            flow,
            BookingFlow::Failed {
                reason: "Slot already booked".to_string()
            }
        );

        flow.edit();
        assert_eq!(flow, BookingFlow::Idle);
    }

    #[test]
    fn finished_flow_can_resubmit() {
        let request = validate("1", "09:00").expect("valid selection");
        let mut flow = BookingFlow::Failed {
            reason: "nope".to_string(),
        };
        assert!(flow.begin(&request).is_ok());
    }

    #[test]
    fn result_without_submit_is_refused() {
        let mut flow = BookingFlow::Idle;
        assert_eq!(flow.succeed("ok"), Err(FlowError::NotSubmitting));
        assert_eq!(flow.fail("no"), Err(FlowError::NotSubmitting));
    }

    #[test]
    fn edit_while_submitting_keeps_submitting() {
        let mut flow = BookingFlow::Submitting;
        flow.edit();
        assert!(flow.is_submitting());
    }
}
