//! Error types for the scheduling crate.
//!
//! - `ValidationError`: a selection or form is incomplete; shown inline and
//!   never sent to the API
//! - `FlowError`: a booking flow transition that is not allowed from the
//!   current state

use std::fmt;

/// Input that must be fixed by the user before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No doctor chosen.
    MissingDoctor,
    /// No time slot chosen.
    MissingTime,
    /// The doctor selection is not a doctor id.
    InvalidDoctor { value: String },
    /// A required form field is blank.
    MissingField { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDoctor | Self::MissingTime => {
                f.write_str("Please select both a doctor and a time slot.")
            }
            Self::InvalidDoctor { value } => write!(f, "'{value}' is not a valid doctor."),
            Self::MissingField { field } => write!(f, "Please fill in the {field} field."),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A booking flow transition that was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// A booking is already in flight.
    AlreadySubmitting,
    /// A result arrived while nothing was being submitted.
    NotSubmitting,
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySubmitting => f.write_str("a booking is already being submitted"),
            Self::NotSubmitting => f.write_str("no booking is being submitted"),
        }
    }
}

impl std::error::Error for FlowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_selection_messages_match() {
        assert_eq!(
            ValidationError::MissingDoctor.to_string(),
            ValidationError::MissingTime.to_string()
        );
        assert_eq!(
            ValidationError::MissingTime.to_string(),
            "Please select both a doctor and a time slot."
        );
    }

    #[test]
    fn missing_field_names_the_field() {
        let err = ValidationError::MissingField { field: "email" };
        assert!(err.to_string().contains("email"));
    }
}
