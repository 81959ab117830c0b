//! Request and response bodies of the clinic services.

use clinic_core::DoctorId;
use clinic_session::{Credential, Role};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A freshly issued credential.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// The issued token, if it is not blank.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        Credential::new(self.access_token.as_str())
    }
}

/// Role-specific profile sent with a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub profile: Profile,
}

impl RegisterRequest {
    /// A patient account; patients give a phone number.
    #[must_use]
    pub fn patient(email: String, password: String, name: String, phone: String) -> Self {
        Self {
            email,
            password,
            role: Role::Patient,
            profile: Profile {
                name,
                specialization: None,
                phone: Some(phone),
            },
        }
    }

    /// A doctor account; doctors give a specialization.
    #[must_use]
    pub fn doctor(email: String, password: String, name: String, specialization: String) -> Self {
        Self {
            email,
            password,
            role: Role::Doctor,
            profile: Profile {
                name,
                specialization: Some(specialization),
                phone: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub message: String,
}

/// Replace-all update of a doctor's published slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotsUpdate {
    pub available_slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlotsUpdated {
    pub message: String,
    pub doctor_id: DoctorId,
    #[serde(default)]
    pub available_slots: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn patient_registration_body() {
        let request = RegisterRequest::patient(
            "p@example.com".into(),
            "secret".into(),
            "Pat".into(),
            "555".into(),
        );
        assert_eq!(
            serde_json::to_value(&request).expect("serialize"),
            json!({
                "email": "p@example.com",
                "password": "secret",
                "role": "patient",
                "profile": {"name": "Pat", "phone": "555"}
            })
        );
    }

    #[test]
    fn doctor_registration_body() {
        let request = RegisterRequest::doctor(
            "d@example.com".into(),
            "secret".into(),
            "Dr Who".into(),
            "Cardiology".into(),
        );
        let body = serde_json::to_value(&request).expect("serialize");
        assert_eq!(body["role"], "doctor");
        assert_eq!(
            body["profile"],
            json!({"name": "Dr Who", "specialization": "Cardiology"})
        );
    }

    #[test]
    fn blank_token_yields_no_credential() {
        let response: TokenResponse =
            serde_json::from_value(json!({"access_token": "", "token_type": "bearer"}))
                .expect("deserialize");
        assert!(response.credential().is_none());
    }
}
