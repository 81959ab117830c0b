//! Records returned by the clinic API.

use serde::{Deserialize, Serialize};

use crate::id::{DoctorId, PatientId};

/// A doctor as listed in the clinic directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
    /// Bookable time-of-day strings, in the order the API returned them.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub available_slots: Vec<String>,
    #[serde(default)]
    pub daily_limit: u32,
    #[serde(default)]
    pub booked_slots: u32,
    /// Account that owns this record, when the API exposes it.
    #[serde(
        default,
        deserialize_with = "optional_key",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
}

impl Doctor {
    /// Returns true if this record belongs to the given session subject.
    ///
    /// Only `user_id` is compared. The record id is an app-service key and
    /// says nothing about which account owns it.
    #[must_use]
    pub fn is_owned_by(&self, subject: &str) -> bool {
        self.user_id.as_deref() == Some(subject)
    }
}

/// The signed-in patient's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub patient_id: PatientId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

// The directory stores slots as a nullable JSON column.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

// Account keys arrive as JSON numbers from some services and strings from others.
fn optional_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Key {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Key>::deserialize(deserializer)?.map(|key| match key {
        Key::Number(n) => n.to_string(),
        Key::Text(s) => s,
    }))
}
