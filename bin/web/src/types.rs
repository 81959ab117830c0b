//! Shared types used across server functions and UI components.

use clinic_core::Doctor;
use serde::{Deserialize, Serialize};

/// Data for a page that needs a signed-in user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Loaded<T> {
    /// The page can render.
    Ready(T),
    /// Render this message instead.
    Unavailable { message: String },
    /// Send the user to the login page.
    SignIn,
}

/// Result of a user-triggered server action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Done { message: String },
    Failed { message: String },
    SignIn,
}

impl ActionOutcome {
    /// The text to show, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Done { message } | Self::Failed { message } => Some(message),
            Self::SignIn => None,
        }
    }
}

/// Initial contents of the doctor directory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub doctors: Vec<Doctor>,
    pub specializations: Vec<String>,
}

/// Result of a directory search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Found(Vec<Doctor>),
    /// The API had no doctor matching the filters.
    NoMatch,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_outcome_messages() {
        let done = ActionOutcome::Done {
            message: "Booked".to_string(),
        };
        assert_eq!(done.message(), Some("Booked"));
        assert_eq!(ActionOutcome::SignIn.message(), None);
    }

    #[test]
    fn outcomes_cross_the_wire() {
        let loaded: Loaded<Vec<String>> = Loaded::Ready(vec!["09:00".to_string()]);
        let json = serde_json::to_string(&loaded).expect("serialize");
        let parsed: Loaded<Vec<String>> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, loaded);
    }
}
