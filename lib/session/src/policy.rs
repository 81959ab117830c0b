//! Which views a session may see.
//!
//! The policy drives navigation and page gating only. It is derived from
//! unverified claims, so it must never be the thing that protects data: the
//! clinic API checks the bearer token and role on every protected call.

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::session::Session;

/// A distinct page of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    Doctors,
    Register,
    Book,
    MyInfo,
    UpdateSlots,
    Login,
    Logout,
}

impl View {
    /// Views in header display order.
    pub const ALL: [View; 8] = [
        View::Home,
        View::Doctors,
        View::Register,
        View::Book,
        View::MyInfo,
        View::UpdateSlots,
        View::Login,
        View::Logout,
    ];

    /// Returns the route this view is served at.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Doctors => "/doctors",
            Self::Register => "/register",
            Self::Book => "/book",
            Self::MyInfo => "/myinfo",
            Self::UpdateSlots => "/update-slots",
            Self::Login => "/login",
            Self::Logout => "/auth/logout",
        }
    }

    /// Returns the navigation label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Doctors => "Doctors",
            Self::Register => "Register",
            Self::Book => "Book",
            Self::MyInfo => "My Info",
            Self::UpdateSlots => "Update Slots",
            Self::Login => "Login",
            Self::Logout => "Logout",
        }
    }
}

/// Outcome of checking a view against a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Render the view.
    Allow,
    /// Leave the link out; something else takes its place (Logout for Login).
    Hidden,
    /// Do not render the control. No navigation happens.
    Deny,
    /// Sign-in required: clear the credential and go to the login view.
    RedirectToLogin,
}

impl Access {
    /// Returns true only for [`Access::Allow`].
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decides how `view` is treated for `session`.
#[must_use]
pub fn decide(session: &Session, view: View) -> Access {
    match session {
        Session::Anonymous => match view {
            View::Home | View::Doctors | View::Register | View::Login => Access::Allow,
            View::Book | View::MyInfo | View::UpdateSlots => Access::RedirectToLogin,
            View::Logout => Access::Hidden,
        },
        Session::Authenticated { role, .. } => match (view, role) {
            (View::Home | View::Doctors | View::Logout, _) => Access::Allow,
            (View::Register | View::Login, _) => Access::Hidden,
            (View::Book | View::MyInfo, Role::Patient) => Access::Allow,
            (View::Book | View::MyInfo, Role::Doctor) => Access::Deny,
            (View::UpdateSlots, Role::Doctor) => Access::Allow,
            (View::UpdateSlots, Role::Patient) => Access::Deny,
        },
    }
}

/// Returns true if `session` may see `view`.
#[must_use]
pub fn can_view(session: &Session, view: View) -> bool {
    decide(session, view).is_allowed()
}

/// Header links for `session`, in display order.
#[must_use]
pub fn navigation(session: &Session) -> Vec<View> {
    View::ALL
        .into_iter()
        .filter(|view| can_view(session, *view))
        .collect()
}
