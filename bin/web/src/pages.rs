//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route,
//! along with any server functions specific to that page.

pub mod book;
pub mod doctors;
pub mod home;
pub mod login;
pub mod my_info;
pub mod register;
pub mod update_slots;

// Re-export all page components for convenient access
pub use book::BookPage;
pub use doctors::DoctorsPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use my_info::MyInfoPage;
pub use register::RegisterPage;
pub use update_slots::UpdateSlotsPage;
