//! Home page component.

use crate::app::current_session;
use clinic_session::{Role, Session};
use leptos::prelude::*;

/// The home page component.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = Resource::new(|| (), |_| current_session());

    view! {
        <div class="home-page">
            <h1>"Welcome to HealthCare"</h1>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    session.get().map(|result| {
                        match result.unwrap_or(Session::Anonymous) {
                            Session::Authenticated { role: Role::Patient, .. } => view! {
                                <p>"Find a doctor and book your next appointment."</p>
                                <a href="/book" class="cta-button">"Book an appointment"</a>
                            }.into_any(),
                            Session::Authenticated { role: Role::Doctor, .. } => view! {
                                <p>"Keep your available time slots up to date for patients."</p>
                                <a href="/update-slots" class="cta-button">"Update slots"</a>
                            }.into_any(),
                            Session::Anonymous => view! {
                                <p>"Browse our doctors, or register to book appointments."</p>
                                <a href="/login" class="cta-button">"Log in"</a>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}
