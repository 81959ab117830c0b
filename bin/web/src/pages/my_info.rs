//! My Info page component and server function.

use crate::types::Loaded;
use clinic_core::Patient;
use leptos::prelude::*;
use leptos_router::components::Redirect;

/// Server function to load the signed-in patient's profile.
#[server]
pub async fn my_info() -> Result<Loaded<Patient>, ServerFnError> {
    use crate::server_helpers::{admit, protected_failure, request_session};
    use clinic_gateway::RemoteError;
    use clinic_session::View;

    let (request, state) = request_session().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to open session for my_info");
        e.into_server_error()
    })?;

    if let Err(failure) = admit(&request, View::MyInfo) {
        return Ok(failure.into());
    }
    let Some(credential) = request.credential() else {
        return Ok(Loaded::SignIn);
    };

    match state.gateway.patient(&credential).await {
        Ok(patient) => Ok(Loaded::Ready(patient)),
        Err(report) if matches!(report.current_context(), RemoteError::Forbidden { .. }) => {
            tracing::warn!(error = %report, "Profile requested by a non-patient account");
            Ok(Loaded::Unavailable {
                message: "Only patients can access this page.".to_string(),
            })
        }
        Err(report) => {
            Ok(protected_failure(&request, &report, "Failed to load profile details.").into())
        }
    }
}

/// The signed-in patient's profile.
#[component]
pub fn MyInfoPage() -> impl IntoView {
    let info = Resource::new(|| (), |_| my_info());

    view! {
        <div class="my-info-page">
            <h1>"My Information"</h1>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    info.get().map(|result| {
                        match result {
                            Ok(Loaded::Ready(patient)) => view! {
                                <PatientDetails patient=patient/>
                            }.into_any(),
                            Ok(Loaded::Unavailable { message }) => view! {
                                <p class="message error">{message}</p>
                            }.into_any(),
                            Ok(Loaded::SignIn) => view! {
                                <p class="message error">"Session expired. Please login again."</p>
                                <Redirect path="/login"/>
                            }.into_any(),
                            Err(_) => view! {
                                <p class="message error">"Failed to load profile details."</p>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn PatientDetails(patient: Patient) -> impl IntoView {
    view! {
        <dl class="patient-details">
            <dt>"Patient ID"</dt>
            <dd>{patient.patient_id.to_string()}</dd>
            <dt>"Name"</dt>
            <dd>{patient.name}</dd>
            <dt>"Email"</dt>
            <dd>{patient.email}</dd>
            <dt>"Phone"</dt>
            <dd>{patient.phone}</dd>
        </dl>
    }
}
