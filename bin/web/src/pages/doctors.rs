//! Doctor directory page component and server functions.

use crate::types::{Directory, SearchOutcome};
use clinic_core::Doctor;
use leptos::prelude::*;

/// Server function to load every doctor and the specialization filter list.
#[server]
pub async fn load_directory() -> Result<Directory, ServerFnError> {
    use crate::error::PageError;
    use crate::server_helpers::app_state;

    let state = app_state().map_err(|e| {
        tracing::error!(error = %e, "Missing state for load_directory");
        e.into_server_error()
    })?;

    let (doctors, specializations) = tokio::join!(
        state.gateway.list_doctors(),
        state.gateway.list_specializations()
    );

    let doctors = doctors.map_err(|e| {
        tracing::warn!(error = %e, "Failed to load doctor directory");
        PageError::ServiceUnavailable {
            details: e.to_string(),
        }
        .into_server_error()
    })?;

    // The filter list is a convenience; the directory still renders without it.
    let specializations = specializations.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load specializations");
        Vec::new()
    });

    Ok(Directory {
        doctors,
        specializations,
    })
}

/// Server function to search the directory. Blank filters are ignored.
#[server]
pub async fn search_doctors(
    specialization: String,
    name: String,
) -> Result<SearchOutcome, ServerFnError> {
    use crate::server_helpers::app_state;
    use clinic_gateway::RemoteError;

    let state = app_state().map_err(|e| {
        tracing::error!(error = %e, "Missing state for search_doctors");
        e.into_server_error()
    })?;

    match state.gateway.search_doctors(&specialization, &name).await {
        Ok(doctors) => Ok(SearchOutcome::Found(doctors)),
        Err(report) if matches!(report.current_context(), RemoteError::NotFound { .. }) => {
            tracing::debug!(
                specialization = %specialization,
                name = %name,
                "No doctors matched search"
            );
            Ok(SearchOutcome::NoMatch)
        }
        Err(report) => {
            tracing::warn!(error = %report, "Doctor search failed");
            Ok(SearchOutcome::Failed)
        }
    }
}

/// The public doctor directory with search.
#[component]
pub fn DoctorsPage() -> impl IntoView {
    let directory = Resource::new(|| (), |_| load_directory());
    let search = ServerAction::<SearchDoctors>::new();

    let (specialization, set_specialization) = signal(String::new());
    let (name, set_name) = signal(String::new());
    // `None` shows the full directory.
    let (results, set_results) = signal(Option::<Vec<Doctor>>::None);
    let (message, set_message) = signal(Option::<String>::None);

    Effect::new(move || {
        if let Some(outcome) = search.value().get() {
            match outcome {
                Ok(SearchOutcome::Found(doctors)) => {
                    set_results.set(Some(doctors));
                    set_message.set(None);
                }
                Ok(SearchOutcome::NoMatch) => {
                    set_results.set(Some(Vec::new()));
                    set_message.set(Some("No matching doctors found.".to_string()));
                }
                Ok(SearchOutcome::Failed) | Err(_) => {
                    set_message.set(Some("Search failed. Please try again.".to_string()));
                }
            }
        }
    });

    let on_search = move |_| {
        set_message.set(None);
        search.dispatch(SearchDoctors {
            specialization: specialization.get_untracked(),
            name: name.get_untracked(),
        });
    };

    let on_reset = move |_| {
        set_specialization.set(String::new());
        set_name.set(String::new());
        set_results.set(None);
        set_message.set(None);
        directory.refetch();
    };

    view! {
        <div class="doctors-page">
            <h1>"Our Doctors"</h1>
            <Suspense fallback=move || view! { <p>"Loading doctors..."</p> }>
                {move || {
                    directory.get().map(|loaded| {
                        match loaded {
                            Ok(Directory { doctors, specializations }) => view! {
                                <div class="filters">
                                    <select
                                        prop:value=move || specialization.get()
                                        on:change=move |ev| set_specialization.set(event_target_value(&ev))
                                    >
                                        <option value="">"All specializations"</option>
                                        {specializations.into_iter().map(|s| view! {
                                            <option value=s.clone()>{s.clone()}</option>
                                        }).collect_view()}
                                    </select>
                                    <input
                                        type="text"
                                        placeholder="Search by name"
                                        prop:value=move || name.get()
                                        on:input=move |ev| set_name.set(event_target_value(&ev))
                                    />
                                    <button on:click=on_search disabled=move || search.pending().get()>
                                        {move || if search.pending().get() { "Searching..." } else { "Search" }}
                                    </button>
                                    <button on:click=on_reset>"Reset"</button>
                                </div>
                                {move || message.get().map(|m| view! { <p class="message error">{m}</p> })}
                                <DoctorList doctors=Signal::derive(move || {
                                    results.get().unwrap_or_else(|| doctors.clone())
                                })/>
                            }.into_any(),
                            Err(_) => view! {
                                <p class="message error">"Failed to load doctors."</p>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn DoctorList(doctors: Signal<Vec<Doctor>>) -> impl IntoView {
    view! {
        <div class="doctor-grid">
            {move || {
                doctors.get().into_iter().map(|doctor| view! {
                    <DoctorCard doctor=doctor/>
                }).collect_view()
            }}
        </div>
    }
}

#[component]
fn DoctorCard(doctor: Doctor) -> impl IntoView {
    let slots = slot_summary(&doctor.available_slots);

    view! {
        <div class="doctor-card">
            <h2>{doctor.name}</h2>
            <p><strong>"Specialization: "</strong>{doctor.specialization}</p>
            <p><strong>"Available Slots: "</strong>{slots}</p>
            <p><strong>"Daily Limit: "</strong>{doctor.daily_limit.to_string()}</p>
            <p><strong>"Booked: "</strong>{doctor.booked_slots.to_string()}</p>
        </div>
    }
}

fn slot_summary(slots: &[String]) -> String {
    if slots.is_empty() {
        "None".to_string()
    } else {
        slots.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_summary_lists_or_says_none() {
        assert_eq!(slot_summary(&[]), "None");
        assert_eq!(
            slot_summary(&["09:00".to_string(), "09:30".to_string()]),
            "09:00, 09:30"
        );
    }
}
