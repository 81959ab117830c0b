//! Update Slots page component and server functions.

use crate::types::{ActionOutcome, Loaded};
use clinic_scheduling::SlotSet;
use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;

/// Server function to load the signed-in doctor's published slots.
///
/// The doctor record is found in the public directory by its `user_id`. An
/// account with no matching record starts from an empty list.
#[server]
pub async fn current_slots() -> Result<Loaded<Vec<String>>, ServerFnError> {
    use crate::server_helpers::{admit, request_session};
    use clinic_session::View;

    let (request, state) = request_session().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to open session for current_slots");
        e.into_server_error()
    })?;

    if let Err(failure) = admit(&request, View::UpdateSlots) {
        return Ok(failure.into());
    }
    let session = request.session();
    let Some(subject) = session.subject() else {
        return Ok(Loaded::SignIn);
    };

    match state.gateway.list_doctors().await {
        Ok(doctors) => {
            let slots = owned_slots(doctors, subject).unwrap_or_else(|| {
                tracing::debug!(subject = %subject, "No doctor record for account");
                Vec::new()
            });
            Ok(Loaded::Ready(slots))
        }
        Err(report) => {
            tracing::warn!(error = %report, "Failed to load doctor slots");
            Ok(Loaded::Unavailable {
                message: "Failed to load your slots.".to_string(),
            })
        }
    }
}

/// The published slots of the directory entry owned by `subject`.
#[cfg(any(feature = "ssr", test))]
fn owned_slots(doctors: Vec<clinic_core::Doctor>, subject: &str) -> Option<Vec<String>> {
    doctors
        .into_iter()
        .find(|doctor| doctor.is_owned_by(subject))
        .map(|doctor| doctor.available_slots)
}

/// Server function to replace the signed-in doctor's slots.
///
/// Sent as JSON so an empty list survives the trip.
#[server(input = Json)]
pub async fn update_slots(slots: Vec<String>) -> Result<ActionOutcome, ServerFnError> {
    use crate::server_helpers::{admit, protected_failure, request_session};
    use clinic_session::View;

    let (request, state) = request_session().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to open session for update_slots");
        e.into_server_error()
    })?;

    if let Err(failure) = admit(&request, View::UpdateSlots) {
        return Ok(failure.into());
    }
    let Some(credential) = request.credential() else {
        return Ok(ActionOutcome::SignIn);
    };

    let slots = SlotSet::from(slots);
    match state.gateway.update_slots(&credential, slots.as_slice()).await {
        Ok(updated) => {
            tracing::info!(
                doctor_id = %updated.doctor_id,
                count = updated.available_slots.len(),
                "Slots updated"
            );
            Ok(ActionOutcome::Done {
                message: "Slots updated successfully!".to_string(),
            })
        }
        Err(report) => Ok(protected_failure(&request, &report, "Failed to update slots.").into()),
    }
}

/// Slot editor for signed-in doctors.
#[component]
pub fn UpdateSlotsPage() -> impl IntoView {
    let current = Resource::new(|| (), |_| current_slots());

    view! {
        <div class="update-slots-page">
            <h1>"Update Available Slots"</h1>
            <Suspense fallback=move || view! { <p>"Loading..."</p> }>
                {move || {
                    current.get().map(|result| {
                        match result {
                            Ok(Loaded::Ready(slots)) => view! {
                                <SlotEditor initial=SlotSet::from(slots)/>
                            }.into_any(),
                            Ok(Loaded::Unavailable { message }) => view! {
                                <p class="message error">{message}</p>
                            }.into_any(),
                            Ok(Loaded::SignIn) => view! { <Redirect path="/login"/> }.into_any(),
                            Err(_) => view! {
                                <p class="message error">"Failed to load your slots."</p>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn SlotEditor(initial: SlotSet) -> impl IntoView {
    let slots = RwSignal::new(initial);
    let (candidate, set_candidate) = signal(String::new());
    let update = ServerAction::<UpdateSlots>::new();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if let Some(Ok(ActionOutcome::SignIn)) = update.value().get() {
            navigate("/login", Default::default());
        }
    });

    let on_add = move |_| {
        let value = candidate.get_untracked();
        if slots.try_update(|set| set.add(&value)).unwrap_or(false) {
            set_candidate.set(String::new());
        }
    };

    let on_update = move |_| {
        update.dispatch(UpdateSlots {
            slots: slots.with_untracked(|set| set.as_slice().to_vec()),
        });
    };

    let message = move || {
        update.value().get().and_then(|result| match result {
            Ok(ActionOutcome::Done { message }) => Some(("message success", message)),
            Ok(ActionOutcome::Failed { message }) => Some(("message error", message)),
            Ok(ActionOutcome::SignIn) => None,
            Err(_) => Some(("message error", "Failed to update slots.".to_string())),
        })
    };

    view! {
        <div class="slot-editor">
            <label>
                "Select a Time Slot:"
                <select
                    prop:value=move || candidate.get()
                    on:change=move |ev| set_candidate.set(event_target_value(&ev))
                >
                    <option value="">"-- Choose Time --"</option>
                    {move || {
                        slots
                            .with(SlotSet::remaining_candidates)
                            .into_iter()
                            .map(|slot| view! { <option value=slot.clone()>{slot.clone()}</option> })
                            .collect_view()
                    }}
                </select>
            </label>
            <button type="button" on:click=on_add>"Add"</button>
            <ul class="slot-list">
                {move || {
                    slots
                        .with(|set| set.iter().map(str::to_string).collect::<Vec<_>>())
                        .into_iter()
                        .map(|slot| {
                            let removed = slot.clone();
                            view! {
                                <li>
                                    {slot}
                                    <button
                                        type="button"
                                        aria-label="Remove"
                                        on:click=move |_| {
                                            slots.update(|set| {
                                                set.remove(&removed);
                                            });
                                        }
                                    >
                                        "✕"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
            <button
                type="button"
                class="primary"
                disabled=move || update.pending().get()
                on:click=on_update
            >
                {move || if update.pending().get() { "Updating..." } else { "Update Slots" }}
            </button>
            {move || message().map(|(class, text)| view! { <p class=class>{text}</p> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::{Doctor, DoctorId};

    fn doctor(id: i64, user_id: Option<&str>, slots: &[&str]) -> Doctor {
        Doctor {
            id: DoctorId::new(id),
            name: format!("Dr {id}"),
            specialization: "General".to_string(),
            available_slots: slots.iter().map(|s| s.to_string()).collect(),
            daily_limit: 8,
            booked_slots: 0,
            user_id: user_id.map(str::to_string),
        }
    }

    #[test]
    fn seeds_from_the_record_owned_by_the_account() {
        let doctors = vec![doctor(5, Some("11"), &["13:00"]), doctor(2, Some("5"), &["09:00"])];
        assert_eq!(owned_slots(doctors, "5"), Some(vec!["09:00".to_string()]));
    }

    #[test]
    fn record_id_matching_the_subject_is_not_ownership() {
        let doctors = vec![
            doctor(5, None, &["13:00", "13:30"]),
            doctor(2, None, &["09:00"]),
        ];
        assert_eq!(owned_slots(doctors, "5"), None);
    }
}
