//! Book Appointment page component and server functions.

use crate::types::{ActionOutcome, Loaded};
use clinic_core::{Doctor, DoctorId};
use clinic_scheduling::{BookingFlow, slots_for, validate};
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;

/// Server function to load the doctors a patient can book with.
#[server]
pub async fn booking_options() -> Result<Loaded<Vec<Doctor>>, ServerFnError> {
    use crate::server_helpers::{admit, request_session};
    use clinic_session::View;

    let (request, state) = request_session().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to open session for booking_options");
        e.into_server_error()
    })?;

    if let Err(failure) = admit(&request, View::Book) {
        return Ok(failure.into());
    }

    match state.gateway.list_doctors().await {
        Ok(doctors) => Ok(Loaded::Ready(doctors)),
        Err(report) => {
            tracing::warn!(error = %report, "Failed to load doctors for booking");
            Ok(Loaded::Unavailable {
                message: "Failed to load doctors.".to_string(),
            })
        }
    }
}

/// Server function to book `time` with the doctor `doctor_id`.
#[server]
pub async fn book_appointment(
    doctor_id: String,
    time: String,
) -> Result<ActionOutcome, ServerFnError> {
    use crate::server_helpers::{admit, protected_failure, request_session};
    use clinic_session::View;

    let (request, state) = request_session().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to open session for book_appointment");
        e.into_server_error()
    })?;

    if let Err(failure) = admit(&request, View::Book) {
        return Ok(failure.into());
    }
    let booking = match validate(&doctor_id, &time) {
        Ok(booking) => booking,
        Err(e) => {
            return Ok(ActionOutcome::Failed {
                message: e.to_string(),
            });
        }
    };
    let Some(credential) = request.credential() else {
        return Ok(ActionOutcome::SignIn);
    };

    match state
        .gateway
        .book(&credential, booking.doctor_id(), booking.time())
        .await
    {
        Ok(confirmation) => {
            tracing::info!(
                doctor_id = %booking.doctor_id(),
                time = %booking.time(),
                "Appointment booked"
            );
            Ok(ActionOutcome::Done {
                message: confirmation.message,
            })
        }
        Err(report) => {
            Ok(protected_failure(&request, &report, "Failed to book appointment.").into())
        }
    }
}

/// Appointment booking for signed-in patients.
#[component]
pub fn BookPage() -> impl IntoView {
    let options = Resource::new(|| (), |_| booking_options());

    view! {
        <div class="book-page">
            <h1>"Book Appointment"</h1>
            <Suspense fallback=move || view! { <p>"Loading doctors..."</p> }>
                {move || {
                    options.get().map(|result| {
                        match result {
                            Ok(Loaded::Ready(doctors)) => view! {
                                <BookingForm doctors=doctors/>
                            }.into_any(),
                            Ok(Loaded::Unavailable { message }) => view! {
                                <p class="message error">{message}</p>
                            }.into_any(),
                            Ok(Loaded::SignIn) => view! { <Redirect path="/login"/> }.into_any(),
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
fn BookingForm(doctors: Vec<Doctor>) -> impl IntoView {
    let doctors = StoredValue::new(doctors);
    let book = ServerAction::<BookAppointment>::new();
    let flow = RwSignal::new(BookingFlow::default());
    let (doctor_id, set_doctor_id) = signal(String::new());
    let (time, set_time) = signal(String::new());
    let (invalid, set_invalid) = signal(None::<String>);
    let navigate = use_navigate();

    let times = move || {
        doctor_id
            .get()
            .parse::<DoctorId>()
            .map(|id| doctors.with_value(|all| slots_for(all, id).to_vec()))
            .unwrap_or_default()
    };

    Effect::new(move |_| {
        let Some(result) = book.value().get() else {
            return;
        };
        let outcome = result.unwrap_or_else(|_| ActionOutcome::Failed {
            message: "Failed to book appointment.".to_string(),
        });
        match outcome {
            ActionOutcome::Done { message } => flow.update(|f| {
                f.succeed(message).ok();
            }),
            ActionOutcome::Failed { message } => flow.update(|f| {
                f.fail(message).ok();
            }),
            ActionOutcome::SignIn => {
                flow.set(BookingFlow::Idle);
                navigate("/login", Default::default());
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = match validate(&doctor_id.get_untracked(), &time.get_untracked()) {
            Ok(request) => request,
            Err(e) => {
                set_invalid.set(Some(e.to_string()));
                return;
            }
        };
        set_invalid.set(None);
        let started = flow
            .try_update(|f| f.begin(&request).is_ok())
            .unwrap_or(false);
        if started {
            book.dispatch(BookAppointment {
                doctor_id: request.doctor_id().to_string(),
                time: request.time().to_string(),
            });
        }
    };

    let edited = move || {
        set_invalid.set(None);
        flow.update(BookingFlow::edit);
    };

    view! {
        <form class="booking-form" on:submit=on_submit>
            <label>
                "Select Doctor:"
                <select
                    prop:value=move || doctor_id.get()
                    on:change=move |ev| {
                        set_doctor_id.set(event_target_value(&ev));
                        set_time.set(String::new());
                        edited();
                    }
                >
                    <option value="">"-- Choose a Doctor --"</option>
                    {doctors.with_value(|all| {
                        all.iter()
                            .map(|doctor| {
                                let label = format!("{} ({})", doctor.name, doctor.specialization);
                                view! { <option value=doctor.id.to_string()>{label}</option> }
                            })
                            .collect_view()
                    })}
                </select>
            </label>
            <label>
                "Select Time Slot:"
                <select
                    prop:value=move || time.get()
                    disabled=move || times().is_empty()
                    on:change=move |ev| {
                        set_time.set(event_target_value(&ev));
                        edited();
                    }
                >
                    <option value="">"-- Choose a Time --"</option>
                    {move || {
                        times()
                            .into_iter()
                            .map(|slot| view! { <option value=slot.clone()>{slot.clone()}</option> })
                            .collect_view()
                    }}
                </select>
            </label>
            <button type="submit" disabled=move || flow.with(BookingFlow::is_submitting)>
                {move || {
                    if flow.with(BookingFlow::is_submitting) { "Booking..." } else { "Book Appointment" }
                }}
            </button>
            {move || invalid.get().map(|message| view! { <p class="message warning">{message}</p> })}
            {move || {
                flow.with(|f| {
                    let class = match f {
                        BookingFlow::Success { .. } => "message success",
                        _ => "message error",
                    };
                    f.message().map(|message| view! { <p class=class>{message.to_string()}</p> })
                })
            }}
        </form>
    }
}
