//! Registration page component and server function.

use crate::app::current_session;
use crate::types::ActionOutcome;
use clinic_session::{Role, Session, View, can_view};
use leptos::form::ActionForm;
use leptos::prelude::*;

/// Server function to create a patient or doctor account.
///
/// The returned token is dropped: the user signs in afterwards.
#[server]
pub async fn register(
    role: String,
    name: String,
    email: String,
    password: String,
    phone: Option<String>,
    specialization: Option<String>,
) -> Result<ActionOutcome, ServerFnError> {
    use crate::server_helpers::{admit, request_session};

    let (session, state) = request_session().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to open session for register");
        e.into_server_error()
    })?;

    if let Err(failure) = admit(&session, View::Register) {
        return Ok(failure.into());
    }

    let request = match registration(
        &role,
        &name,
        &email,
        &password,
        phone.as_deref(),
        specialization.as_deref(),
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Registration form incomplete");
            return Ok(ActionOutcome::Failed {
                message: e.to_string(),
            });
        }
    };

    match state.gateway.register(&request).await {
        Ok(_) => {
            tracing::info!(email = %request.email, role = %request.role, "Account registered");
            Ok(ActionOutcome::Done {
                message: "Registration successful! You can now log in.".to_string(),
            })
        }
        Err(report) => {
            tracing::warn!(error = %report, email = %request.email, "Registration failed");
            let detail = report.current_context().detail().unwrap_or_default();
            Ok(ActionOutcome::Failed {
                message: format!("Registration failed. {detail}").trim_end().to_string(),
            })
        }
    }
}

/// Builds the registration request, checking the fields the role needs.
#[cfg(feature = "ssr")]
fn registration(
    role: &str,
    name: &str,
    email: &str,
    password: &str,
    phone: Option<&str>,
    specialization: Option<&str>,
) -> Result<clinic_gateway::RegisterRequest, clinic_scheduling::ValidationError> {
    use clinic_gateway::RegisterRequest;
    use clinic_scheduling::ValidationError;

    fn required(value: Option<&str>, field: &'static str) -> Result<String, ValidationError> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(ValidationError::MissingField { field }),
        }
    }

    let role: Role = role
        .parse()
        .map_err(|_| ValidationError::MissingField { field: "role" })?;
    let name = required(Some(name), "name")?;
    let email = required(Some(email), "email")?;
    if password.is_empty() {
        return Err(ValidationError::MissingField { field: "password" });
    }
    let password = password.to_string();

    Ok(match role {
        Role::Patient => {
            RegisterRequest::patient(email, password, name, required(phone, "phone")?)
        }
        Role::Doctor => RegisterRequest::doctor(
            email,
            password,
            name,
            required(specialization, "specialization")?,
        ),
    })
}

/// Account registration. Signed-in users get a notice instead of the form.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = Resource::new(|| (), |_| current_session());

    view! {
        <Suspense fallback=move || view! { <p>"Loading..."</p> }>
            {move || {
                session.get().map(|result| {
                    let session = result.unwrap_or(Session::Anonymous);
                    if registration_open(&session) {
                        view! { <RegisterForm/> }.into_any()
                    } else {
                        view! { <p class="message error">"You are already signed in."</p> }.into_any()
                    }
                })
            }}
        </Suspense>
    }
}

/// Registration is for signed-out visitors only.
fn registration_open(session: &Session) -> bool {
    can_view(session, View::Register)
}

#[component]
fn RegisterForm() -> impl IntoView {
    let register = ServerAction::<Register>::new();
    let (role, set_role) = signal(Role::Patient);

    let outcome = move || {
        register.value().get().map(|result| match result {
            Ok(outcome) => outcome,
            Err(_) => ActionOutcome::Failed {
                message: "Registration failed.".to_string(),
            },
        })
    };

    view! {
        <div class="register-page">
            <h1>{move || format!("Register as {}", role.get().label())}</h1>
            <div class="role-switch">
                <button
                    type="button"
                    class:active=move || role.get() == Role::Patient
                    on:click=move |_| set_role.set(Role::Patient)
                >
                    "Patient"
                </button>
                <button
                    type="button"
                    class:active=move || role.get() == Role::Doctor
                    on:click=move |_| set_role.set(Role::Doctor)
                >
                    "Doctor"
                </button>
            </div>
            <ActionForm action=register>
                <input type="hidden" name="role" prop:value=move || role.get().as_str()/>
                <input type="text" name="name" placeholder="Full Name" required/>
                <input type="email" name="email" placeholder="Email Address" required/>
                <input type="password" name="password" placeholder="Password" required/>
                <Show
                    when=move || role.get() == Role::Doctor
                    fallback=|| view! { <input type="text" name="phone" placeholder="Phone" required/> }
                >
                    <input type="text" name="specialization" placeholder="Specialization" required/>
                </Show>
                <button type="submit" disabled=move || register.pending().get()>
                    {move || if register.pending().get() { "Registering..." } else { "Register" }}
                </button>
            </ActionForm>
            {move || outcome().map(|outcome| {
                let class = match outcome {
                    ActionOutcome::Done { .. } => "message success",
                    _ => "message error",
                };
                view! { <p class=class>{outcome.message().unwrap_or_default().to_string()}</p> }
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_signed_out_visitors_see_the_form() {
        assert!(registration_open(&Session::Anonymous));
        for role in [Role::Patient, Role::Doctor] {
            let session = Session::Authenticated {
                subject: "3".to_string(),
                role,
                expires_at: None,
            };
            assert!(!registration_open(&session));
        }
    }

    #[cfg(feature = "ssr")]
    mod form {
        use super::*;
        use clinic_scheduling::ValidationError;

        #[test]
        fn patient_needs_phone() {
            let err = registration("patient", "Pat", "p@x.io", "pw", None, Some("ignored"))
                .expect_err("no phone");
            assert_eq!(err, ValidationError::MissingField { field: "phone" });

            let request = registration("patient", " Pat ", "p@x.io", "pw", Some("555"), None)
                .expect("complete");
            assert_eq!(request.role, Role::Patient);
            assert_eq!(request.profile.name, "Pat");
            assert_eq!(request.profile.phone.as_deref(), Some("555"));
            assert!(request.profile.specialization.is_none());
        }

        #[test]
        fn doctor_needs_specialization() {
            let err = registration("doctor", "Dr", "d@x.io", "pw", Some("555"), Some("  "))
                .expect_err("blank specialization");
            assert_eq!(
                err,
                ValidationError::MissingField {
                    field: "specialization"
                }
            );

            let request = registration("doctor", "Dr", "d@x.io", "pw", None, Some("Cardiology"))
                .expect("complete");
            assert_eq!(request.role, Role::Doctor);
            assert!(request.profile.phone.is_none());
        }

        #[test]
        fn unknown_role_is_rejected() {
            assert_eq!(
                registration("admin", "A", "a@x.io", "pw", Some("1"), None).expect_err("bad role"),
                ValidationError::MissingField { field: "role" }
            );
        }

        #[test]
        fn common_fields_are_required() {
            assert_eq!(
                registration("patient", "", "p@x.io", "pw", Some("1"), None).expect_err("no name"),
                ValidationError::MissingField { field: "name" }
            );
            assert_eq!(
                registration("patient", "P", "p@x.io", "", Some("1"), None).expect_err("no password"),
                ValidationError::MissingField { field: "password" }
            );
        }
    }
}
