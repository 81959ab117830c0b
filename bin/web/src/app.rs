//! Main Leptos application component and routing.

use crate::pages::{
    BookPage, DoctorsPage, HomePage, LoginPage, MyInfoPage, RegisterPage, UpdateSlotsPage,
};
use clinic_session::{Access, Session, View, decide, navigation};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    SsrMode,
    components::{A, Route, Router, Routes},
    hooks::use_location,
    path,
};

/// Server function returning the session for the request's credential.
///
/// An absent or undecodable credential is [`Session::Anonymous`].
#[server]
pub async fn current_session() -> Result<Session, ServerFnError> {
    use crate::server_helpers::request_session;

    let (request, _) = request_session().await.map_err(|e| {
        tracing::debug!(error = %e, "Failed to open session for current_session");
        e.into_server_error()
    })?;

    Ok(request.session())
}

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="HealthCare"/>
        <Router>
            <Header/>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/doctors") view=DoctorsPage/>
                    <Route path=path!("/register") view=RegisterPage/>
                    <Route path=path!("/book") view=BookPage ssr=ssr_mode(View::Book)/>
                    <Route path=path!("/myinfo") view=MyInfoPage ssr=ssr_mode(View::MyInfo)/>
                    <Route path=path!("/login") view=LoginPage/>
                    <Route path=path!("/update-slots") view=UpdateSlotsPage ssr=ssr_mode(View::UpdateSlots)/>
                </Routes>
            </main>
        </Router>
    }
}

/// How a view is rendered on a full page load.
///
/// Loaders of sign-in views may clear the credential cookie. Response
/// headers go out with the first streamed chunk, so those views render
/// fully before anything is sent.
fn ssr_mode(view: View) -> SsrMode {
    match decide(&Session::Anonymous, view) {
        Access::RedirectToLogin => SsrMode::Async,
        Access::Allow | Access::Hidden | Access::Deny => SsrMode::OutOfOrder,
    }
}

/// Header with the navigation links the session may see.
#[component]
fn Header() -> impl IntoView {
    let location = use_location();
    // Re-derived on every navigation so an expired credential drops the links.
    let session = Resource::new(move || location.pathname.get(), |_| current_session());

    view! {
        <header class="header">
            <a href="/" class="logo">"HealthCare"</a>
            <Suspense fallback=move || view! { <span>"Loading..."</span> }>
                {move || {
                    session.get().map(|result| {
                        let session = result.unwrap_or(Session::Anonymous);
                        view! { <NavLinks session=session/> }
                    })
                }}
            </Suspense>
        </header>
    }
}

#[component]
fn NavLinks(session: Session) -> impl IntoView {
    view! {
        <nav>
            {navigation(&session)
                .into_iter()
                .map(|link| {
                    if link == View::Logout {
                        // Served by axum, not the client router.
                        view! { <a href=link.path() rel="external" class="logout">{link.label()}</a> }
                            .into_any()
                    } else {
                        view! { <A href=link.path()>{link.label()}</A> }.into_any()
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_views_wait_for_their_loaders() {
        for view in [View::Book, View::MyInfo, View::UpdateSlots] {
            assert!(matches!(ssr_mode(view), SsrMode::Async), "{view:?}");
        }
        for view in [View::Home, View::Doctors, View::Register, View::Login] {
            assert!(matches!(ssr_mode(view), SsrMode::OutOfOrder), "{view:?}");
        }
    }
}
