//! Login page component.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

/// Login page. The form posts to `/auth/login`, which sets the credential
/// cookie and redirects home, or comes back here with `?failed=true`.
#[component]
pub fn LoginPage() -> impl IntoView {
    let query = use_query_map();
    let failed = move || query.read().get("failed").is_some();

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Login"</h1>
                <form method="post" action="/auth/login">
                    <label for="email">"Email"</label>
                    <input type="email" id="email" name="email" placeholder="Enter your email" required/>
                    <label for="password">"Password"</label>
                    <input type="password" id="password" name="password" placeholder="Enter your password" required/>
                    <button type="submit" class="login-button">"Login"</button>
                </form>
                <Show when=failed>
                    <p class="message error">"Login failed. Check credentials or try again."</p>
                </Show>
                <p>"No account yet? " <a href="/register">"Register"</a></p>
            </div>
        </div>
    }
}
