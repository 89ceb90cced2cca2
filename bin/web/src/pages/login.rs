//! Login page component.

use amber_vault_session::SessionState;
use leptos::prelude::*;

use crate::app::use_session_handle;

/// Login page - username/password form driving the credential exchange.
///
/// A failed attempt shows the error recorded in the session; a
/// successful one flips the session to authenticated, and the route
/// guard then redirects away from this page.
#[component]
pub fn LoginPage() -> impl IntoView {
    let handle = use_session_handle();
    let session = handle.session();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let submitting =
        move || matches!(session.get().state(), SessionState::Authenticating);
    let error_message = move || session.get().last_error().map(|err| err.to_string());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        handle.login(username.get_untracked(), password.get_untracked());
    };

    view! {
        <div class="login-page">
            <div class="login-box">
                <h1>"Log in to amber-vault"</h1>
                <form on:submit=on_submit>
                    <label>
                        "Username"
                        <input
                            type="text"
                            name="username"
                            prop:value=username
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                        />
                    </label>
                    <label>
                        "Password"
                        <input
                            type="password"
                            name="password"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                        />
                    </label>
                    <button type="submit" class="login-button" disabled=submitting>
                        {move || if submitting() { "Signing in..." } else { "Log in" }}
                    </button>
                </form>
                {move || {
                    error_message()
                        .map(|message| view! { <p class="login-error">{message}</p> })
                }}
            </div>
        </div>
    }
}
