//! Admin home page component.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_session_handle;

/// Landing page for administrators.
///
/// Administrators also hold a regular account view, so this page links
/// through to it alongside the management surface.
#[component]
pub fn AdminHomePage() -> impl IntoView {
    let handle = use_session_handle();
    let session = handle.session();

    let greeting = move || {
        session
            .get()
            .identity()
            .map(|identity| format!("Welcome, {}", identity.label()))
            .unwrap_or_else(|| "Welcome".to_string())
    };

    view! {
        <div class="admin-home-page">
            <h1>"Administration"</h1>
            <p class="admin-greeting">{greeting}</p>
            <ul class="admin-links">
                <li>
                    <A href="/user/home">"Your own accounts"</A>
                </li>
            </ul>
        </div>
    }
}
