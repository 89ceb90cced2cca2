//! Unauthorized page component.

use leptos::prelude::*;
use leptos_router::components::A;

/// Shown when an authenticated user reaches a route their role does
/// not allow and no role home exists to send them to.
#[component]
pub fn UnauthorizedPage() -> impl IntoView {
    view! {
        <div class="unauthorized-page">
            <h1>"Access denied"</h1>
            <p>"Your account does not have permission to view this page."</p>
            <A href="/login">"Back to login"</A>
        </div>
    }
}
