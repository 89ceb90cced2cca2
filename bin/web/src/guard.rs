//! Route guarding.
//!
//! [`Guarded`] re-evaluates the access decision whenever the session
//! or the current location changes, so a logout on one page bounces
//! the user off a protected page without a reload.

use amber_vault_routing::{decide, AccessDecision, RouteRequirement};
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::{use_location, use_query_map};

use crate::app::use_session_handle;
use crate::config::ClientConfig;

/// Wraps a page view in an access decision.
///
/// Renders a loading placeholder while the decision is pending, the
/// children when access is allowed, and a redirect otherwise. When an
/// already-authenticated user is bounced off a public-only page, a
/// `return_to` query parameter wins over the role home so a login
/// round-trip lands back where it started.
#[component]
pub fn Guarded(requirement: RouteRequirement, children: ChildrenFn) -> impl IntoView {
    let handle = use_session_handle();
    let location = use_location();
    let query = use_query_map();
    let paths = use_context::<ClientConfig>()
        .map(|config| config.paths)
        .unwrap_or_default();

    move || {
        let session = handle.session().get();
        let requested = location.pathname.get();
        match decide(&session, &requirement, &requested, &paths) {
            AccessDecision::Pending => {
                view! { <p class="loading">"Loading..."</p> }.into_any()
            }
            AccessDecision::Allow => children().into_any(),
            AccessDecision::Redirect { path, return_to } => {
                let target = if session.is_authenticated() {
                    // Only same-origin paths; anything else would be an
                    // open redirect.
                    query
                        .get()
                        .get("return_to")
                        .filter(|back| back.starts_with('/'))
                        .unwrap_or(path)
                } else if let Some(requested) = return_to {
                    format!("{path}?return_to={requested}")
                } else {
                    path
                };
                view! { <Redirect path=target /> }.into_any()
            }
        }
    }
}
