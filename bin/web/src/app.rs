//! Application shell.
//!
//! Wires the session controller into the reactive graph and lays out
//! the routes. The controller itself is not `Send` (its HTTP exchange
//! is browser-bound), so it lives in local arena storage behind a
//! copyable [`SessionHandle`]; the current [`Session`] snapshot is
//! mirrored into a plain signal that views and guards can track.

use std::rc::Rc;

use amber_vault_routing::RouteRequirement;
use amber_vault_session::{Session, SessionController};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::config::ClientConfig;
use crate::exchange::RestCredentialExchange;
use crate::guard::Guarded;
use crate::pages::{AdminHomePage, LoginPage, UnauthorizedPage, UserHomePage};
use crate::storage::LocalStorageStore;

type WebController = SessionController<RestCredentialExchange, LocalStorageStore>;

/// Copyable handle to the session lifecycle, provided as context.
///
/// The signal is written only from this handle; everything else reads.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    controller: StoredValue<Rc<WebController>, LocalStorage>,
    session: RwSignal<Session>,
}

impl SessionHandle {
    fn new(config: &ClientConfig) -> Self {
        let controller = Rc::new(SessionController::new(
            RestCredentialExchange::new(config.api_base_url.clone()),
            LocalStorageStore::new(),
        ));
        Self {
            controller: StoredValue::new_local(controller),
            session: RwSignal::new(Session::starting()),
        }
    }

    /// The current session as a trackable signal.
    pub fn session(&self) -> Signal<Session> {
        self.session.into()
    }

    fn refresh(self) {
        let snapshot = self.controller.get_value().snapshot();
        self.session.set(snapshot);
    }

    /// Rehydrates the session from durable storage. Runs once; later
    /// calls only refresh the signal.
    pub fn restore(self) {
        spawn_local(async move {
            self.controller.get_value().restore().await;
            self.refresh();
        });
    }

    /// Starts a credential exchange. The outcome lands in the session
    /// signal; a rejected login shows up as a failed state there.
    pub fn login(self, username: String, password: String) {
        spawn_local(async move {
            let controller = self.controller.get_value();
            let _ = controller.login(&username, &password).await;
            self.refresh();
        });
    }

    /// Ends the session and clears persisted credentials.
    pub fn logout(self) {
        spawn_local(async move {
            self.controller.get_value().logout().await;
            self.refresh();
        });
    }
}

/// Returns the session handle provided by [`App`].
///
/// Panics when called outside the application tree.
pub fn use_session_handle() -> SessionHandle {
    expect_context()
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::load();
    let handle = SessionHandle::new(&config);
    provide_context(handle);
    provide_context(config);

    // Kick off rehydration before the first route renders; guards show
    // their loading view until the restore settles.
    handle.restore();

    view! {
        <Title text="amber-vault" />
        <Router>
            <Header />
            <main class="container">
                <Routes fallback=|| view! { <p>"Page not found."</p> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/login" /> } />
                    <Route
                        path=path!("/login")
                        view=|| {
                            view! {
                                <Guarded requirement=RouteRequirement::public_only()>
                                    <LoginPage />
                                </Guarded>
                            }
                        }
                    />
                    <Route
                        path=path!("/user/home")
                        view=|| {
                            view! {
                                <Guarded requirement=RouteRequirement::authenticated()>
                                    <UserHomePage />
                                </Guarded>
                            }
                        }
                    />
                    <Route
                        path=path!("/admin/home")
                        view=|| {
                            view! {
                                <Guarded requirement=RouteRequirement::admin_only()>
                                    <AdminHomePage />
                                </Guarded>
                            }
                        }
                    />
                    <Route
                        path=path!("/unauthorized")
                        view=|| {
                            view! {
                                <Guarded requirement=RouteRequirement::authenticated()>
                                    <UnauthorizedPage />
                                </Guarded>
                            }
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn Header() -> impl IntoView {
    let handle = use_session_handle();
    let session = handle.session();
    let user_label = move || {
        session
            .get()
            .identity()
            .map(|identity| identity.label().to_string())
    };

    view! {
        <header class="site-header">
            <span class="brand">"amber-vault"</span>
            {move || {
                user_label()
                    .map(|label| {
                        view! {
                            <span class="session-info">
                                <span class="user-label">{label}</span>
                                <button
                                    class="logout"
                                    on:click=move |_| handle.logout()
                                >
                                    "Log out"
                                </button>
                            </span>
                        }
                    })
            }}
        </header>
    }
}
