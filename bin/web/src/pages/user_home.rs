//! User home page component.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::app::use_session_handle;
use crate::config::ClientConfig;
use crate::types::{ApiError, BankAccount, UserProfile};

/// The account holder's home: profile details and their accounts.
#[component]
pub fn UserHomePage() -> impl IntoView {
    let handle = use_session_handle();
    let session = handle.session();
    let config = use_context::<ClientConfig>().unwrap_or_default();

    let profile = RwSignal::new(None::<Result<UserProfile, ApiError>>);
    let accounts = RwSignal::new(None::<Result<Vec<BankAccount>, ApiError>>);

    Effect::new(move |_| {
        let snapshot = session.get();
        let Some(identity) = snapshot.identity().cloned() else {
            return;
        };
        let token = snapshot.token().cloned();
        let base_url = config.api_base_url.clone();
        spawn_local(async move {
            let api = ApiClient::new(base_url, token);
            profile.set(Some(api.fetch_profile(identity.subject()).await));
            accounts.set(Some(api.fetch_accounts(identity.subject()).await));
        });
    });

    let greeting = move || {
        session
            .get()
            .identity()
            .map(|identity| format!("Welcome, {}!", identity.label()))
            .unwrap_or_else(|| "Welcome!".to_string())
    };

    view! {
        <div class="user-home-page">
            <h1>{greeting}</h1>

            <section class="profile">
                <h2>"Your profile"</h2>
                {move || match profile.get() {
                    None => view! { <p>"Loading profile..."</p> }.into_any(),
                    Some(Err(err)) => {
                        view! { <p class="error">{format!("Could not load profile: {err}")}</p> }
                            .into_any()
                    }
                    Some(Ok(profile)) => {
                        view! { <ProfileDetails profile=profile /> }.into_any()
                    }
                }}
            </section>

            <section class="accounts">
                <h2>"Your accounts"</h2>
                {move || match accounts.get() {
                    None => view! { <p>"Loading accounts..."</p> }.into_any(),
                    Some(Err(err)) => {
                        view! { <p class="error">{format!("Could not load accounts: {err}")}</p> }
                            .into_any()
                    }
                    Some(Ok(accounts)) if accounts.is_empty() => {
                        view! { <p>"You have no accounts yet."</p> }.into_any()
                    }
                    Some(Ok(accounts)) => {
                        view! { <AccountList accounts=accounts /> }.into_any()
                    }
                }}
            </section>
        </div>
    }
}

#[component]
fn ProfileDetails(profile: UserProfile) -> impl IntoView {
    view! {
        <dl class="profile-details">
            <dt>"Name"</dt>
            <dd>{profile.full_name.unwrap_or_else(|| "—".to_string())}</dd>
            <dt>"Username"</dt>
            <dd>{profile.username.unwrap_or_else(|| "—".to_string())}</dd>
            <dt>"Email"</dt>
            <dd>{profile.email.unwrap_or_else(|| "—".to_string())}</dd>
            <dt>"Phone"</dt>
            <dd>{profile.phone.unwrap_or_else(|| "—".to_string())}</dd>
        </dl>
    }
}

#[component]
fn AccountList(accounts: Vec<BankAccount>) -> impl IntoView {
    view! {
        <ul class="account-list">
            {accounts
                .into_iter()
                .map(|account| {
                    let status = if account.is_active { "active" } else { "inactive" };
                    view! {
                        <li class="account-card" class:inactive=!account.is_active>
                            <span class="account-type">
                                {account.account_type.to_string()}
                            </span>
                            <span class="account-number">{account.account_number}</span>
                            <span class="account-balance">
                                {format!("{:.2} {}", account.balance, account.currency)}
                            </span>
                            <span class="account-status">{status}</span>
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}
