//! The session lifecycle controller.
//!
//! Orchestrates startup rehydration, login, and logout as a small state
//! machine over the single process-wide [`Session`]. It is the sole writer
//! of both the in-memory session and the persisted record; routing and
//! pages consume read-only snapshots.

use std::sync::{Mutex, MutexGuard};

use crate::error::SessionError;
use crate::exchange::CredentialExchange;
use crate::identity::Identity;
use crate::role::RoleFilter;
use crate::session::{Session, SessionState};
use crate::store::{CredentialStore, StorageKey};
use crate::token::{self, BearerToken};

/// Orchestrates the session lifecycle.
///
/// All transitions are serialized: mutation happens in short critical
/// sections, and the suspension points (credential exchange, storage) are
/// modeled as the explicit `Authenticating` state rather than blocking.
pub struct SessionController<E, S> {
    exchange: E,
    store: S,
    filter: RoleFilter,
    session: Mutex<Session>,
}

impl<E, S> SessionController<E, S>
where
    E: CredentialExchange,
    S: CredentialStore,
{
    /// Creates a controller with the default role filter.
    #[must_use]
    pub fn new(exchange: E, store: S) -> Self {
        Self::with_filter(exchange, store, RoleFilter::default())
    }

    /// Creates a controller with a custom role filter.
    #[must_use]
    pub fn with_filter(exchange: E, store: S, filter: RoleFilter) -> Self {
        Self {
            exchange,
            store,
            filter,
            session: Mutex::new(Session::starting()),
        }
    }

    /// Returns a snapshot of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    /// Rehydrates the session from durable storage.
    ///
    /// Local-only: reads the persisted credential, re-runs decode and
    /// identity resolution, and purges the record when it is expired or
    /// malformed. Runs effectively once per process lifetime: subsequent
    /// calls return the current snapshot unchanged. Must complete before
    /// any access decision is evaluated.
    pub async fn restore(&self) -> Session {
        if self.lock().is_restored() {
            return self.snapshot();
        }

        let loaded = match self.store.get(StorageKey::Credential).await {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!(error = %e, "storage unavailable during rehydration");
                None
            }
        };

        let restored = match loaded {
            None => None,
            Some(raw) => {
                let token = BearerToken::new(raw);
                match token::decode(&token) {
                    Ok(claims) => {
                        let identity = Identity::resolve_with(&claims, &self.filter);
                        tracing::debug!(
                            subject = %identity.subject(),
                            role = %identity.role(),
                            "session rehydrated from storage"
                        );
                        Some((token, identity))
                    }
                    Err(e) => {
                        tracing::debug!(error = %e, "purging stale persisted credential");
                        self.purge_storage().await;
                        None
                    }
                }
            }
        };

        let mut session = self.lock();
        if session.is_restored() {
            return session.clone();
        }
        let state = match restored {
            // A login that completed meanwhile takes precedence.
            Some((token, identity))
                if matches!(session.state(), SessionState::Unauthenticated) =>
            {
                SessionState::Authenticated { token, identity }
            }
            Some(_) | None => session.state().clone(),
        };
        *session = Session::new(state, true);
        session.clone()
    }

    /// Logs in with the given credentials.
    ///
    /// Transitions to `Authenticating`, performs the exchange, decodes and
    /// resolves the returned credential, persists it with a TTL equal to
    /// its own expiry, and transitions to `Authenticated`. Any failure
    /// transitions to `Failed` with the error recorded and leaves both the
    /// session and storage cleared.
    ///
    /// # Errors
    ///
    /// [`SessionError::LoginInFlight`] when a login is already in
    /// progress; [`SessionError::Superseded`] when a logout was issued
    /// while the exchange was in flight; otherwise the underlying
    /// exchange, decode, or storage failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<Identity, SessionError> {
        {
            let mut session = self.lock();
            if matches!(session.state(), SessionState::Authenticating) {
                return Err(SessionError::LoginInFlight);
            }
            *session = Session::new(SessionState::Authenticating, session.is_restored());
        }

        let attempt = self.attempt_login(username, password).await;

        if let Err(e) = &attempt {
            tracing::warn!(error = %e, "login attempt failed");
            // Guarantee no partial persisted record survives a failure.
            self.purge_storage().await;
        }

        let superseded = !matches!(self.lock().state(), SessionState::Authenticating);
        if superseded {
            // A logout arrived while the exchange was in flight; its purge
            // wins over whatever the attempt persisted.
            self.purge_storage().await;
            return Err(SessionError::Superseded);
        }

        let mut session = self.lock();
        match attempt {
            Ok((token, identity)) => {
                tracing::info!(
                    subject = %identity.subject(),
                    role = %identity.role(),
                    "login succeeded"
                );
                *session = Session::new(
                    SessionState::Authenticated {
                        token,
                        identity: identity.clone(),
                    },
                    true,
                );
                Ok(identity)
            }
            Err(error) => {
                *session = Session::new(SessionState::Failed { error: error.clone() }, true);
                Err(error)
            }
        }
    }

    /// Logs out.
    ///
    /// Purges the persisted record and clears the in-memory session
    /// atomically. Safe to call from any state; logging out without an
    /// active session is a no-op, not an error.
    pub async fn logout(&self) {
        self.purge_storage().await;

        let mut session = self.lock();
        match session.state() {
            SessionState::Unauthenticated => {
                tracing::debug!("logout with no active session");
            }
            _ => {
                tracing::info!("logged out");
            }
        }
        *session = Session::new(SessionState::Unauthenticated, true);
    }

    async fn attempt_login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(BearerToken, Identity), SessionError> {
        let token = self.exchange.exchange(username, password).await?;
        let claims = token::decode(&token)?;
        let identity = Identity::resolve_with(&claims, &self.filter);

        self.store
            .put(
                StorageKey::Credential,
                token.as_str(),
                Some(claims.expires_at()),
            )
            .await?;

        Ok((token, identity))
    }

    /// Removes every key in the documented key space, including legacy
    /// copies written by older clients. Best-effort: storage failures are
    /// logged, never surfaced.
    async fn purge_storage(&self) {
        for key in StorageKey::ALL {
            if let Err(e) = self.store.remove(key).await {
                tracing::warn!(key = %key, error = %e, "failed to purge persisted record");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // The session lock is never held across an await point, so a
        // poisoned lock can only mean a panic mid-assignment of a Session
        // value; the value itself is still coherent.
        self.session.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
