//! The in-memory session model.
//!
//! Exactly one logical session exists per running client. The state enum
//! keeps credential and identity together, so they are set and cleared
//! atomically, so a session is never partially populated.

use crate::error::SessionError;
use crate::identity::Identity;
use crate::token::BearerToken;

/// The lifecycle state of the client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No user is logged in.
    Unauthenticated,
    /// A login attempt is in flight.
    Authenticating,
    /// A user is logged in.
    Authenticated {
        /// The bearer credential backing the session.
        token: BearerToken,
        /// The identity resolved from the credential.
        identity: Identity,
    },
    /// The last login attempt failed.
    Failed {
        /// The recorded failure, for display.
        error: SessionError,
    },
}

/// A snapshot of the client session.
///
/// The lifecycle controller is the sole writer; everything else (routing,
/// pages) reads cloned snapshots. `restored` distinguishes "not logged in"
/// from "rehydration has not finished yet"; consumers must treat the
/// latter as a loading state, never as an access verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
    restored: bool,
}

impl Session {
    /// The session at process start: unauthenticated, not yet rehydrated.
    #[must_use]
    pub fn starting() -> Self {
        Self {
            state: SessionState::Unauthenticated,
            restored: false,
        }
    }

    pub(crate) fn new(state: SessionState, restored: bool) -> Self {
        Self { state, restored }
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns true once startup rehydration has completed (or was found
    /// to have nothing to restore).
    #[must_use]
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Returns true while the session outcome is not yet known: either
    /// rehydration has not finished or a login is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.restored || matches!(self.state, SessionState::Authenticating)
    }

    /// Returns true if a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// Returns the logged-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::Authenticated { identity, .. } => Some(identity),
            _ => None,
        }
    }

    /// Returns the bearer credential, if a user is logged in.
    #[must_use]
    pub fn token(&self) -> Option<&BearerToken> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Returns the last recorded login failure, if the session is failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&SessionError> {
        match &self.state {
            SessionState::Failed { error } => Some(error),
            _ => None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::starting()
    }
}
