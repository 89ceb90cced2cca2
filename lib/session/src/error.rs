//! Error types for the session crate.
//!
//! Each collaborator seam has its own error enum:
//! - `TokenError`: credential decoding failures
//! - `ExchangeError`: credential exchange (login) failures
//! - `StoreError`: durable storage failures
//! - `SessionError`: the union surfaced by the lifecycle controller

use std::fmt;

/// Errors from decoding a bearer credential.
///
/// Decoding is advisory: it protects the UI from obviously broken or
/// expired credentials, it is not a trust boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The credential could not be parsed into the expected payload.
    Malformed { reason: String },
    /// The credential's embedded expiry is in the past.
    Expired,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { reason } => {
                write!(f, "malformed credential: {reason}")
            }
            Self::Expired => {
                write!(f, "credential has expired")
            }
        }
    }
}

impl std::error::Error for TokenError {}

/// Errors from the external credential exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The backend rejected the username/password pair.
    InvalidCredentials,
    /// The backend could not be reached (transport failure, timeout).
    Unreachable { details: String },
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "invalid username or password")
            }
            Self::Unreachable { details } => {
                write!(f, "authentication service unreachable: {details}")
            }
        }
    }
}

impl std::error::Error for ExchangeError {}

/// Errors from durable client storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The storage backend is unavailable or rejected the operation.
    Unavailable { details: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => {
                write!(f, "client storage unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Errors surfaced by the session lifecycle controller.
///
/// Recorded in the `Failed` session state for display; rehydration
/// failures never surface here, they are recovered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The credential returned by the backend could not be decoded.
    Token(TokenError),
    /// The credential exchange failed.
    Exchange(ExchangeError),
    /// Durable storage failed while persisting the credential.
    Store(StoreError),
    /// A login attempt was already in flight.
    LoginInFlight,
    /// The login was superseded by a logout issued while it was in flight.
    Superseded,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(e) => write!(f, "{e}"),
            Self::Exchange(e) => write!(f, "{e}"),
            Self::Store(e) => write!(f, "{e}"),
            Self::LoginInFlight => {
                write!(f, "a login attempt is already in progress")
            }
            Self::Superseded => {
                write!(f, "login superseded by logout")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Token(e) => Some(e),
            Self::Exchange(e) => Some(e),
            Self::Store(e) => Some(e),
            Self::LoginInFlight | Self::Superseded => None,
        }
    }
}

impl From<TokenError> for SessionError {
    fn from(e: TokenError) -> Self {
        Self::Token(e)
    }
}

impl From<ExchangeError> for SessionError {
    fn from(e: ExchangeError) -> Self {
        Self::Exchange(e)
    }
}

impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
