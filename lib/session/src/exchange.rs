//! The external credential exchange seam.
//!
//! Swapping a username/password pair for a bearer credential is the only
//! network operation this crate depends on. The web client implements it
//! over the REST backend; tests use canned implementations.

use async_trait::async_trait;

use crate::error::ExchangeError;
use crate::token::BearerToken;

/// Exchanges raw credentials for a bearer token.
///
/// The exchange's own timeout governs how long a login may take; the
/// lifecycle controller imposes none of its own.
#[async_trait(?Send)]
pub trait CredentialExchange {
    /// Performs the exchange.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InvalidCredentials`] when the backend rejects the
    /// pair, [`ExchangeError::Unreachable`] on transport failure.
    async fn exchange(&self, username: &str, password: &str)
    -> Result<BearerToken, ExchangeError>;
}
