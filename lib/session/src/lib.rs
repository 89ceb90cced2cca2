//! Client-side session and identity management for the amber-vault
//! banking front-end.
//!
//! This crate provides:
//! - Bearer credential decoding (`token`: [`BearerToken`], [`ClaimSet`])
//! - Identity resolution from realm roles (`role`, `identity`)
//! - The single process-wide session model (`session`)
//! - Durable-storage and credential-exchange seams (`store`, `exchange`)
//! - The session lifecycle controller (`lifecycle`)
//!
//! # Trust Model
//!
//! Credential decoding here is a UX convenience: it keeps the UI from
//! presenting obviously expired or broken credentials. It is not a
//! security boundary: the backend independently validates every request.
//!
//! # Example
//!
//! ```
//! use amber_vault_session::{
//!     CredentialExchange, ExchangeError, BearerToken, MemoryStore,
//!     SessionController,
//! };
//! use async_trait::async_trait;
//!
//! struct FixedExchange(String);
//!
//! #[async_trait(?Send)]
//! impl CredentialExchange for FixedExchange {
//!     async fn exchange(&self, _: &str, _: &str) -> Result<BearerToken, ExchangeError> {
//!         Ok(BearerToken::from(self.0.as_str()))
//!     }
//! }
//!
//! # async fn demo(token: String) {
//! let controller = SessionController::new(FixedExchange(token), MemoryStore::new());
//!
//! // Rehydrate before evaluating any access decision.
//! let session = controller.restore().await;
//! assert!(!session.is_authenticated());
//!
//! if let Ok(identity) = controller.login("alice", "hunter2").await {
//!     println!("logged in as {} ({})", identity.label(), identity.role());
//! }
//! # }
//! ```

pub mod error;
pub mod exchange;
pub mod identity;
pub mod lifecycle;
pub mod role;
pub mod session;
pub mod store;
pub mod token;

// Re-export main types at crate root
pub use error::{ExchangeError, SessionError, StoreError, TokenError};
pub use exchange::CredentialExchange;
pub use identity::{Identity, SubjectId};
pub use lifecycle::SessionController;
pub use role::{Role, RoleFilter};
pub use session::{Session, SessionState};
pub use store::{CredentialStore, MemoryStore, PersistedRecord, StorageKey};
pub use token::{BearerToken, ClaimSet, RealmAccess, decode, decode_at};
