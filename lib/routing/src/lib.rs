//! Route requirements and access decisions for the amber-vault banking
//! front-end.
//!
//! Views declare what they need ([`RouteRequirement`]); the pure
//! [`decide`] function turns a session snapshot plus that declaration into
//! an [`AccessDecision`]. Path targets, including the role → home mapping,
//! live in [`RoutePaths`].
//!
//! # Example
//!
//! ```
//! use amber_vault_routing::{AccessDecision, RoutePaths, RouteRequirement, decide};
//! use amber_vault_session::Session;
//!
//! let paths = RoutePaths::default();
//! let session = Session::starting();
//!
//! // Before rehydration finishes, every route is pending.
//! assert_eq!(
//!     decide(&session, &RouteRequirement::authenticated(), "/user/home", &paths),
//!     AccessDecision::Pending,
//! );
//! ```

mod decision;
mod paths;
mod requirement;

pub use decision::{AccessDecision, decide};
pub use paths::RoutePaths;
pub use requirement::RouteRequirement;
