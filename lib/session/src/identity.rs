//! Normalized user identity derived from a credential's claims.

use serde::{Deserialize, Serialize};

use crate::role::{Role, RoleFilter};
use crate::token::ClaimSet;

/// Unique identifier for a user, taken from the credential's subject claim.
///
/// Subject IDs are opaque strings assigned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a subject ID from a string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the subject ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SubjectId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Normalized, UI-facing user representation.
///
/// Derived deterministically from a [`ClaimSet`]; never mutated in place,
/// each login or rehydration replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Subject identifier from the credential.
    subject: SubjectId,
    /// The single resolved role backing this session.
    role: Role,
    /// Preferred display username, if the credential carried one.
    preferred_username: Option<String>,
    /// Full display name, if the credential carried one.
    display_name: Option<String>,
    /// Email address, if the credential carried one.
    email: Option<String>,
}

impl Identity {
    /// Derives an identity from a claim set using the default role filter.
    ///
    /// Pure and total: every valid claim set maps to exactly one identity.
    #[must_use]
    pub fn resolve(claims: &ClaimSet) -> Self {
        Self::resolve_with(claims, &RoleFilter::default())
    }

    /// Derives an identity from a claim set using a custom role filter.
    #[must_use]
    pub fn resolve_with(claims: &ClaimSet, filter: &RoleFilter) -> Self {
        Self {
            subject: SubjectId::from(claims.subject()),
            role: filter.select(claims.realm_roles()),
            preferred_username: claims.preferred_username().map(str::to_string),
            display_name: claims.display_name().map(str::to_string),
            email: claims.email().map(str::to_string),
        }
    }

    /// Returns the subject identifier.
    #[must_use]
    pub fn subject(&self) -> &SubjectId {
        &self.subject
    }

    /// Returns the resolved role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the preferred display username, if present.
    #[must_use]
    pub fn preferred_username(&self) -> Option<&str> {
        self.preferred_username.as_deref()
    }

    /// Returns the full display name, if present.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the email address, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the best available label for greeting the user.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.preferred_username.as_deref())
            .unwrap_or_else(|| self.subject.as_str())
    }
}
