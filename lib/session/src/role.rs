//! Role types and the realm-role selection policy.
//!
//! The issuer attaches a list of realm roles to each credential. Most of
//! them are housekeeping roles every account carries (offline access,
//! authorization management, the realm default bundle); the client cares
//! only about the first entry that is not one of those.

use serde::{Deserialize, Serialize};

/// Normalized client role.
///
/// Exactly one role backs a session. Admins see the administration area,
/// users see their own accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Bank administrator.
    Admin,
    /// Standard banking customer.
    User,
}

impl Role {
    /// Parses a raw role name, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "USER" => Some(Self::User),
            _ => None,
        }
    }

    /// Returns true for the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the canonical uppercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy describing which raw realm roles are ignorable housekeeping
/// roles, and which role to fall back to when nothing else matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleFilter {
    /// Exact role names to skip.
    ignored: Vec<String>,
    /// Role name prefixes to skip (the realm default bundle is named
    /// `default-roles-<realm>`).
    ignored_prefixes: Vec<String>,
    /// Role assigned when no usable entry exists.
    fallback: Role,
}

impl RoleFilter {
    /// Creates a filter with explicit ignore lists and fallback.
    #[must_use]
    pub fn new(ignored: Vec<String>, ignored_prefixes: Vec<String>, fallback: Role) -> Self {
        Self {
            ignored,
            ignored_prefixes,
            fallback,
        }
    }

    /// Returns the fallback role.
    #[must_use]
    pub fn fallback(&self) -> Role {
        self.fallback
    }

    /// Returns true if `raw` is an ignorable housekeeping role.
    #[must_use]
    pub fn is_ignorable(&self, raw: &str) -> bool {
        self.ignored.iter().any(|r| r == raw)
            || self.ignored_prefixes.iter().any(|p| raw.starts_with(p.as_str()))
    }

    /// Selects the effective role from a raw realm-role list.
    ///
    /// Order-sensitive, first match wins: the first entry that is not
    /// ignorable determines the role. An entry that is not ignorable but
    /// also not a known role name still wins the selection and maps to the
    /// fallback, so a list carrying several roles silently resolves to one.
    #[must_use]
    pub fn select(&self, raw_roles: &[String]) -> Role {
        raw_roles
            .iter()
            .find(|raw| !self.is_ignorable(raw))
            .map(|raw| Role::parse(raw).unwrap_or(self.fallback))
            .unwrap_or(self.fallback)
    }
}

impl Default for RoleFilter {
    /// The issuer's standard housekeeping roles, with `USER` as fallback.
    fn default() -> Self {
        Self {
            ignored: vec![
                "offline_access".to_string(),
                "uma_authorization".to_string(),
            ],
            ignored_prefixes: vec!["default-roles".to_string()],
            fallback: Role::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("User"), Some(Role::User));
        assert_eq!(Role::parse("teller"), None);
    }

    #[test]
    fn role_serialization_format() {
        assert_eq!(
            serde_json::to_string(&Role::Admin).expect("serialize"),
            "\"ADMIN\""
        );
        assert_eq!(
            serde_json::to_string(&Role::User).expect("serialize"),
            "\"USER\""
        );

        let parsed: Role = serde_json::from_str("\"ADMIN\"").expect("deserialize");
        assert_eq!(parsed, Role::Admin);
    }

    #[test]
    fn select_skips_housekeeping_roles() {
        let filter = RoleFilter::default();
        assert_eq!(
            filter.select(&roles(&["offline_access", "ADMIN", "USER"])),
            Role::Admin
        );
    }

    #[test]
    fn select_is_order_sensitive() {
        let filter = RoleFilter::default();
        assert_eq!(
            filter.select(&roles(&["USER", "ADMIN"])),
            Role::User
        );
        assert_eq!(
            filter.select(&roles(&["ADMIN", "USER"])),
            Role::Admin
        );
    }

    #[test]
    fn select_skips_default_roles_bundle() {
        let filter = RoleFilter::default();
        assert_eq!(
            filter.select(&roles(&["default-roles-banking", "uma_authorization", "ADMIN"])),
            Role::Admin
        );
    }

    #[test]
    fn select_falls_back_on_empty_or_all_ignorable() {
        let filter = RoleFilter::default();
        assert_eq!(filter.select(&[]), Role::User);
        assert_eq!(
            filter.select(&roles(&["offline_access", "default-roles-banking"])),
            Role::User
        );
    }

    #[test]
    fn select_unknown_first_entry_maps_to_fallback() {
        // "teller" wins the selection but is not a known role.
        let filter = RoleFilter::default();
        assert_eq!(
            filter.select(&roles(&["teller", "ADMIN"])),
            Role::User
        );
    }

    #[test]
    fn custom_filter_is_honored() {
        let filter = RoleFilter::new(
            vec!["system".to_string()],
            vec![],
            Role::Admin,
        );
        assert_eq!(filter.select(&roles(&["system"])), Role::Admin);
        assert_eq!(filter.select(&roles(&["system", "USER"])), Role::User);
        assert!(filter.is_ignorable("system"));
        assert!(!filter.is_ignorable("default-roles-banking"));
    }
}
