//! Route requirement declarations.
//!
//! Each view declares what it needs from the session; the decision
//! function in [`crate::decision`] is the sole arbiter consulted before
//! rendering.

use amber_vault_session::Role;

/// What a route requires from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequirement {
    /// Whether the route needs a logged-in user. Public-only routes (the
    /// login page) set this to false and bounce authenticated users to
    /// their home.
    pub require_auth: bool,
    /// Roles allowed to view the route. Empty means any authenticated
    /// role.
    pub allowed_roles: Vec<Role>,
}

impl RouteRequirement {
    /// A public-only route, such as the login page.
    #[must_use]
    pub fn public_only() -> Self {
        Self {
            require_auth: false,
            allowed_roles: Vec::new(),
        }
    }

    /// A route for any authenticated user.
    #[must_use]
    pub fn authenticated() -> Self {
        Self {
            require_auth: true,
            allowed_roles: Vec::new(),
        }
    }

    /// A route restricted to the given roles.
    #[must_use]
    pub fn roles(allowed: impl Into<Vec<Role>>) -> Self {
        Self {
            require_auth: true,
            allowed_roles: allowed.into(),
        }
    }

    /// A route restricted to administrators.
    #[must_use]
    pub fn admin_only() -> Self {
        Self::roles(vec![Role::Admin])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_only_requires_nothing() {
        let req = RouteRequirement::public_only();
        assert!(!req.require_auth);
        assert!(req.allowed_roles.is_empty());
    }

    #[test]
    fn authenticated_requires_login_any_role() {
        let req = RouteRequirement::authenticated();
        assert!(req.require_auth);
        assert!(req.allowed_roles.is_empty());
    }

    #[test]
    fn admin_only_restricts_roles() {
        let req = RouteRequirement::admin_only();
        assert!(req.require_auth);
        assert_eq!(req.allowed_roles, vec![Role::Admin]);
    }
}
