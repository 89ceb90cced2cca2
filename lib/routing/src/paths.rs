//! Role-to-path configuration.

use amber_vault_session::Role;
use serde::Deserialize;

/// Fixed navigation targets, including the role → home mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoutePaths {
    /// The login entry point.
    #[serde(default = "default_login")]
    pub login: String,
    /// Shown when no sensible home exists for the caller.
    #[serde(default = "default_unauthorized")]
    pub unauthorized: String,
    /// Home for administrators.
    #[serde(default = "default_admin_home")]
    pub admin_home: String,
    /// Home for standard users.
    #[serde(default = "default_user_home")]
    pub user_home: String,
    /// Home for anything the role mapping does not cover.
    #[serde(default = "default_user_home")]
    pub default_home: String,
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_unauthorized() -> String {
    "/unauthorized".to_string()
}

fn default_admin_home() -> String {
    "/admin/home".to_string()
}

fn default_user_home() -> String {
    "/user/home".to_string()
}

impl RoutePaths {
    /// Returns the home path for a role.
    #[must_use]
    pub fn home_for(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin_home,
            Role::User => &self.user_home,
        }
    }
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: default_login(),
            unauthorized: default_unauthorized(),
            admin_home: default_admin_home(),
            user_home: default_user_home(),
            default_home: default_user_home(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_match_documented_mapping() {
        let paths = RoutePaths::default();
        assert_eq!(paths.login, "/login");
        assert_eq!(paths.unauthorized, "/unauthorized");
        assert_eq!(paths.home_for(Role::Admin), "/admin/home");
        assert_eq!(paths.home_for(Role::User), "/user/home");
        assert_eq!(paths.default_home, "/user/home");
    }

    #[test]
    fn paths_deserialize_with_defaults() {
        let paths: RoutePaths =
            serde_json::from_str(r#"{"admin_home": "/back-office"}"#).expect("deserialize");
        assert_eq!(paths.home_for(Role::Admin), "/back-office");
        assert_eq!(paths.login, "/login");
    }
}
