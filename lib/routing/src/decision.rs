//! The access decision function.
//!
//! A pure function from (session snapshot, route requirement) to an
//! allow/redirect verdict. It has no side effects, never errors, and must
//! be re-evaluated on every navigation and every session change.

use amber_vault_session::Session;

use crate::paths::RoutePaths;
use crate::requirement::RouteRequirement;

/// The verdict for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// The session outcome is not yet known; render a loading placeholder.
    /// Never fall through to allow or deny from here.
    Pending,
    /// Render the requested view.
    Allow,
    /// Navigate elsewhere instead.
    Redirect {
        /// Where to go.
        path: String,
        /// The originally requested path, carried for post-login return.
        return_to: Option<String>,
    },
}

impl AccessDecision {
    fn redirect(path: &str) -> Self {
        Self::Redirect {
            path: path.to_string(),
            return_to: None,
        }
    }

    fn redirect_with_return(path: &str, requested: &str) -> Self {
        Self::Redirect {
            path: path.to_string(),
            return_to: Some(requested.to_string()),
        }
    }
}

/// Decides whether the session may view the route at `requested`.
///
/// Rules, in order: loading sessions are `Pending`; unauthenticated
/// sessions on protected routes go to login (carrying `requested` for the
/// post-login return); authenticated sessions on public-only routes go to
/// their role's home; disallowed roles go to their own home; everything
/// else is allowed. Unknown situations always degrade to a defined path
/// rather than erroring.
#[must_use]
pub fn decide(
    session: &Session,
    requirement: &RouteRequirement,
    requested: &str,
    paths: &RoutePaths,
) -> AccessDecision {
    if session.is_loading() {
        return AccessDecision::Pending;
    }

    if requirement.require_auth && !session.is_authenticated() {
        return AccessDecision::redirect_with_return(&paths.login, requested);
    }

    if !requirement.require_auth && session.is_authenticated() {
        let home = session
            .identity()
            .map(|identity| paths.home_for(identity.role()))
            .unwrap_or(&paths.default_home);
        return AccessDecision::redirect(home);
    }

    if !requirement.allowed_roles.is_empty() {
        match session.identity() {
            Some(identity) if requirement.allowed_roles.contains(&identity.role()) => {}
            Some(identity) => {
                tracing::debug!(
                    role = %identity.role(),
                    requested = requested,
                    "role not allowed, redirecting home"
                );
                return AccessDecision::redirect(paths.home_for(identity.role()));
            }
            // No identity to map to a home.
            None => return AccessDecision::redirect(&paths.unauthorized),
        }
    }

    AccessDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use amber_vault_session::{
        CredentialExchange, ExchangeError, BearerToken, MemoryStore, Role, SessionController,
        StorageKey,
    };
    use async_trait::async_trait;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::{Duration, Utc};

    struct NoExchange;

    #[async_trait(?Send)]
    impl CredentialExchange for NoExchange {
        async fn exchange(&self, _: &str, _: &str) -> Result<BearerToken, ExchangeError> {
            Err(ExchangeError::Unreachable {
                details: "not used".to_string(),
            })
        }
    }

    fn forge_token(subject: &str, roles: &[&str]) -> String {
        let now = Utc::now();
        let payload = serde_json::json!({
            "sub": subject,
            "iat": now.timestamp(),
            "exp": (now + Duration::hours(1)).timestamp(),
            "jti": format!("jti-{subject}"),
            "iss": "https://id.amber-vault.test/realms/banking",
            "scope": "openid",
            "realm_access": { "roles": roles },
        });
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.sig")
    }

    async fn session_with_role(role: Role) -> Session {
        let roles: &[&str] = match role {
            Role::Admin => &["ADMIN"],
            Role::User => &["USER"],
        };
        let store = MemoryStore::new();
        store.seed(StorageKey::Credential, &forge_token("subj", roles), None);
        SessionController::new(NoExchange, store).restore().await
    }

    async fn anonymous_session() -> Session {
        SessionController::new(NoExchange, MemoryStore::new())
            .restore()
            .await
    }

    fn paths() -> RoutePaths {
        RoutePaths::default()
    }

    #[tokio::test]
    async fn loading_session_is_pending() {
        let session = Session::starting();
        assert_eq!(
            decide(&session, &RouteRequirement::authenticated(), "/user/home", &paths()),
            AccessDecision::Pending
        );
        assert_eq!(
            decide(&session, &RouteRequirement::public_only(), "/login", &paths()),
            AccessDecision::Pending
        );
    }

    #[tokio::test]
    async fn unauthenticated_on_protected_route_goes_to_login() {
        let session = anonymous_session().await;
        assert_eq!(
            decide(&session, &RouteRequirement::admin_only(), "/admin/home", &paths()),
            AccessDecision::Redirect {
                path: "/login".to_string(),
                return_to: Some("/admin/home".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn authenticated_admin_on_public_route_goes_home() {
        let session = session_with_role(Role::Admin).await;
        assert_eq!(
            decide(&session, &RouteRequirement::public_only(), "/login", &paths()),
            AccessDecision::Redirect {
                path: "/admin/home".to_string(),
                return_to: None,
            }
        );
    }

    #[tokio::test]
    async fn authenticated_user_on_public_route_goes_home() {
        let session = session_with_role(Role::User).await;
        assert_eq!(
            decide(&session, &RouteRequirement::public_only(), "/login", &paths()),
            AccessDecision::Redirect {
                path: "/user/home".to_string(),
                return_to: None,
            }
        );
    }

    #[tokio::test]
    async fn disallowed_role_is_sent_to_its_own_home() {
        let session = session_with_role(Role::User).await;
        assert_eq!(
            decide(&session, &RouteRequirement::admin_only(), "/admin/home", &paths()),
            AccessDecision::Redirect {
                path: "/user/home".to_string(),
                return_to: None,
            }
        );
    }

    #[tokio::test]
    async fn allowed_role_passes() {
        let session = session_with_role(Role::Admin).await;
        assert_eq!(
            decide(&session, &RouteRequirement::admin_only(), "/admin/home", &paths()),
            AccessDecision::Allow
        );
        assert_eq!(
            decide(&session, &RouteRequirement::authenticated(), "/user/home", &paths()),
            AccessDecision::Allow
        );
    }

    #[tokio::test]
    async fn anonymous_on_open_route_passes() {
        let session = anonymous_session().await;
        assert_eq!(
            decide(&session, &RouteRequirement::public_only(), "/login", &paths()),
            AccessDecision::Allow
        );
    }

    #[tokio::test]
    async fn anonymous_on_role_restricted_open_route_is_unauthorized() {
        // A route that does not require auth but restricts roles has no
        // sensible home for an anonymous caller.
        let session = anonymous_session().await;
        let requirement = RouteRequirement {
            require_auth: false,
            allowed_roles: vec![Role::Admin],
        };
        // Anonymous: rule 3 does not fire, rule 4 has no identity.
        assert_eq!(
            decide(&session, &requirement, "/audit", &paths()),
            AccessDecision::Redirect {
                path: "/unauthorized".to_string(),
                return_to: None,
            }
        );
    }

    #[tokio::test]
    async fn decision_is_pure_given_identical_inputs() {
        let session = session_with_role(Role::User).await;
        let requirement = RouteRequirement::authenticated();
        let first = decide(&session, &requirement, "/user/home", &paths());
        let second = decide(&session, &requirement, "/user/home", &paths());
        assert_eq!(first, second);
    }
}
