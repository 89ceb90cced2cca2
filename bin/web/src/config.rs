//! Client configuration.
//!
//! The client is static WASM, so configuration is resolved at compile
//! time: `API_BASE_URL` can be injected through the build environment
//! and falls back to the local development backend.

use amber_vault_routing::RoutePaths;
use serde::Deserialize;

/// Settings the running client needs to talk to the backend and
/// navigate between pages.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the banking API, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Route targets used by access decisions.
    #[serde(default)]
    pub paths: RoutePaths,
}

impl ClientConfig {
    /// Resolves configuration for this build.
    #[must_use]
    pub fn load() -> Self {
        let api_base_url = option_env!("API_BASE_URL")
            .map(str::to_string)
            .unwrap_or_else(default_api_base_url);
        Self {
            api_base_url,
            paths: RoutePaths::default(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            paths: RoutePaths::default(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}
