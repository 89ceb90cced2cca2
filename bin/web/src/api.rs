//! Authenticated HTTP client for the banking API.

use amber_vault_session::{BearerToken, SubjectId};
use serde::de::DeserializeOwned;

use crate::types::{ApiError, ApiResponse, BankAccount, UserProfile};

/// Thin client that unwraps response envelopes and attaches the bearer
/// credential when one is present.
pub struct ApiClient {
    base_url: String,
    token: Option<BearerToken>,
    http: reqwest::Client,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: String, token: Option<BearerToken>) -> Self {
        Self {
            base_url,
            token,
            http: reqwest::Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut request = self.http.get(format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.as_str());
        }
        let response = request.send().await.map_err(|err| ApiError::Transport {
            details: err.to_string(),
        })?;
        let envelope: ApiResponse<T> =
            response.json().await.map_err(|err| ApiError::Decode {
                details: err.to_string(),
            })?;
        envelope.into_result()
    }

    /// Fetches the profile of the given account holder.
    pub async fn fetch_profile(&self, subject: &SubjectId) -> Result<UserProfile, ApiError> {
        self.get_json(&format!("/users/{}", subject.as_str())).await
    }

    /// Fetches the bank accounts of the given account holder.
    pub async fn fetch_accounts(
        &self,
        subject: &SubjectId,
    ) -> Result<Vec<BankAccount>, ApiError> {
        self.get_json(&format!("/users/{}/accounts", subject.as_str()))
            .await
    }
}
