//! Credential exchange against the banking backend.
//!
//! Implements [`CredentialExchange`] over `POST {base}/auth/token`,
//! mapping HTTP rejections to [`ExchangeError::InvalidCredentials`]
//! and transport failures to [`ExchangeError::Unreachable`].

use amber_vault_session::{BearerToken, CredentialExchange, ExchangeError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use crate::types::{ApiResponse, AuthResult, SUCCESS_CODE};

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Exchanges a username and password for a bearer credential over the
/// backend's REST API.
pub struct RestCredentialExchange {
    base_url: String,
    http: reqwest::Client,
}

impl RestCredentialExchange {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait(?Send)]
impl CredentialExchange for RestCredentialExchange {
    async fn exchange(
        &self,
        username: &str,
        password: &str,
    ) -> Result<BearerToken, ExchangeError> {
        let response = self
            .http
            .post(format!("{}/auth/token", self.base_url))
            .json(&TokenRequest { username, password })
            .send()
            .await
            .map_err(|err| ExchangeError::Unreachable {
                details: err.to_string(),
            })?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(ExchangeError::InvalidCredentials);
        }

        let envelope: ApiResponse<AuthResult> =
            response
                .json()
                .await
                .map_err(|err| ExchangeError::Unreachable {
                    details: format!("malformed token response: {err}"),
                })?;
        parse_token_response(envelope)
    }
}

/// Pulls the bearer credential out of a token-endpoint envelope.
///
/// A non-success code or an empty token both mean the backend refused
/// the credentials, regardless of the HTTP status it chose.
fn parse_token_response(
    envelope: ApiResponse<AuthResult>,
) -> Result<BearerToken, ExchangeError> {
    if envelope.code != SUCCESS_CODE {
        return Err(ExchangeError::InvalidCredentials);
    }
    match envelope.result {
        Some(auth) if !auth.access_token.is_empty() => {
            Ok(BearerToken::new(auth.access_token))
        }
        _ => Err(ExchangeError::InvalidCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(code: i32, token: Option<&str>) -> ApiResponse<AuthResult> {
        ApiResponse {
            code,
            message: None,
            result: token.map(|t| AuthResult {
                access_token: t.to_string(),
                token_type: Some("Bearer".to_string()),
                expires_in: Some(300),
                scope: Some("profile email".to_string()),
            }),
        }
    }

    #[test]
    fn success_envelope_yields_token() {
        let token = parse_token_response(envelope(1000, Some("header.payload.sig")))
            .expect("token");
        assert_eq!(token.as_str(), "header.payload.sig");
    }

    #[test]
    fn failure_code_is_invalid_credentials() {
        let err = parse_token_response(envelope(4010, None)).expect_err("rejected");
        assert_eq!(err, ExchangeError::InvalidCredentials);
    }

    #[test]
    fn success_code_without_token_is_invalid_credentials() {
        let err = parse_token_response(envelope(1000, None)).expect_err("rejected");
        assert_eq!(err, ExchangeError::InvalidCredentials);
    }

    #[test]
    fn empty_token_is_invalid_credentials() {
        let err = parse_token_response(envelope(1000, Some(""))).expect_err("rejected");
        assert_eq!(err, ExchangeError::InvalidCredentials);
    }
}
