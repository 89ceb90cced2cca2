//! Wire types shared with the banking backend.
//!
//! Every backend endpoint wraps its payload in the same envelope:
//! a numeric `code` (1000 on success), a human-readable `message`,
//! and the payload under `result`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Envelope code the backend uses for successful responses.
pub const SUCCESS_CODE: i32 = 1000;

/// The response envelope every backend endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub code: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwraps the envelope, turning non-success codes and missing
    /// payloads into [`ApiError::Backend`].
    pub fn into_result(self) -> Result<T, ApiError> {
        if self.code != SUCCESS_CODE {
            return Err(ApiError::Backend {
                code: self.code,
                message: self
                    .message
                    .unwrap_or_else(|| "request rejected".to_string()),
            });
        }
        self.result.ok_or(ApiError::Backend {
            code: self.code,
            message: "success envelope without a result".to_string(),
        })
    }
}

/// Failure modes when calling the banking API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-success envelope.
    Backend { code: i32, message: String },
    /// The request never produced a usable response.
    Transport { details: String },
    /// The response body did not match the expected shape.
    Decode { details: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend { code, message } => {
                write!(f, "backend error {code}: {message}")
            }
            Self::Transport { details } => write!(f, "request failed: {details}"),
            Self::Decode { details } => write!(f, "unexpected response: {details}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Payload of a successful credential exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResult {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Account holder profile as served by `/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A single bank account belonging to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    pub account_number: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub currency: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product category of a [`BankAccount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    Savings,
    Checking,
    Credit,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Savings => "Savings",
            Self::Checking => "Checking",
            Self::Credit => "Credit",
        };
        f.write_str(label)
    }
}
