//! Response bodies of the shortener API, one type per endpoint.
//!
//! Bodies are decoded in two steps so that "not JSON at all" and "JSON, but
//! not what this endpoint promises" stay distinguishable in test output.

use crate::domain::BearerToken;
use crate::error::HarnessError;
use serde::de::DeserializeOwned;
use serde_aux::field_attributes::deserialize_string_from_number;

/// Read the whole body of `response` and decode it as `T`.
pub async fn parse_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, HarnessError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)
        .map_err(|source| HarnessError::InvalidJson { status, source })?;
    serde_json::from_value(value).map_err(|source| HarnessError::UnexpectedShape {
        status,
        expected: std::any::type_name::<T>(),
        source,
    })
}

/// What every error response carries.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Successful responses wrap their payload in `data`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserSummary {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// `POST /auth/register` puts the user next to the message, not under `data`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

/// `data` of `POST /auth/login`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginData {
    pub token: BearerToken,
    pub user: UserSummary,
}

/// A link as the server returns it.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LinkData {
    #[serde(deserialize_with = "deserialize_string_from_number")]
    pub id: String,
    pub original_url: String,
    pub short_code: String,
    pub title: String,
}

impl LinkData {
    /// Short codes are exactly five ASCII letters or digits.
    pub fn has_valid_short_code(&self) -> bool {
        self.short_code.len() == 5 && self.short_code.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

/// `GET /links`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LinkList {
    pub message: String,
    pub count: usize,
    pub data: Vec<LinkData>,
}

/// `GET /health`.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct HealthStatus {
    pub service: String,
    pub status: String,
}
