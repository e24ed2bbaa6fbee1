//! Reqwest-backed client for the remote user directory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::models::User;

use super::ApiError;

/// Default base URL for the public user directory
const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// HTTP request timeout in seconds.
/// Bounds how long a fetch can hold the directory in a loading state.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Remote directory of users. Implementations other than the HTTP client
/// exist only in tests.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<User>>;
}

/// API client for the user directory.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
}

impl DirectoryClient {
    /// Create a client against the default public directory
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against an alternate base URL (config override, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }
}

#[async_trait]
impl DirectoryService for DirectoryClient {
    async fn fetch_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/users", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse user list from {}", url))
    }
}
