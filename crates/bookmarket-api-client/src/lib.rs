//! HTTP client for the book marketplace backend.
//!
//! Provides a minimal client with bearer auth, generic JSON helpers, and the
//! listing flow built on them: pre-signed upload tickets, direct storage
//! writes, listing creation and the end-to-end submission. The CLI uses this
//! client directly.

pub mod listing;
pub mod session;
pub mod submit;
pub mod upload;

use bookmarket_core::{ClientConfig, ClientError, ClientResult, StorageLocation};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use session::{Credential, IdentityProvider, Session, StaticTokenProvider, UserIdentity};
pub use submit::SubmitOptions;

/// HTTP client for the marketplace API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage: StorageLocation,
}

impl ApiClient {
    pub fn new(base_url: String, storage: StorageLocation, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
        })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::new(
            config.api_url.clone(),
            config.storage_location(),
            config.http_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &StorageLocation {
        &self.storage
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(
        &self,
        request: reqwest::RequestBuilder,
        credential: &Credential,
    ) -> reqwest::RequestBuilder {
        request.bearer_auth(credential.token())
    }

    /// POST a JSON body with the bearer credential and deserialize the response.
    ///
    /// 401/403 map to `ClientError::Auth`; every other failure goes through `other`.
    pub async fn post_json<T, B>(
        &self,
        path: &str,
        body: &B,
        credential: &Credential,
        other: fn(String) -> ClientError,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.post(&url).json(body), credential);
        let response = request
            .send()
            .await
            .map_err(|e| other(format!("Failed to send request: {}", e)))?;
        read_json(response, other).await
    }

    /// GET with an optional credential and deserialize the response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: Option<&Credential>,
        other: fn(String) -> ClientError,
    ) -> ClientResult<T> {
        let url = self.build_url(path);
        let mut request = self.client.get(&url);
        if let Some(credential) = credential {
            request = self.apply_auth(request, credential);
        }
        let response = request
            .send()
            .await
            .map_err(|e| other(format!("Failed to send request: {}", e)))?;
        read_json(response, other).await
    }

    /// Raw client for requests that must not carry the bearer credential.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Map a non-success status to the error taxonomy.
pub(crate) fn status_error(
    status: StatusCode,
    body: &str,
    other: fn(String) -> ClientError,
) -> ClientError {
    let detail = format!("API request failed with status {}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Auth(detail),
        _ => other(detail),
    }
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    other: fn(String) -> ClientError,
) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(status_error(status, &error_text, other));
    }

    response
        .json()
        .await
        .map_err(|e| other(format!("Failed to parse response as JSON: {}", e)))
}

// Re-export domain types for convenience.
pub use bookmarket_core::{
    ImageFile, Listing, ListingDraft, NewListing, UploadTicket, UploadTicketRequest,
};
