//! Configuration module
//!
//! Client configuration is read from the environment (after loading `.env`),
//! falling back to defaults, and validated before use.

use std::env;
use std::time::Duration;

use crate::constants::{DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_UPLOAD_CONCURRENCY};
use crate::storage_location::StorageLocation;

/// Client configuration for the marketplace backend and image storage.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend API base URL, e.g. `http://localhost:5001/api`
    pub api_url: String,
    pub s3_bucket: String,
    pub aws_region: String,
    pub s3_endpoint: Option<String>,
    pub http_timeout_secs: u64,
    /// Images uploaded concurrently; 1 keeps the sequential flow.
    pub upload_concurrency: usize,
    /// Bearer credential supplied through the environment (CLI use).
    pub id_token: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ClientConfig {
            api_url: var("BOOKMARKET_API_URL")
                .or_else(|| var("API_URL"))
                .unwrap_or_else(|| DEFAULT_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            s3_bucket: var("S3_BUCKET_NAME")
                .or_else(|| var("S3_BUCKET"))
                .unwrap_or_default(),
            aws_region: var("AWS_REGION")
                .or_else(|| var("S3_REGION"))
                .unwrap_or_default(),
            s3_endpoint: var("S3_ENDPOINT").filter(|s| !s.is_empty()),
            http_timeout_secs: var("BOOKMARKET_HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            upload_concurrency: var("BOOKMARKET_UPLOAD_CONCURRENCY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_UPLOAD_CONCURRENCY),
            id_token: var("BOOKMARKET_ID_TOKEN")
                .or_else(|| var("ID_TOKEN"))
                .filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "BOOKMARKET_API_URL must be an http(s) URL, got {}",
                self.api_url
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "BOOKMARKET_HTTP_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.upload_concurrency == 0 {
            return Err(anyhow::anyhow!(
                "BOOKMARKET_UPLOAD_CONCURRENCY must be at least 1"
            ));
        }

        Ok(())
    }

    /// Storage settings are only needed to resolve public URLs of uploads.
    pub fn validate_storage(&self) -> Result<(), anyhow::Error> {
        if self.s3_bucket.is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET_NAME must be set"));
        }

        if self.aws_region.is_empty() {
            return Err(anyhow::anyhow!("AWS_REGION or S3_REGION must be set"));
        }

        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn storage_location(&self) -> StorageLocation {
        let location = StorageLocation::new(&self.s3_bucket, &self.aws_region);
        match self.s3_endpoint {
            Some(ref endpoint) => location.with_endpoint(endpoint),
            None => location,
        }
    }
}
