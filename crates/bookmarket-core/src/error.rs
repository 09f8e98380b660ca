//! Error types module
//!
//! All failures of the listing flow are unified under `ClientError`. Validation
//! errors are resolved locally and never reach the network; the remaining
//! variants are backend/network scoped and abort the flow with a single
//! user-visible message.

use std::io;

use crate::validation::ValidationErrors;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for rejected requests the user can fix
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "STORAGE_WRITE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the user can recover by retrying the submission from scratch
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// Single user-visible message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Upload ticket request failed: {0}")]
    UploadTicket(String),

    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Listing creation failed: {0}")]
    ListingCreate(String),

    #[error("Listing lookup failed: {0}")]
    ListingFetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<ValidationErrors> for ClientError {
    fn from(err: ValidationErrors) -> Self {
        ClientError::Validation(err)
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn client_error_static_metadata(
    err: &ClientError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        ClientError::Validation(_) => (
            "VALIDATION_ERROR",
            true,
            Some("Fix the highlighted fields and submit again"),
            LogLevel::Debug,
        ),
        ClientError::Auth(_) => (
            "AUTH_ERROR",
            true,
            Some("Sign in again and resubmit"),
            LogLevel::Warn,
        ),
        ClientError::UploadTicket(_) => (
            "UPLOAD_TICKET_ERROR",
            true,
            Some("Retry the submission"),
            LogLevel::Error,
        ),
        ClientError::StorageWrite(_) => (
            "STORAGE_WRITE_ERROR",
            true,
            Some("Retry the submission"),
            LogLevel::Error,
        ),
        ClientError::ListingCreate(_) => (
            "LISTING_CREATE_ERROR",
            true,
            Some("Check the listing details and retry"),
            LogLevel::Error,
        ),
        ClientError::ListingFetch(_) => (
            "LISTING_FETCH_ERROR",
            true,
            Some("Verify the listing ID exists"),
            LogLevel::Warn,
        ),
        ClientError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Check the environment configuration"),
            LogLevel::Error,
        ),
        ClientError::Io(_) => (
            "IO_ERROR",
            true,
            Some("Check that the image files exist and are readable"),
            LogLevel::Warn,
        ),
    }
}

impl ClientError {
    /// True for failures detected before any network call.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::Config(_) | ClientError::Io(_)
        )
    }
}

impl ErrorMetadata for ClientError {
    fn error_code(&self) -> &'static str {
        client_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        client_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        client_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        client_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            ClientError::Validation(errors) => errors
                .first()
                .map(|(_, message)| message.to_string())
                .unwrap_or_else(|| "The listing has invalid fields".to_string()),
            ClientError::Auth(_) => "Please log in again.".to_string(),
            ClientError::UploadTicket(_) => "Could not prepare the image upload".to_string(),
            ClientError::StorageWrite(_) => "Failed to upload an image".to_string(),
            ClientError::ListingCreate(_) => "Failed to create the listing".to_string(),
            ClientError::ListingFetch(ref msg) => msg.clone(),
            ClientError::Config(ref msg) => msg.clone(),
            ClientError::Io(ref err) => format!("Could not read file: {}", err),
        }
    }
}
