//! Bookmarket Core Library
//!
//! This crate provides the listing data contracts, the draft validation schema,
//! error types and configuration shared by the API client and the CLI.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_location;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorMetadata, LogLevel};
pub use models::{
    AgeBracket, BookCondition, ImageFile, Listing, ListingDraft, NewListing, PriceSummary,
    UploadTicket, UploadTicketRequest, ValidatedDraft,
};
pub use storage_location::StorageLocation;
pub use validation::{validate_draft, FieldRule, ValidationErrors};
