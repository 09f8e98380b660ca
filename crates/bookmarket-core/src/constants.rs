//! Limits shared by validation and the upload flow.

/// Maximum number of images attached to one listing.
pub const MAX_IMAGES: usize = 5;

/// Per-image size ceiling (2 MiB).
pub const MAX_IMAGE_SIZE_BYTES: usize = 2 * 1024 * 1024;

/// Minimum description length, counted in characters after trimming.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Minimum title and author length, counted in characters after trimming.
pub const MIN_NAME_CHARS: usize = 3;

/// Declared content types accepted for listing images.
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &["image/jpg", "image/jpeg", "image/png", "image/webp"];

pub const DEFAULT_API_URL: &str = "http://localhost:5001/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_UPLOAD_CONCURRENCY: usize = 1;
