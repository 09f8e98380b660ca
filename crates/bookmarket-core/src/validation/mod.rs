//! Validation modules

pub mod errors;
pub mod listing;

pub use errors::ValidationErrors;
pub use listing::{parse_price, validate_draft, validate_field, FieldRule, LISTING_RULES};
