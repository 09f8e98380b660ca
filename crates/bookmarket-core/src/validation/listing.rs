//! Listing draft schema
//!
//! The schema is an ordered list of named field rules. A field reports the
//! message of the first rule it fails; rules for the same field are listed in
//! evaluation order. Validation is a pure function of the draft.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::constants::{
    MAX_IMAGES, MAX_IMAGE_SIZE_BYTES, MIN_DESCRIPTION_CHARS, MIN_NAME_CHARS, SUPPORTED_IMAGE_TYPES,
};
use crate::models::{AgeBracket, BookCondition, ListingDetails, ListingDraft, ValidatedDraft};

use super::errors::ValidationErrors;

/// One named predicate over a draft. `check` returns true when the rule holds.
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub message: &'static str,
    pub check: fn(&ListingDraft) -> bool,
}

impl std::fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish()
    }
}

/// Parse a positive-or-not price from user input. Accepts plain and scientific notation.
pub fn parse_price(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .ok()
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}

fn min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

// Numeric rules pass on unparsable input; the preceding "is a number" rule reports it.
fn positive(value: &str) -> bool {
    parse_price(value).map_or(true, |p| p > Decimal::ZERO)
}

fn asking_below_mrp(draft: &ListingDraft) -> bool {
    match (parse_price(&draft.mrp), parse_price(&draft.asking_price)) {
        (Some(mrp), Some(asking)) => asking < mrp,
        _ => true,
    }
}

fn images_within_size(draft: &ListingDraft) -> bool {
    draft
        .images
        .iter()
        .all(|image| image.size() <= MAX_IMAGE_SIZE_BYTES)
}

fn images_supported(draft: &ListingDraft) -> bool {
    draft
        .images
        .iter()
        .all(|image| SUPPORTED_IMAGE_TYPES.contains(&image.content_type.as_str()))
}

/// Rules in evaluation order.
pub static LISTING_RULES: &[FieldRule] = &[
    FieldRule {
        field: "title",
        message: "Title is required",
        check: |d| present(&d.title),
    },
    FieldRule {
        field: "title",
        message: "Title must be at least 3 characters",
        check: |d| min_chars(&d.title, MIN_NAME_CHARS),
    },
    FieldRule {
        field: "author",
        message: "Author is required",
        check: |d| present(&d.author),
    },
    FieldRule {
        field: "author",
        message: "Author must be at least 3 characters",
        check: |d| min_chars(&d.author, MIN_NAME_CHARS),
    },
    FieldRule {
        field: "mrp",
        message: "MRP is required",
        check: |d| present(&d.mrp),
    },
    FieldRule {
        field: "mrp",
        message: "MRP must be a number",
        check: |d| parse_price(&d.mrp).is_some(),
    },
    FieldRule {
        field: "mrp",
        message: "MRP must be positive",
        check: |d| positive(&d.mrp),
    },
    FieldRule {
        field: "askingPrice",
        message: "Asking price is required",
        check: |d| present(&d.asking_price),
    },
    FieldRule {
        field: "askingPrice",
        message: "Price must be a number",
        check: |d| parse_price(&d.asking_price).is_some(),
    },
    FieldRule {
        field: "askingPrice",
        message: "Price must be positive",
        check: |d| positive(&d.asking_price),
    },
    FieldRule {
        field: "askingPrice",
        message: "Asking price cannot be more than MRP",
        check: asking_below_mrp,
    },
    FieldRule {
        field: "age",
        message: "Book age is required",
        check: |d| present(&d.age),
    },
    FieldRule {
        field: "age",
        message: "Unknown book age",
        check: |d| AgeBracket::from_str(&d.age).is_ok(),
    },
    FieldRule {
        field: "condition",
        message: "Book condition is required",
        check: |d| present(&d.condition),
    },
    FieldRule {
        field: "condition",
        message: "Unknown book condition",
        check: |d| BookCondition::from_str(&d.condition).is_ok(),
    },
    FieldRule {
        field: "category",
        message: "Category is required",
        check: |d| present(&d.category),
    },
    FieldRule {
        field: "description",
        message: "Description is required",
        check: |d| present(&d.description),
    },
    FieldRule {
        field: "description",
        message: "Description must be at least 20 characters",
        check: |d| min_chars(&d.description, MIN_DESCRIPTION_CHARS),
    },
    FieldRule {
        field: "location",
        message: "Location is required",
        check: |d| present(&d.location),
    },
    FieldRule {
        field: "images",
        message: "Please upload at least one image",
        check: |d| !d.images.is_empty(),
    },
    FieldRule {
        field: "images",
        message: "You can upload at most 5 images",
        check: |d| d.images.len() <= MAX_IMAGES,
    },
    FieldRule {
        field: "images",
        message: "A file is too large",
        check: images_within_size,
    },
    FieldRule {
        field: "images",
        message: "Unsupported file format",
        check: images_supported,
    },
];

fn collect_errors(draft: &ListingDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for rule in LISTING_RULES {
        if !errors.contains(rule.field) && !(rule.check)(draft) {
            errors.insert(rule.field, rule.message);
        }
    }
    errors
}

/// First failing message for a single field, for per-field feedback while editing.
pub fn validate_field(draft: &ListingDraft, field: &str) -> Option<&'static str> {
    LISTING_RULES
        .iter()
        .filter(|rule| rule.field == field)
        .find(|rule| !(rule.check)(draft))
        .map(|rule| rule.message)
}

/// Validate a draft, producing typed fields or every failing field's first message.
pub fn validate_draft(draft: &ListingDraft) -> Result<ValidatedDraft, ValidationErrors> {
    let errors = collect_errors(draft);
    if !errors.is_empty() {
        tracing::debug!(fields = ?errors.fields(), "Listing draft failed validation");
        return Err(errors);
    }

    let (Some(mrp), Some(asking_price), Ok(condition), Ok(age)) = (
        parse_price(&draft.mrp),
        parse_price(&draft.asking_price),
        BookCondition::from_str(&draft.condition),
        AgeBracket::from_str(&draft.age),
    ) else {
        return Err(collect_errors(draft));
    };

    Ok(ValidatedDraft {
        details: ListingDetails {
            title: draft.title.trim().to_string(),
            author: draft.author.trim().to_string(),
            mrp,
            asking_price,
            condition,
            age,
            category: draft.category.trim().to_string(),
            description: draft.description.trim().to_string(),
            location: draft.location.trim().to_string(),
        },
        images: draft.images.clone(),
    })
}
