use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::image::ImageFile;
use super::listing::NewListing;

/// Physical condition of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookCondition {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Like New")]
    LikeNew,
    #[default]
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Fair")]
    Fair,
    #[serde(rename = "Poor")]
    Poor,
}

impl BookCondition {
    pub const ALL: [BookCondition; 5] = [
        BookCondition::New,
        BookCondition::LikeNew,
        BookCondition::Good,
        BookCondition::Fair,
        BookCondition::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookCondition::New => "New",
            BookCondition::LikeNew => "Like New",
            BookCondition::Good => "Good",
            BookCondition::Fair => "Fair",
            BookCondition::Poor => "Poor",
        }
    }
}

impl fmt::Display for BookCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown book condition: {}", s))
    }
}

/// How long the seller has owned the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "Less than 1 year")]
    UnderOneYear,
    #[default]
    #[serde(rename = "1-3 years")]
    OneToThreeYears,
    #[serde(rename = "3-5 years")]
    ThreeToFiveYears,
    #[serde(rename = "5+ years")]
    OverFiveYears,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 4] = [
        AgeBracket::UnderOneYear,
        AgeBracket::OneToThreeYears,
        AgeBracket::ThreeToFiveYears,
        AgeBracket::OverFiveYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::UnderOneYear => "Less than 1 year",
            AgeBracket::OneToThreeYears => "1-3 years",
            AgeBracket::ThreeToFiveYears => "3-5 years",
            AgeBracket::OverFiveYears => "5+ years",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeBracket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown book age: {}", s))
    }
}

/// Raw, unvalidated listing input as entered by the seller.
///
/// Prices are kept as text so that "not a number" can be reported per field.
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    pub title: String,
    pub author: String,
    /// List price (MRP)
    pub mrp: String,
    pub asking_price: String,
    pub condition: String,
    pub age: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub images: Vec<ImageFile>,
}

/// Validated listing fields without the images.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetails {
    pub title: String,
    pub author: String,
    pub mrp: Decimal,
    pub asking_price: Decimal,
    pub condition: BookCondition,
    pub age: AgeBracket,
    pub category: String,
    pub description: String,
    pub location: String,
}

impl ListingDetails {
    /// Attach the resolved public image references, producing the creation request.
    pub fn with_image_urls(self, image_urls: Vec<String>) -> NewListing {
        NewListing {
            title: self.title,
            author: self.author,
            mrp: self.mrp,
            asking_price: self.asking_price,
            age: self.age,
            condition: self.condition,
            category: self.category,
            description: self.description,
            location: self.location,
            image_urls,
        }
    }

    pub fn price_summary(&self) -> PriceSummary {
        PriceSummary::new(self.mrp, self.asking_price)
    }
}

/// A draft that passed validation. Only `validate_draft` constructs one.
#[derive(Debug, Clone)]
pub struct ValidatedDraft {
    pub(crate) details: ListingDetails,
    pub(crate) images: Vec<ImageFile>,
}

impl ValidatedDraft {
    pub fn details(&self) -> &ListingDetails {
        &self.details
    }

    pub fn images(&self) -> &[ImageFile] {
        &self.images
    }

    pub fn into_parts(self) -> (ListingDetails, Vec<ImageFile>) {
        (self.details, self.images)
    }
}

/// What buyers save relative to the list price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceSummary {
    pub savings: Decimal,
    pub percent_off: u32,
}

impl PriceSummary {
    pub fn new(mrp: Decimal, asking_price: Decimal) -> Self {
        let savings = (mrp - asking_price).max(Decimal::ZERO);
        let percent_off = if mrp > Decimal::ZERO {
            (savings / mrp * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u32()
                .unwrap_or(0)
        } else {
            0
        };
        Self {
            savings,
            percent_off,
        }
    }

    pub fn is_deal(&self) -> bool {
        self.savings > Decimal::ZERO
    }

    /// Seller-facing summary line, if there is anything to save.
    pub fn message(&self) -> Option<String> {
        self.is_deal().then(|| {
            format!(
                "Great deal! Buyers save ₹{} ({}% off MRP)",
                self.savings.normalize(),
                self.percent_off
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_parses_case_insensitively() {
        assert_eq!("like new".parse::<BookCondition>(), Ok(BookCondition::LikeNew));
        assert_eq!(" Good ".parse::<BookCondition>(), Ok(BookCondition::Good));
        assert!("Mint".parse::<BookCondition>().is_err());
    }

    #[test]
    fn age_bracket_round_trips_display() {
        for age in AgeBracket::ALL {
            assert_eq!(age.to_string().parse::<AgeBracket>(), Ok(age));
        }
        assert_eq!(
            serde_json::to_string(&AgeBracket::OneToThreeYears).unwrap(),
            "\"1-3 years\""
        );
    }

    #[test]
    fn price_summary_savings() {
        let summary = PriceSummary::new(Decimal::from(500), Decimal::from(300));
        assert_eq!(summary.savings, Decimal::from(200));
        assert_eq!(summary.percent_off, 40);
        assert_eq!(
            summary.message().as_deref(),
            Some("Great deal! Buyers save ₹200 (40% off MRP)")
        );
    }

    #[test]
    fn price_summary_rounds_half_up() {
        // 1/8 = 12.5% rounds to 13
        let summary = PriceSummary::new(Decimal::from(8), Decimal::from(7));
        assert_eq!(summary.percent_off, 13);
    }

    #[test]
    fn price_summary_no_deal() {
        let summary = PriceSummary::new(Decimal::from(300), Decimal::from(500));
        assert_eq!(summary.savings, Decimal::ZERO);
        assert!(!summary.is_deal());
        assert!(summary.message().is_none());
    }
}
