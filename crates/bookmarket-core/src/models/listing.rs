use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::draft::{AgeBracket, BookCondition};

/// Body of `POST /books`: validated draft fields plus ordered image references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    pub author: String,
    pub mrp: Decimal,
    pub asking_price: Decimal,
    pub age: AgeBracket,
    pub condition: BookCondition,
    pub category: String,
    pub description: String,
    pub location: String,
    pub image_urls: Vec<String>,
}

/// Listing persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Backend-generated identifier
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    pub mrp: Decimal,
    pub asking_price: Decimal,
    pub age: AgeBracket,
    pub condition: BookCondition,
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// Seller identity as recorded by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_accepts_mongo_style_id() {
        let listing: Listing = serde_json::from_value(serde_json::json!({
            "_id": "66b1f0c2a1",
            "title": "Dune",
            "author": "Herbert",
            "mrp": 500,
            "askingPrice": 300.5,
            "age": "1-3 years",
            "condition": "Good",
            "category": "Fiction",
            "description": "A 21+ character description here",
            "location": "Pune",
            "imageUrls": ["https://b.s3.ap-south-1.amazonaws.com/books/1.png"],
            "createdAt": "2026-10-18T09:30:00Z"
        }))
        .unwrap();

        assert_eq!(listing.id, "66b1f0c2a1");
        assert_eq!(listing.mrp, Decimal::from(500));
        assert_eq!(listing.asking_price, Decimal::new(3005, 1));
        assert_eq!(listing.image_urls.len(), 1);
        assert!(listing.seller.is_none());
        assert!(listing.created_at.is_some());
    }

    #[test]
    fn new_listing_serializes_camel_case_numbers() {
        let body = NewListing {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            mrp: Decimal::from(500),
            asking_price: Decimal::from(300),
            age: AgeBracket::OneToThreeYears,
            condition: BookCondition::Good,
            category: "Fiction".to_string(),
            description: "A 21+ character description here".to_string(),
            location: "Pune".to_string(),
            image_urls: vec!["https://x/1.png".to_string()],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["askingPrice"], serde_json::json!(300.0));
        assert_eq!(value["age"], "1-3 years");
        assert_eq!(value["imageUrls"][0], "https://x/1.png");
    }
}
