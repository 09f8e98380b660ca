//! Shared fixtures for the API client integration tests.

#![allow(dead_code)]

use bookmarket_api_client::{ApiClient, Credential, ImageFile, ListingDraft};
use bookmarket_core::StorageLocation;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use std::time::Duration;

pub const TOKEN: &str = "test-id-token";
pub const BUCKET: &str = "book-images";
pub const REGION: &str = "ap-south-1";

pub fn client(server: &ServerGuard) -> ApiClient {
    ApiClient::new(
        server.url(),
        StorageLocation::new(BUCKET, REGION),
        Duration::from_secs(5),
    )
    .expect("client")
}

pub fn credential() -> Credential {
    Credential::new(TOKEN)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn public_url(key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", BUCKET, REGION, key)
}

pub fn image(name: &str, content_type: &str) -> ImageFile {
    ImageFile::new(name, content_type, format!("bytes-of-{}", name).into_bytes())
}

pub fn dune_draft() -> ListingDraft {
    ListingDraft {
        title: "Dune".to_string(),
        author: "Herbert".to_string(),
        mrp: "500".to_string(),
        asking_price: "300".to_string(),
        condition: "Good".to_string(),
        age: "1-3 years".to_string(),
        category: "Fiction".to_string(),
        description: "A 21+ character description here".to_string(),
        location: "Pune".to_string(),
        images: vec![image("dune.jpg", "image/jpeg")],
    }
}

/// Ticket endpoint answering requests for `content_type` with `key`,
/// pointing the write at `/storage/{key}` on the same server.
pub async fn mock_ticket(
    server: &mut ServerGuard,
    token: &str,
    content_type: &str,
    key: &str,
) -> Mock {
    let upload_url = format!("{}/storage/{}", server.url(), key);
    server
        .mock("POST", "/books/upload-url")
        .match_header("authorization", bearer(token).as_str())
        .match_body(Matcher::Json(json!({ "fileType": content_type })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "uploadUrl": upload_url, "key": key }).to_string())
        .expect(1)
        .create_async()
        .await
}

/// Storage write for `image` under `key`, answering `status`.
pub async fn mock_put(server: &mut ServerGuard, key: &str, image: &ImageFile, status: usize) -> Mock {
    let body = String::from_utf8(image.data.to_vec()).expect("utf8 fixture");
    server
        .mock("PUT", format!("/storage/{}", key).as_str())
        .match_header("content-type", image.content_type.as_str())
        .match_header("authorization", Matcher::Missing)
        .match_body(body.as_str())
        .with_status(status)
        .expect(1)
        .create_async()
        .await
}

/// Listing creation echoing the request with a generated `_id`.
pub async fn mock_create_listing(
    server: &mut ServerGuard,
    token: &str,
    image_urls: &[String],
) -> Mock {
    let id = uuid::Uuid::new_v4().simple().to_string();
    server
        .mock("POST", "/books")
        .match_header("authorization", bearer(token).as_str())
        .match_body(Matcher::PartialJson(json!({
            "title": "Dune",
            "askingPrice": 300.0,
            "imageUrls": image_urls,
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "_id": id,
                "title": "Dune",
                "author": "Herbert",
                "mrp": 500,
                "askingPrice": 300,
                "age": "1-3 years",
                "condition": "Good",
                "category": "Fiction",
                "description": "A 21+ character description here",
                "location": "Pune",
                "imageUrls": image_urls,
                "seller": "u1"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await
}

/// Mocks that fail the test if any request reaches the server.
pub async fn mock_no_requests(server: &mut ServerGuard) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for method in ["GET", "POST", "PUT"] {
        mocks.push(
            server
                .mock(method, Matcher::Any)
                .expect(0)
                .create_async()
                .await,
        );
    }
    mocks
}
