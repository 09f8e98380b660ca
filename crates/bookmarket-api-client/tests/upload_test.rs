mod helpers;

use bookmarket_api_client::ImageFile;
use bookmarket_core::ClientError;
use helpers::*;
use mockito::{Matcher, Server};
use serde_json::json;

fn three_images() -> Vec<ImageFile> {
    vec![
        image("a.png", "image/png"),
        image("b.jpg", "image/jpeg"),
        image("c.webp", "image/webp"),
    ]
}

#[tokio::test]
async fn test_upload_preserves_input_order() {
    let mut server = Server::new_async().await;
    let images = three_images();
    let keys = ["books/a.png", "books/b.jpg", "books/c.webp"];

    let mut mocks = Vec::new();
    for (image, key) in images.iter().zip(keys) {
        mocks.push(mock_ticket(&mut server, TOKEN, &image.content_type, key).await);
        mocks.push(mock_put(&mut server, key, image, 200).await);
    }

    let urls = client(&server)
        .upload_images(&images, &credential())
        .await
        .unwrap();

    assert_eq!(
        urls,
        vec![
            public_url("books/a.png"),
            public_url("books/b.jpg"),
            public_url("books/c.webp"),
        ]
    );
    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_concurrent_upload_preserves_input_order() {
    let mut server = Server::new_async().await;
    let images = three_images();
    let keys = ["books/a.png", "books/b.jpg", "books/c.webp"];

    let mut mocks = Vec::new();
    for (image, key) in images.iter().zip(keys) {
        mocks.push(mock_ticket(&mut server, TOKEN, &image.content_type, key).await);
        mocks.push(mock_put(&mut server, key, image, 200).await);
    }

    let urls = client(&server)
        .upload_images_concurrent(&images, &credential(), 3)
        .await
        .unwrap();

    let expected: Vec<String> = keys.iter().map(|k| public_url(k)).collect();
    assert_eq!(urls, expected);
    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_ticket_failure_midway_returns_single_error() {
    let mut server = Server::new_async().await;
    let images = three_images();

    let first_ticket = mock_ticket(&mut server, TOKEN, "image/png", "books/a.png").await;
    let first_put = mock_put(&mut server, "books/a.png", &images[0], 200).await;
    let second_ticket = server
        .mock("POST", "/books/upload-url")
        .match_body(Matcher::Json(json!({ "fileType": "image/jpeg" })))
        .with_status(500)
        .with_body("S3 presign failed")
        .expect(1)
        .create_async()
        .await;
    let third_ticket = server
        .mock("POST", "/books/upload-url")
        .match_body(Matcher::Json(json!({ "fileType": "image/webp" })))
        .expect(0)
        .create_async()
        .await;

    let err = client(&server)
        .upload_images(&images, &credential())
        .await
        .unwrap_err();

    match err {
        ClientError::UploadTicket(msg) => assert!(msg.contains("500"), "{}", msg),
        other => panic!("expected UploadTicket error, got {:?}", other),
    }
    first_ticket.assert_async().await;
    first_put.assert_async().await;
    second_ticket.assert_async().await;
    third_ticket.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_ticket_failure_returns_single_error() {
    let mut server = Server::new_async().await;
    let images = three_images();

    // Images one and three may or may not be written before the batch aborts.
    let _first_ticket = mock_ticket(&mut server, TOKEN, "image/png", "books/a.png").await;
    let _first_put = mock_put(&mut server, "books/a.png", &images[0], 200).await;
    let second_ticket = server
        .mock("POST", "/books/upload-url")
        .match_body(Matcher::Json(json!({ "fileType": "image/jpeg" })))
        .with_status(500)
        .with_body("S3 presign failed")
        .expect(1)
        .create_async()
        .await;
    let _third_ticket = mock_ticket(&mut server, TOKEN, "image/webp", "books/c.webp").await;
    let _third_put = mock_put(&mut server, "books/c.webp", &images[2], 200).await;

    let result = client(&server)
        .upload_images_concurrent(&images, &credential(), 3)
        .await;

    match result {
        Err(ClientError::UploadTicket(msg)) => assert!(msg.contains("500"), "{}", msg),
        Err(other) => panic!("expected UploadTicket error, got {:?}", other),
        Ok(urls) => panic!("expected no URLs, got {:?}", urls),
    }
    second_ticket.assert_async().await;
}

#[tokio::test]
async fn test_rejected_credential_is_auth_error() {
    let mut server = Server::new_async().await;
    let ticket = server
        .mock("POST", "/books/upload-url")
        .with_status(401)
        .with_body(r#"{"message":"Token expired"}"#)
        .expect(1)
        .create_async()
        .await;

    let err = client(&server)
        .upload_images(&[image("a.png", "image/png")], &credential())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Auth(_)), "{:?}", err);
    ticket.assert_async().await;
}

#[tokio::test]
async fn test_malformed_ticket_is_upload_ticket_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/books/upload-url")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"url":"missing-fields"}"#)
        .create_async()
        .await;

    let err = client(&server)
        .upload_images(&[image("a.png", "image/png")], &credential())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::UploadTicket(_)), "{:?}", err);
}

#[tokio::test]
async fn test_storage_rejection_aborts_remaining_files() {
    let mut server = Server::new_async().await;
    let images = three_images();

    let first_ticket = mock_ticket(&mut server, TOKEN, "image/png", "books/a.png").await;
    let first_put = mock_put(&mut server, "books/a.png", &images[0], 403).await;
    let second_ticket = server
        .mock("POST", "/books/upload-url")
        .match_body(Matcher::Json(json!({ "fileType": "image/jpeg" })))
        .expect(0)
        .create_async()
        .await;

    let err = client(&server)
        .upload_images(&images, &credential())
        .await
        .unwrap_err();

    match err {
        ClientError::StorageWrite(msg) => {
            assert!(msg.contains("a.png"), "{}", msg);
            assert!(msg.contains("403"), "{}", msg);
        }
        other => panic!("expected StorageWrite error, got {:?}", other),
    }
    first_ticket.assert_async().await;
    first_put.assert_async().await;
    second_ticket.assert_async().await;
}

#[tokio::test]
async fn test_storage_unreachable_is_storage_write_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/books/upload-url")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "uploadUrl": "http://127.0.0.1:9/unreachable", "key": "books/a.png" }).to_string())
        .create_async()
        .await;

    let err = client(&server)
        .upload_images(&[image("a.png", "image/png")], &credential())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::StorageWrite(_)), "{:?}", err);
}
