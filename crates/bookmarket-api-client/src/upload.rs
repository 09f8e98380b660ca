//! Direct-to-storage image uploads.
//!
//! Each image gets its own upload ticket from the backend, is written with a
//! single PUT to the ticket's pre-signed URL, and resolves to a public URL
//! derived from the ticket key. The first failure aborts the batch; objects
//! already written are left in storage.

use bookmarket_core::{ClientError, ClientResult, ImageFile, UploadTicket, UploadTicketRequest};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;

use crate::session::Credential;
use crate::ApiClient;

impl ApiClient {
    /// Ask the backend for a pre-signed URL to write one object of `content_type`.
    #[tracing::instrument(skip(self, credential), fields(operation = "request_upload_ticket"))]
    pub async fn request_upload_ticket(
        &self,
        content_type: &str,
        credential: &Credential,
    ) -> ClientResult<UploadTicket> {
        let body = UploadTicketRequest {
            file_type: content_type.to_string(),
        };
        let ticket: UploadTicket = self
            .post_json("/books/upload-url", &body, credential, ClientError::UploadTicket)
            .await?;

        if ticket.upload_url.is_empty() || ticket.key.is_empty() {
            return Err(ClientError::UploadTicket(
                "Upload ticket is missing its URL or key".to_string(),
            ));
        }

        tracing::debug!(key = %ticket.key, "Received upload ticket");
        Ok(ticket)
    }

    /// Write the image bytes to the ticket's pre-signed URL.
    ///
    /// The request carries the declared content type and no bearer credential.
    #[tracing::instrument(
        skip(self, ticket, image),
        fields(key = %ticket.key, size = image.size(), content_type = %image.content_type)
    )]
    pub async fn put_object(&self, ticket: &UploadTicket, image: &ImageFile) -> ClientResult<()> {
        let response = self
            .client()
            .put(&ticket.upload_url)
            .header(CONTENT_TYPE, image.content_type.as_str())
            .body(image.data.clone())
            .send()
            .await
            .map_err(|e| ClientError::StorageWrite(format!("Failed to send upload: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::StorageWrite(format!(
                "Storage rejected upload of {} with status {}: {}",
                image.file_name, status, error_text
            )));
        }

        Ok(())
    }

    /// Ticket, write, and resolve the public URL for one image.
    pub async fn upload_image(
        &self,
        image: &ImageFile,
        credential: &Credential,
    ) -> ClientResult<String> {
        let ticket = self
            .request_upload_ticket(&image.content_type, credential)
            .await?;
        self.put_object(&ticket, image).await?;
        Ok(self.storage().public_url(&ticket.key))
    }

    /// Upload images one at a time, returning their public URLs in input order.
    ///
    /// Each image's ticket request and write complete before the next begins.
    #[tracing::instrument(skip(self, images, credential), fields(count = images.len()))]
    pub async fn upload_images(
        &self,
        images: &[ImageFile],
        credential: &Credential,
    ) -> ClientResult<Vec<String>> {
        let mut urls = Vec::with_capacity(images.len());
        for (index, image) in images.iter().enumerate() {
            let url = self.upload_image(image, credential).await.map_err(|err| {
                tracing::warn!(index, file = %image.file_name, error = %err, "Image upload failed");
                err
            })?;
            urls.push(url);
        }

        tracing::info!(count = urls.len(), "Uploaded listing images");
        Ok(urls)
    }

    /// Upload with up to `limit` images in flight. URLs still come back in input order.
    #[tracing::instrument(skip(self, images, credential), fields(count = images.len()))]
    pub async fn upload_images_concurrent(
        &self,
        images: &[ImageFile],
        credential: &Credential,
        limit: usize,
    ) -> ClientResult<Vec<String>> {
        if limit <= 1 {
            return self.upload_images(images, credential).await;
        }

        let urls: Vec<String> = stream::iter(images)
            .map(|image| self.upload_image(image, credential))
            .buffered(limit)
            .try_collect()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "Concurrent image upload failed");
                err
            })?;

        tracing::info!(count = urls.len(), limit, "Uploaded listing images");
        Ok(urls)
    }
}

