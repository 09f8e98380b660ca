//! Listing endpoints.

use bookmarket_core::{ClientError, ClientResult, Listing, NewListing};

use crate::session::Credential;
use crate::ApiClient;

impl ApiClient {
    /// Create a listing from validated fields and resolved image URLs.
    #[tracing::instrument(
        skip(self, listing, credential),
        fields(title = %listing.title, images = listing.image_urls.len())
    )]
    pub async fn create_listing(
        &self,
        listing: &NewListing,
        credential: &Credential,
    ) -> ClientResult<Listing> {
        let created: Listing = self
            .post_json("/books", listing, credential, ClientError::ListingCreate)
            .await?;

        if created.id.trim().is_empty() {
            return Err(ClientError::ListingCreate(
                "Backend returned a listing without an identifier".to_string(),
            ));
        }

        tracing::info!(listing_id = %created.id, "Created listing");
        Ok(created)
    }

    /// Fetch a listing by ID.
    pub async fn get_listing(&self, listing_id: &str) -> ClientResult<Listing> {
        let listing_id = listing_id.trim();
        if listing_id.is_empty() || listing_id.contains('/') {
            return Err(ClientError::ListingFetch(format!(
                "Invalid listing ID: {:?}",
                listing_id
            )));
        }
        self.get(
            &format!("/books/{}", listing_id),
            None,
            ClientError::ListingFetch,
        )
        .await
    }
}
