//! End-to-end listing submission: validate, upload images, create the listing.

use bookmarket_core::{validate_draft, ClientError, ClientResult, Listing, ListingDraft};

use crate::session::{IdentityProvider, Session};
use crate::ApiClient;

/// Knobs for `ApiClient::submit_listing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Images uploaded at once. 1 uploads strictly in sequence.
    pub upload_concurrency: usize,
}

impl Default for SubmitOptions {
    fn default() -> Self {
        Self {
            upload_concurrency: 1,
        }
    }
}

impl ApiClient {
    /// Submit a draft as a new listing.
    ///
    /// Validation failures return before any network call. Network failures
    /// abort the remaining steps; images written before the failure stay in
    /// storage. A rejected credential signs the session out.
    #[tracing::instrument(skip_all, fields(images = draft.images.len(), concurrency = options.upload_concurrency))]
    pub async fn submit_listing(
        &self,
        draft: ListingDraft,
        session: &Session,
        provider: &dyn IdentityProvider,
        options: SubmitOptions,
    ) -> ClientResult<Listing> {
        let validated = validate_draft(&draft)?;
        drop(draft);

        let credential = session.fresh_credential(provider).await?;
        let (details, images) = validated.into_parts();

        let result = async {
            let image_urls = self
                .upload_images_concurrent(&images, &credential, options.upload_concurrency)
                .await?;
            self.create_listing(&details.with_image_urls(image_urls), &credential)
                .await
        }
        .await;

        if let Err(ClientError::Auth(_)) = result {
            session.invalidate().await;
        }
        result
    }
}
