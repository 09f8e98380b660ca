//! Domain models
//!
//! Draft types live on the client until submission; `Listing` is the
//! server-owned record returned once the listing has been created.

pub mod draft;
pub mod image;
pub mod listing;
pub mod upload_ticket;

pub use draft::{AgeBracket, BookCondition, ListingDetails, ListingDraft, PriceSummary, ValidatedDraft};
pub use image::{content_type_for_path, ImageFile};
pub use listing::{Listing, NewListing};
pub use upload_ticket::{UploadTicket, UploadTicketRequest};
