//! Typed HTTP client for the registration portal API.
//!
//! The portal wraps every response body in a `{"data": ..., "errors": [...]}`
//! envelope; [`PortalClient`] checks the `errors` array and surfaces entries
//! as [`ClientError::Api`] before deserializing `data`.

mod client;
mod error;
mod types;

pub use client::PortalClient;
pub use error::ClientError;
pub use types::{CatalogEntry, ProviderRecord, RegisteredSite, SupportingDocs};
