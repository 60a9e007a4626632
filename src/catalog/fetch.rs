//! Collection requests and payload decoding.
//!
//! The catalog is fetched as two parallel requests, one per [`Collection`].
//! Responses may arrive in either order; a [`FetchBatch`] collects them and
//! resolves to a [`Catalog`] once both have arrived, or to an error as soon as
//! either one fails. There are no retries: a failed batch stays failed and
//! ignores whatever arrives after the failure.
//!
//! # Wire Format
//!
//! ```json
//! { "products": [{ "id": 1, "title": "...", "description": "...", "images": ["..."] }] }
//! { "users": [{ "id": 1, "firstName": "...", "lastName": "...", "image": "..." }] }
//! ```

use super::store::Catalog;
use crate::domain::error::{Result, ZcatalogError};
use crate::domain::{Item, Owner};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Context key carrying the collection name through the host's web request.
pub const COLLECTION_CONTEXT_KEY: &str = "zcatalog_collection";

/// The two remote collections that make up the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Products, decoded into [`Item`]s.
    Items,
    /// Users, decoded into [`Owner`]s.
    Owners,
}

impl Collection {
    /// Endpoint path segment for this collection.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Items => "products",
            Self::Owners => "users",
        }
    }

    /// Recovers a collection from its path segment.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "products" => Some(Self::Items),
            "users" => Some(Self::Owners),
            _ => None,
        }
    }
}

/// A single collection request ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRequest {
    pub collection: Collection,
    pub url: String,
}

impl CollectionRequest {
    /// Builds the request for `collection` against `endpoint`, capped at `limit` records.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcatalog::catalog::{Collection, CollectionRequest};
    ///
    /// let request = CollectionRequest::new("https://dummyjson.com/", Collection::Owners, 200);
    /// assert_eq!(request.url, "https://dummyjson.com/users?limit=200");
    /// ```
    #[must_use]
    pub fn new(endpoint: &str, collection: Collection, limit: u32) -> Self {
        let base = endpoint.trim_end_matches('/');
        Self {
            collection,
            url: format!("{base}/{}?limit={limit}", collection.path()),
        }
    }

    /// Context map attached to the host request so the response can be routed back.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            COLLECTION_CONTEXT_KEY.to_string(),
            self.collection.path().to_string(),
        )])
    }
}

/// Progress of a [`FetchBatch`] after accepting a response.
#[derive(Debug)]
pub enum BatchProgress {
    /// The other collection is still outstanding.
    Pending,
    /// Both collections arrived and decoded.
    Complete(Catalog),
    /// This response failed; the batch is now dead.
    Failed(ZcatalogError),
    /// The batch already completed or failed; the response was dropped.
    Ignored,
}

/// Collects the two collection responses of a single fetch.
#[derive(Debug, Default)]
pub struct FetchBatch {
    items: Option<Vec<Item>>,
    owners: Option<Vec<Owner>>,
    settled: bool,
}

impl FetchBatch {
    /// Creates an empty batch waiting for both collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts one response.
    ///
    /// Non-success statuses and undecodable bodies fail the whole batch.
    pub fn accept(&mut self, collection: Collection, status: u16, body: &[u8]) -> BatchProgress {
        if self.settled {
            tracing::debug!(?collection, status, "batch already settled, dropping response");
            return BatchProgress::Ignored;
        }

        let decoded = check_status(collection, status).and_then(|()| match collection {
            Collection::Items => decode_items(body).map(|items| self.items = Some(items)),
            Collection::Owners => decode_owners(body).map(|owners| self.owners = Some(owners)),
        });

        if let Err(e) = decoded {
            self.settled = true;
            return BatchProgress::Failed(e);
        }

        match (self.items.take(), self.owners.take()) {
            (Some(items), Some(owners)) => {
                self.settled = true;
                BatchProgress::Complete(Catalog::new(items, owners))
            }
            (items, owners) => {
                self.items = items;
                self.owners = owners;
                BatchProgress::Pending
            }
        }
    }
}

fn check_status(collection: Collection, status: u16) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ZcatalogError::Fetch(format!(
            "{} request returned status {status}",
            collection.path()
        )))
    }
}

/// Record identifiers arrive as numbers from the API but are strings in the domain.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProductsPage {
    #[serde(default)]
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: RecordId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsersPage {
    #[serde(default)]
    users: Vec<UserRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: i64,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    image: Option<String>,
}

/// Decodes a products page into items, in response order.
///
/// # Errors
///
/// Returns [`ZcatalogError::Decode`] if the body is not a products page.
pub fn decode_items(body: &[u8]) -> Result<Vec<Item>> {
    let page: ProductsPage = serde_json::from_slice(body)?;
    tracing::debug!(count = page.products.len(), "decoded products page");

    Ok(page
        .products
        .into_iter()
        .map(|record| {
            let image_url = record
                .images
                .into_iter()
                .next()
                .or(record.thumbnail)
                .unwrap_or_default();
            Item {
                id: record.id.into_string(),
                title: record.title,
                description: record.description,
                image_url,
            }
        })
        .collect())
}

/// Decodes a users page into owners, in response order.
///
/// # Errors
///
/// Returns [`ZcatalogError::Decode`] if the body is not a users page.
pub fn decode_owners(body: &[u8]) -> Result<Vec<Owner>> {
    let page: UsersPage = serde_json::from_slice(body)?;
    tracing::debug!(count = page.users.len(), "decoded users page");

    Ok(page
        .users
        .into_iter()
        .map(|record| Owner {
            display_index: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            avatar_url: record.image.unwrap_or_default(),
        })
        .collect())
}
