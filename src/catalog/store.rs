//! Fetched catalog and its loading lifecycle.
//!
//! [`DataStore`] is populated once at startup. It starts out loading, and the
//! loading flag is cleared when the fetch settles either way. A failed fetch
//! leaves the store unready with no separate error state, so the UI cannot tell
//! "failed" apart from "fetched nothing".

use super::fetch::{BatchProgress, Collection, CollectionRequest, FetchBatch};
use crate::domain::error::Result;
use crate::domain::{Item, Owner};
use serde::{Deserialize, Serialize};

/// The two fetched collections, co-indexed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<Item>,
    pub owners: Vec<Owner>,
}

impl Catalog {
    #[must_use]
    pub const fn new(items: Vec<Item>, owners: Vec<Owner>) -> Self {
        Self { items, owners }
    }

    /// Returns the owner associated with `item` by position.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcatalog::catalog::Catalog;
    /// use zcatalog::{Item, Owner};
    ///
    /// let catalog = Catalog::new(
    ///     vec![Item::new("1", "Red Shoes", ""), Item::new("7", "Lamp", "")],
    ///     vec![Owner::new(1, "Ann", "Lee")],
    /// );
    /// assert_eq!(catalog.owner_for(&catalog.items[0]).map(|o| o.first_name.as_str()), Some("Ann"));
    /// assert!(catalog.owner_for(&catalog.items[1]).is_none());
    /// ```
    #[must_use]
    pub fn owner_for(&self, item: &Item) -> Option<&Owner> {
        item.owner_index().and_then(|index| self.owners.get(index))
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether both collections are non-empty.
    #[must_use]
    pub fn has_valid_data(&self) -> bool {
        !self.items.is_empty() && !self.owners.is_empty()
    }
}

/// Outcome of feeding a collection response into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchProgress {
    /// Still waiting on the other collection.
    Pending,
    /// The fetch settled successfully and the catalog was replaced.
    Loaded,
    /// The response did not belong to a live fetch.
    Ignored,
}

/// Holds the fetched catalog together with its loading and ready flags.
#[derive(Debug)]
pub struct DataStore {
    catalog: Catalog,
    loading: bool,
    ready: bool,
    loaded_at: Option<i64>,
    batch: Option<FetchBatch>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    /// Creates an empty store that is loading and not ready.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: Catalog::default(),
            loading: true,
            ready: false,
            loaded_at: None,
            batch: None,
        }
    }

    /// Starts a fetch, returning the two requests to issue in parallel.
    pub fn begin_fetch(&mut self, endpoint: &str, limit: u32) -> Vec<CollectionRequest> {
        tracing::debug!(endpoint = %endpoint, limit, "starting catalog fetch");
        self.loading = true;
        self.batch = Some(FetchBatch::new());
        vec![
            CollectionRequest::new(endpoint, Collection::Owners, limit),
            CollectionRequest::new(endpoint, Collection::Items, limit),
        ]
    }

    /// Feeds one collection response into the live fetch.
    ///
    /// # Errors
    ///
    /// Returns the fetch or decode error when this response fails the fetch. The
    /// store is already settled (not loading, not ready) when the error is returned.
    pub fn accept(&mut self, collection: Collection, status: u16, body: &[u8]) -> Result<FetchProgress> {
        let Some(batch) = self.batch.as_mut() else {
            tracing::debug!(?collection, "no fetch in progress, ignoring response");
            return Ok(FetchProgress::Ignored);
        };

        match batch.accept(collection, status, body) {
            BatchProgress::Pending => Ok(FetchProgress::Pending),
            BatchProgress::Ignored => Ok(FetchProgress::Ignored),
            BatchProgress::Complete(catalog) => {
                self.batch = None;
                self.load(catalog);
                Ok(FetchProgress::Loaded)
            }
            BatchProgress::Failed(e) => {
                self.fail();
                Err(e)
            }
        }
    }

    /// Replaces the catalog and settles the store.
    pub fn load(&mut self, catalog: Catalog) {
        self.ready = catalog.has_valid_data();
        self.catalog = catalog;
        self.loading = false;
        self.loaded_at = Some(chrono::Utc::now().timestamp());

        tracing::debug!(
            items = self.catalog.items.len(),
            owners = self.catalog.owners.len(),
            ready = self.ready,
            "catalog loaded"
        );
    }

    /// Settles the store without data; any responses still in flight are dropped.
    ///
    /// The ready flag is left untouched, so an already-loaded catalog stays usable.
    pub fn fail(&mut self) {
        self.loading = false;
        self.batch = None;
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Unix timestamp of the last successful load.
    #[must_use]
    pub const fn loaded_at(&self) -> Option<i64> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZcatalogError;

    const PRODUCTS: &[u8] = br#"{"products":[{"id":1,"title":"Red Shoes","description":"d","images":[]}]}"#;
    const USERS: &[u8] = br#"{"users":[{"id":1,"firstName":"Ann","lastName":"Lee"}]}"#;

    #[test]
    fn starts_loading_and_unready() {
        let store = DataStore::new();
        assert!(store.is_loading());
        assert!(!store.is_ready());
        assert!(store.loaded_at().is_none());
    }

    #[test]
    fn successful_fetch_makes_store_ready() {
        let mut store = DataStore::new();
        let requests = store.begin_fetch("https://dummyjson.com", 200);
        assert_eq!(requests.len(), 2);

        assert_eq!(store.accept(Collection::Items, 200, PRODUCTS).unwrap(), FetchProgress::Pending);
        assert!(store.is_loading());
        assert_eq!(store.accept(Collection::Owners, 200, USERS).unwrap(), FetchProgress::Loaded);

        assert!(!store.is_loading());
        assert!(store.is_ready());
        assert!(store.loaded_at().is_some());
        assert_eq!(store.catalog().items[0].title, "Red Shoes");
    }

    #[test]
    fn failed_fetch_clears_loading_but_stays_unready() {
        let mut store = DataStore::new();
        store.begin_fetch("https://dummyjson.com", 200);

        let err = store.accept(Collection::Owners, 500, b"").unwrap_err();
        assert!(matches!(err, ZcatalogError::Fetch(_)));
        assert!(!store.is_loading());
        assert!(!store.is_ready());

        assert_eq!(store.accept(Collection::Items, 200, PRODUCTS).unwrap(), FetchProgress::Ignored);
        assert!(!store.is_ready());
    }

    #[test]
    fn empty_collections_are_not_ready() {
        let mut store = DataStore::new();
        store.begin_fetch("https://dummyjson.com", 200);
        store.accept(Collection::Items, 200, br#"{"products":[]}"#).unwrap();
        store.accept(Collection::Owners, 200, USERS).unwrap();
        assert!(!store.is_loading());
        assert!(!store.is_ready());
    }

    #[test]
    fn responses_without_a_fetch_are_ignored() {
        let mut store = DataStore::new();
        assert_eq!(store.accept(Collection::Items, 200, PRODUCTS).unwrap(), FetchProgress::Ignored);
        assert!(store.is_loading());
    }
}
