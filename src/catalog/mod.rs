//! Remote catalog: fetching, decoding, and holding the two collections.
//!
//! # Modules
//!
//! - `fetch`: Collection requests, response batching, and JSON payload decoding
//! - `store`: The [`DataStore`] and the positional [`Catalog`]

pub mod fetch;
pub mod store;

pub use fetch::{
    decode_items, decode_owners, BatchProgress, Collection, CollectionRequest, FetchBatch,
    COLLECTION_CONTEXT_KEY,
};
pub use store::{Catalog, DataStore, FetchProgress};
