//! Incremental filter engine with last-request-wins commits.
//!
//! The engine owns the current query and the committed result set. Filtering
//! itself happens elsewhere (on the worker); the engine decides whether a new
//! query needs a computation at all, tags each computation with a generation,
//! and commits a returned result only if it carries the latest generation.
//!
//! # Query Handling
//!
//! 1. An empty query clears the filter on the spot: every item is a result.
//! 2. A query longer than the previous non-empty query whose committed result
//!    was empty stays empty without a scan. Containment can only shrink as a
//!    query grows, so nothing new could match.
//! 3. Anything else dispatches a [`FilterRequest`].
//!
//! Every call issues a fresh generation, so a computation still in flight from an
//! earlier query can never overwrite the outcome of a later one, even when that
//! later query took a fast path.

use crate::catalog::Catalog;
use crate::domain::Item;
use std::collections::HashSet;

/// A filter computation to run in the background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub generation: u64,
    pub query: String,
}

/// What [`FilterEngine::set_query`] did with a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The query was empty; results were reset to the full collection.
    Cleared,
    /// The query grew past a query with no matches; results stay empty.
    ShortCircuited,
    /// A background computation must be started for this request.
    Dispatched(FilterRequest),
}

/// Owns the query string and the committed filter result.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    query: String,
    results: Vec<Item>,
    generation: u64,
    in_flight: Option<u64>,
}

impl FilterEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to the unfiltered state over `catalog`.
    ///
    /// Equivalent to setting an empty query; any outstanding computation goes stale.
    pub fn reset(&mut self, catalog: &Catalog) {
        self.next_generation();
        self.in_flight = None;
        self.query.clear();
        self.results.clone_from(&catalog.items);
    }

    /// Sets a new query.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcatalog::catalog::Catalog;
    /// use zcatalog::search::{FilterEngine, QueryOutcome};
    /// use zcatalog::Item;
    ///
    /// let catalog = Catalog::new(vec![Item::new("1", "Red Shoes", "")], vec![]);
    /// let mut engine = FilterEngine::new();
    ///
    /// assert_eq!(engine.set_query("", &catalog), QueryOutcome::Cleared);
    /// assert_eq!(engine.results().len(), 1);
    ///
    /// let QueryOutcome::Dispatched(request) = engine.set_query("red", &catalog) else {
    ///     panic!("expected a background computation");
    /// };
    /// assert!(engine.is_computing());
    /// assert!(engine.commit(request.generation, &["1".to_string()], &catalog));
    /// assert!(!engine.is_computing());
    /// ```
    pub fn set_query(&mut self, text: &str, catalog: &Catalog) -> QueryOutcome {
        let _span = tracing::debug_span!("set_query",
            query_len = text.len(),
            previous_len = self.query.len(),
            previous_results = self.results.len()
        ).entered();

        if text.is_empty() {
            self.reset(catalog);
            tracing::debug!("query cleared");
            return QueryOutcome::Cleared;
        }

        // Judged against the last committed result, even while a newer
        // computation is still outstanding.
        let grows_dead_query = !self.query.is_empty()
            && self.results.is_empty()
            && text.chars().count() > self.query.chars().count();

        let generation = self.next_generation();
        self.query = text.to_string();

        if grows_dead_query {
            self.in_flight = None;
            tracing::debug!(generation, "previous query matched nothing, skipping scan");
            return QueryOutcome::ShortCircuited;
        }

        self.in_flight = Some(generation);
        tracing::debug!(generation, "dispatching filter computation");
        QueryOutcome::Dispatched(FilterRequest {
            generation,
            query: self.query.clone(),
        })
    }

    /// Commits a finished computation if it is the most recent one.
    ///
    /// `ids` are resolved against `catalog` and kept in catalog order. Returns
    /// `false` and leaves the engine untouched when `generation` is stale.
    pub fn commit(&mut self, generation: u64, ids: &[String], catalog: &Catalog) -> bool {
        if self.in_flight != Some(generation) {
            tracing::debug!(
                generation,
                latest = self.generation,
                "discarding stale filter result"
            );
            return false;
        }

        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        self.results = catalog
            .items
            .iter()
            .filter(|item| wanted.contains(item.id.as_str()))
            .cloned()
            .collect();
        self.in_flight = None;

        tracing::debug!(generation, results = self.results.len(), "filter result committed");
        true
    }

    /// Whether a computation is outstanding.
    #[must_use]
    pub const fn is_computing(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The committed result set.
    #[must_use]
    pub fn results(&self) -> &[Item] {
        &self.results
    }

    /// The latest generation issued.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }
}
