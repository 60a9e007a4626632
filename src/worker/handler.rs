//! Worker thread implementation for background filtering.
//!
//! The worker keeps its own copy of the catalog and answers filter requests
//! against it, so a scan over a large catalog never blocks the plugin's render
//! loop. Responses echo the request generation; deciding whether a result is
//! still wanted is the plugin's job.

use crate::catalog::Catalog;
use crate::domain::error::{Result, ZcatalogError};
use crate::search::matching_ids;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state.
///
/// Runs on a separate thread spawned by Zellij. The catalog arrives with the
/// first `LoadCatalog` message.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CatalogWorker {
    #[serde(skip)]
    catalog: Option<Catalog>,
}

impl CatalogWorker {
    fn catalog(&self) -> Result<&Catalog> {
        self.catalog
            .as_ref()
            .ok_or_else(|| ZcatalogError::Worker("catalog not loaded".to_string()))
    }

    fn handle_load_catalog(&mut self, catalog: Catalog) -> WorkerResponse {
        let count = catalog.items.len();
        self.catalog = Some(catalog);
        tracing::debug!(item_count = count, "catalog stored in worker");
        WorkerResponse::CatalogLoaded { count }
    }

    fn handle_filter(&self, generation: u64, query: String) -> WorkerResponse {
        match self.catalog() {
            Ok(catalog) => {
                let item_ids = matching_ids(catalog, &query);
                tracing::debug!(generation, matched = item_ids.len(), "filter finished");
                WorkerResponse::Filtered {
                    generation,
                    query,
                    item_ids,
                }
            }
            Err(e) => {
                tracing::debug!(generation, error = %e, "filter requested before catalog load");
                WorkerResponse::Error {
                    message: format!("filter: {e}"),
                }
            }
        }
    }

    /// Re-attaches the sender's trace context so worker spans join its trace.
    ///
    /// The returned guard must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(opentelemetry::Context::current().with_remote_span_context(span_context).attach())
    }

    /// Processes a worker message and returns the response to send back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = message.kind());
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadCatalog { catalog, .. } => self.handle_load_catalog(catalog),
            WorkerMessage::Filter {
                generation, query, ..
            } => self.handle_filter(generation, query),
        }
    }
}

/// Tracks whether worker tracing has been initialized.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for CatalogWorker {
    /// Deserializes a [`WorkerMessage`], handles it, and posts the
    /// [`WorkerResponse`] back under the same message name.
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_worker_tracing(&crate::Config::default());
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => post_message_to_plugin(PluginMessage {
                name: message,
                payload,
                worker_name: None,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Item, Owner};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![Item::new("1", "Red Shoes", "leather"), Item::new("2", "Desk Lamp", "LED")],
            vec![Owner::new(1, "Ann", "Lee"), Owner::new(2, "Ravi", "Kumar")],
        )
    }

    #[test]
    fn filter_before_load_reports_an_error() {
        let mut worker = CatalogWorker::default();
        let response = worker.handle_message(WorkerMessage::filter(1, "red".to_string()));
        assert!(matches!(response, WorkerResponse::Error { .. }));
    }

    #[test]
    fn filter_echoes_generation_and_query() {
        let mut worker = CatalogWorker::default();
        assert_eq!(
            worker.handle_message(WorkerMessage::load_catalog(catalog())),
            WorkerResponse::CatalogLoaded { count: 2 }
        );

        let response = worker.handle_message(WorkerMessage::filter(7, "kumar".to_string()));
        assert_eq!(
            response,
            WorkerResponse::Filtered {
                generation: 7,
                query: "kumar".to_string(),
                item_ids: vec!["2".to_string()],
            }
        );
    }
}
