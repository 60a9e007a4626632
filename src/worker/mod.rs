//! Background worker thread for catalog filtering.
//!
//! Filtering runs on a Zellij worker so typing stays responsive on large
//! catalogs. The plugin tags each request with a generation and discards any
//! response that is no longer the latest.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
