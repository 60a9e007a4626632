//! OpenTelemetry tracing for the plugin and its worker.
//!
//! Spans are exported as OTLP JSON lines. The plugin writes
//! `<data dir>/zcatalog-otlp.json` through [`init_tracing`]; the worker writes
//! `<data dir>/zcatalog-worker-otlp.json` through [`init_worker_tracing`]. Each
//! file is rotated only by the instance that owns it.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, init_worker_tracing, TraceTarget, TRACE_FILE_NAME, WORKER_TRACE_FILE_NAME};
