//! Side effects for the plugin runtime to execute.
//!
//! The event handler never calls host functions itself. It mutates state and
//! returns a list of [`Action`]s, which `main.rs` translates into Zellij API
//! calls in order.

use crate::catalog::CollectionRequest;
use crate::worker::WorkerMessage;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Issues one collection request through the host's web request API.
    ///
    /// The response comes back as an `Event::CollectionFetched`.
    FetchCollection(CollectionRequest),
}
