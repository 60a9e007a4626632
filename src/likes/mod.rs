//! Per-item "liked" flags.
//!
//! - `registry`: The [`LikeRegistry`] and its in-flight guard

pub mod registry;

pub use registry::{LikeRegistry, ToggleTicket};
