//! Platform helpers for the Zellij WASM sandbox.

pub mod paths;

pub use paths::{data_dir, host_path};
