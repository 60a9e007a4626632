//! Domain layer for the zcatalog plugin.
//!
//! This module contains the core domain types, independent of Zellij-specific APIs
//! or infrastructure concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Catalog items and their owners

pub mod error;
pub mod item;

pub use error::{Result, ZcatalogError};
pub use item::{Item, Owner};
