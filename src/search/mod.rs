//! Search-as-you-type filtering.
//!
//! - `engine`: The [`FilterEngine`] state machine (fast paths, generations, commits)
//! - `matcher`: The containment predicate and display highlighting

pub mod engine;
pub mod matcher;

pub use engine::{FilterEngine, FilterRequest, QueryOutcome};
pub use matcher::{fold_case, highlight_range, item_matches, matching_ids};
