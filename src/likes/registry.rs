//! Like flags with a single in-flight guard.
//!
//! A toggle happens in two steps: [`LikeRegistry::begin`] claims the guard and
//! [`LikeRegistry::finish`] flips the flag and releases it. While the guard is
//! held every like affordance is disabled ([`LikeRegistry::can_toggle`] is
//! `false`) and further requests are dropped, so no request can read the map
//! while another one is halfway through changing it.

use std::collections::HashMap;

/// Proof that the guard is held for one item.
///
/// Only [`LikeRegistry::begin`] hands these out.
#[derive(Debug, PartialEq, Eq)]
pub struct ToggleTicket {
    item_id: String,
}

impl ToggleTicket {
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }
}

/// Mapping from item id to liked state; absent ids are not liked.
#[derive(Debug, Clone, Default)]
pub struct LikeRegistry {
    likes: HashMap<String, bool>,
    in_flight: bool,
}

impl LikeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `item_id` is currently liked.
    #[must_use]
    pub fn is_liked(&self, item_id: &str) -> bool {
        self.likes.get(item_id).copied().unwrap_or(false)
    }

    /// Whether like affordances should be enabled.
    #[must_use]
    pub const fn can_toggle(&self) -> bool {
        !self.in_flight
    }

    /// Claims the guard for a toggle of `item_id`.
    ///
    /// Returns `None` and changes nothing while another toggle is in flight.
    pub fn begin(&mut self, item_id: &str) -> Option<ToggleTicket> {
        if self.in_flight {
            tracing::debug!(item_id = %item_id, "toggle already in flight, dropping request");
            return None;
        }
        self.in_flight = true;
        Some(ToggleTicket {
            item_id: item_id.to_string(),
        })
    }

    /// Applies the toggle and releases the guard, returning the new state.
    pub fn finish(&mut self, ticket: ToggleTicket) -> bool {
        let entry = self.likes.entry(ticket.item_id).or_insert(false);
        *entry = !*entry;
        let liked = *entry;
        self.in_flight = false;
        liked
    }

    /// Toggles `item_id` in one step.
    ///
    /// Returns the new state, or `None` if the request was dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcatalog::likes::LikeRegistry;
    ///
    /// let mut likes = LikeRegistry::new();
    /// assert_eq!(likes.toggle("1"), Some(true));
    /// assert_eq!(likes.toggle("1"), Some(false));
    /// assert!(!likes.is_liked("1"));
    /// ```
    pub fn toggle(&mut self, item_id: &str) -> Option<bool> {
        let ticket = self.begin(item_id)?;
        let liked = self.finish(ticket);
        tracing::debug!(item_id = %item_id, liked, "like toggled");
        Some(liked)
    }

    /// Number of currently liked items.
    #[must_use]
    pub fn liked_count(&self) -> usize {
        self.likes.values().filter(|liked| **liked).count()
    }
}
