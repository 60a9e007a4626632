//! Catalog item and owner domain models.
//!
//! Items and owners are fetched as two independent collections. There is no
//! foreign key between them: the owner of an item is found by position, using
//! the item's numeric identifier as a one-based index into the owner list.

use serde::{Deserialize, Serialize};

/// A product in the remote catalog.
///
/// Identity is `id`, which is unique across the collection. Items are immutable
/// once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

impl Item {
    /// Creates an item without an image.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            image_url: String::new(),
        }
    }

    /// Returns the position of this item's owner in the owner collection.
    ///
    /// The owner index is the numeric id minus one. Ids that are not positive
    /// integers have no owner.
    ///
    /// # Examples
    ///
    /// ```
    /// use zcatalog::Item;
    ///
    /// assert_eq!(Item::new("1", "Red Shoes", "").owner_index(), Some(0));
    /// assert_eq!(Item::new("0", "Zero", "").owner_index(), None);
    /// assert_eq!(Item::new("sku-9", "Odd", "").owner_index(), None);
    /// ```
    #[must_use]
    pub fn owner_index(&self) -> Option<usize> {
        self.id.trim().parse::<usize>().ok()?.checked_sub(1)
    }
}

/// A user that owns an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub display_index: i64,
    pub first_name: String,
    pub last_name: String,
    pub avatar_url: String,
}

impl Owner {
    /// Creates an owner without an avatar.
    #[must_use]
    pub fn new(display_index: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            display_index,
            first_name: first_name.into(),
            last_name: last_name.into(),
            avatar_url: String::new(),
        }
    }

    /// Returns "first last", as shown next to an item.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_index_is_one_based() {
        assert_eq!(Item::new("3", "t", "d").owner_index(), Some(2));
        assert_eq!(Item::new(" 12 ", "t", "d").owner_index(), Some(11));
    }

    #[test]
    fn non_numeric_ids_have_no_owner() {
        assert_eq!(Item::new("", "t", "d").owner_index(), None);
        assert_eq!(Item::new("-1", "t", "d").owner_index(), None);
        assert_eq!(Item::new("1.5", "t", "d").owner_index(), None);
    }

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(Owner::new(1, "Ann", "Lee").full_name(), "Ann Lee");
    }
}
