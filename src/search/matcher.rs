//! Case-insensitive containment matching over catalog items.
//!
//! An item matches a query when its title, its description, or its owner's first
//! or last name contains the query, ignoring case. Owners are found by position
//! (see [`Catalog::owner_for`]), so each check is constant time per item.

use crate::catalog::Catalog;
use crate::domain::Item;

/// Lowercases `text` one char at a time.
///
/// Matching and highlighting both fold through here so they agree on chars
/// whose lowercase form is longer than one char, such as 'İ'.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Tests `item` against a query already passed through [`fold_case`].
#[must_use]
pub fn item_matches(catalog: &Catalog, item: &Item, lowered_query: &str) -> bool {
    let contains = |text: &str| fold_case(text).contains(lowered_query);

    contains(&item.title)
        || contains(&item.description)
        || catalog
            .owner_for(item)
            .is_some_and(|owner| contains(&owner.first_name) || contains(&owner.last_name))
}

/// Returns the ids of every item matching `query`, in catalog order.
///
/// An empty query matches everything.
///
/// # Examples
///
/// ```
/// use zcatalog::catalog::Catalog;
/// use zcatalog::search::matching_ids;
/// use zcatalog::{Item, Owner};
///
/// let catalog = Catalog::new(
///     vec![Item::new("1", "Red Shoes", "leather"), Item::new("2", "Blue Hat", "wool")],
///     vec![Owner::new(1, "Ann", "Lee"), Owner::new(2, "Bob", "Stone")],
/// );
/// assert_eq!(matching_ids(&catalog, "ANN"), vec!["1".to_string()]);
/// assert_eq!(matching_ids(&catalog, "o"), vec!["1".to_string(), "2".to_string()]);
/// ```
#[must_use]
pub fn matching_ids(catalog: &Catalog, query: &str) -> Vec<String> {
    let _span = tracing::debug_span!("matching_ids",
        total_items = catalog.items.len(),
        query_len = query.len()
    ).entered();

    let lowered = fold_case(query);
    let ids: Vec<String> = catalog
        .items
        .iter()
        .filter(|item| lowered.is_empty() || item_matches(catalog, item, &lowered))
        .map(|item| item.id.clone())
        .collect();

    tracing::debug!(matched = ids.len(), "filter computed");
    ids
}

/// Finds the first case-insensitive occurrence of `query` in `text`.
///
/// Returns a `(start, end)` range in char indices with an exclusive end, suitable
/// for highlighting.
///
/// # Examples
///
/// ```
/// use zcatalog::search::highlight_range;
///
/// assert_eq!(highlight_range("Red Shoes", "SHO"), Some((4, 7)));
/// assert_eq!(highlight_range("Red Shoes", "boot"), None);
/// ```
#[must_use]
pub fn highlight_range(text: &str, query: &str) -> Option<(usize, usize)> {
    // Each folded char remembers the index of the char it came from.
    let (haystack, origin): (Vec<char>, Vec<usize>) = text
        .chars()
        .enumerate()
        .flat_map(|(index, c)| c.to_lowercase().map(move |lower| (lower, index)))
        .unzip();
    let needle: Vec<char> = fold_case(query).chars().collect();

    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    let start = haystack
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;
    let first = *origin.get(start)?;
    let last = *origin.get(start + needle.len() - 1)?;
    Some((first, last + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Owner;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Item::new("1", "Red Shoes", "Running shoes"),
                Item::new("2", "Desk Lamp", "Bright LED"),
                Item::new("x", "Mystery Box", "Who knows"),
            ],
            vec![Owner::new(1, "Ann", "Lee"), Owner::new(2, "Ravi", "Kumar")],
        )
    }

    #[test]
    fn matches_title_and_description_case_insensitively() {
        let catalog = catalog();
        assert_eq!(matching_ids(&catalog, "red"), vec!["1"]);
        assert_eq!(matching_ids(&catalog, "led"), vec!["2"]);
    }

    #[test]
    fn matches_owner_names_positionally() {
        let catalog = catalog();
        assert_eq!(matching_ids(&catalog, "kumar"), vec!["2"]);
        assert_eq!(matching_ids(&catalog, "ann"), vec!["1"]);
    }

    #[test]
    fn items_without_an_owner_only_match_their_own_text() {
        let catalog = catalog();
        assert_eq!(matching_ids(&catalog, "mystery"), vec!["x"]);
        assert!(matching_ids(&catalog, "zzz").is_empty());
    }

    #[test]
    fn empty_query_matches_all_in_order() {
        assert_eq!(matching_ids(&catalog(), ""), vec!["1", "2", "x"]);
    }

    #[test]
    fn highlight_uses_char_indices() {
        assert_eq!(highlight_range("Café Noir", "noir"), Some((5, 9)));
        assert_eq!(highlight_range("abc", ""), None);
        assert_eq!(highlight_range("ab", "abc"), None);
    }

    #[test]
    fn multi_char_lowercase_folds_alike_in_match_and_highlight() {
        let catalog = Catalog::new(vec![Item::new("1", "Big İzmir Rug", "Wool")], vec![]);

        // 'İ' lowercases to 'i' plus a combining dot above.
        let dotted = "i\u{307}zmir";
        assert_eq!(matching_ids(&catalog, dotted), vec!["1"]);
        assert_eq!(highlight_range("Big İzmir Rug", dotted), Some((4, 9)));
        assert_eq!(matching_ids(&catalog, "İZMIR"), vec!["1"]);
        assert_eq!(highlight_range("Big İzmir Rug", "İZMIR"), Some((4, 9)));

        assert!(matching_ids(&catalog, "izmir").is_empty());
        assert_eq!(highlight_range("Big İzmir Rug", "izmir"), None);
    }

    #[test]
    fn highlight_covers_every_folded_char_of_the_match() {
        // The dot folded out of 'İ' alone still maps back to 'İ'.
        assert_eq!(highlight_range("İ", "\u{307}"), Some((0, 1)));
        assert_eq!(highlight_range("xİy", "i\u{307}y"), Some((1, 3)));
    }
}
