//! Symbol lookups over already-fetched collections.
//!
//! These helpers are pure: they take collection snapshots in priority order
//! and never fetch. Matching on symbols is exact and case-sensitive except
//! for [`search`], which compares ASCII case-insensitively.

use std::collections::HashMap;

use crate::Listed;

/// First record in `items` whose symbol equals `symbol`.
pub fn find_in<'a, T: Listed>(items: &'a [T], symbol: &str) -> Option<&'a T> {
    items.iter().find(|item| item.symbol() == symbol)
}

/// Search `collections` in order and return the first match.
pub fn find_first<'a, T: Listed>(collections: &[&'a [T]], symbol: &str) -> Option<&'a T> {
    collections
        .iter()
        .find_map(|items| find_in(*items, symbol))
}

/// Resolve many symbols against prioritised collections in one pass each.
///
/// Unknown symbols are left out of the result. Within one collection the
/// first record for a symbol wins; across collections the earlier collection
/// wins.
pub fn batch_find<T, S>(collections: &[&[T]], symbols: &[S]) -> HashMap<String, T>
where
    T: Listed + Clone,
    S: AsRef<str>,
{
    if symbols.is_empty() {
        return HashMap::new();
    }

    let indexes: Vec<HashMap<&str, &T>> = collections
        .iter()
        .map(|items| {
            let mut index = HashMap::with_capacity(items.len());
            for item in *items {
                index.entry(item.symbol()).or_insert(item);
            }
            index
        })
        .collect();

    symbols
        .iter()
        .filter_map(|symbol| {
            let symbol = symbol.as_ref();
            indexes
                .iter()
                .find_map(|index| index.get(symbol))
                .map(|item| (symbol.to_owned(), (*item).clone()))
        })
        .collect()
}

/// Every record whose symbol contains `text`, ignoring ASCII case, in scan order.
///
/// An empty `text` matches everything. A symbol present in two collections is
/// returned twice.
pub fn search<T: Listed + Clone>(collections: &[&[T]], text: &str) -> Vec<T> {
    let needle = text.to_ascii_uppercase();
    collections
        .iter()
        .flat_map(|items| items.iter())
        .filter(|item| item.symbol().to_ascii_uppercase().contains(&needle))
        .cloned()
        .collect()
}
