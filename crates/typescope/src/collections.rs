//! Small collection predicates used by the query modules

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Check if an optional collection is absent or has no elements
pub fn is_empty<'c, C>(collection: impl Into<Option<&'c C>>) -> bool
where
    C: ?Sized + 'c,
    &'c C: IntoIterator,
{
    collection
        .into()
        .map_or(true, |items| items.into_iter().next().is_none())
}

/// Check if the two collections share at least one element
pub fn has_any_of<T>(left: impl IntoIterator<Item = T>, right: impl IntoIterator<Item = T>) -> bool
where
    T: Eq + Hash,
{
    let left: FxHashSet<T> = left.into_iter().collect();
    if left.is_empty() {
        return false;
    }
    right.into_iter().any(|item| left.contains(&item))
}
