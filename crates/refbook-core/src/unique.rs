//! Ordered de-duplication.

use std::collections::HashSet;
use std::hash::Hash;

/// Collect the distinct values of `values`, keeping the first occurrence of each.
pub fn unique<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for value in values {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }

    out
}
