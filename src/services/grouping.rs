//! Order-preserving group-and-merge
//!
//! Report rows keep the order in which their keys first appear in the
//! source tables, so grouping cannot go through a plain `HashMap`.

use std::collections::HashMap;
use std::hash::Hash;

/// Group `(key, value)` pairs by key, folding later values into the first
/// with `merge`. Groups come out in order of first appearance.
pub fn group_ordered<K, V, I, F>(items: I, mut merge: F) -> Vec<(K, V)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, V)>,
    F: FnMut(&mut V, V),
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, V)> = Vec::new();

    for (key, value) in items {
        match index.get(&key) {
            Some(&position) => merge(&mut groups[position].1, value),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, value));
            }
        }
    }

    groups
}
