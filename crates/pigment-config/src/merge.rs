//! Merge rules shared by the resolvers.
//!
//! - Within one declaration list, a repeated key is overwritten by its later
//!   declaration (last-write-wins). The key keeps its first position.
//! - Across layers, [`MergeOp::Extend`] overlays keys one by one and never
//!   removes a key, while [`MergeOp::Replace`] swaps the whole table.

use indexmap::IndexMap;

/// How an overlay table combines with the table below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOp {
    /// The overlay replaces the lower table entirely.
    Replace,

    /// Overlay keys are added or override individual keys; lower keys not
    /// named by the overlay are kept.
    #[default]
    Extend,
}

/// Collapse ordered `(key, value)` declarations into a table.
///
/// Returns the table and the keys whose earlier declaration was overwritten,
/// in the order the overwrites happened.
pub fn last_write_wins<V>(
    entries: impl IntoIterator<Item = (String, V)>,
) -> (IndexMap<String, V>, Vec<String>) {
    let mut table = IndexMap::new();
    let mut overwritten = Vec::new();
    for (key, value) in entries {
        if table.insert(key.clone(), value).is_some() {
            overwritten.push(key);
        }
    }
    (table, overwritten)
}

/// Combine two tables according to `op`.
pub fn merge_tables<V>(
    mut base: IndexMap<String, V>,
    overlay: IndexMap<String, V>,
    op: MergeOp,
) -> IndexMap<String, V> {
    match op {
        MergeOp::Replace => overlay,
        MergeOp::Extend => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
            base
        }
    }
}
