//! # Collection Diffing
//!
//! Computes the edit script between two listing collections so the grid
//! only rebuilds cards that actually changed.
//!
//! Two separate questions are asked of every pair of items:
//!
//! - **Same item?** Decides whether an old position and a new position hold
//!   the same entry (kept or moved rather than removed and inserted).
//! - **Same content?** For a matched pair, decides whether its card must be
//!   rebuilt.
//!
//! For listings, "same item" means the very same `Arc` allocation and "same
//! content" means equal `id`s. A listing whose price changed under a stable
//! `id` is therefore not a content change. Keep the two comparators apart.

use std::sync::Arc;

use crate::network::Listing;

/// Comparator pair used by [`calculate_diff`].
pub trait ItemCallback<T> {
    fn are_items_the_same(&self, old: &T, new: &T) -> bool;
    fn are_contents_the_same(&self, old: &T, new: &T) -> bool;
}

/// Identity for items, `id` equality for contents.
pub struct ListingDiffCallback;

impl ItemCallback<Arc<Listing>> for ListingDiffCallback {
    fn are_items_the_same(&self, old: &Arc<Listing>, new: &Arc<Listing>) -> bool {
        Arc::ptr_eq(old, new)
    }

    fn are_contents_the_same(&self, old: &Arc<Listing>, new: &Arc<Listing>) -> bool {
        old.id == new.id
    }
}

/// One step of an edit script. Indices refer to the old and new
/// collections as passed to [`calculate_diff`], not to intermediate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp {
    Remove { old_index: usize },
    Insert { new_index: usize },
    Move { old_index: usize, new_index: usize },
    Change { old_index: usize, new_index: usize },
}

/// Result of diffing two collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    pub ops: Vec<DiffOp>,
    /// For each new position, the old position it came from, if any.
    pub sources: Vec<Option<usize>>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// New positions whose card must be (re)built: insertions and changes.
    pub fn dirty_positions(&self) -> Vec<usize> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DiffOp::Insert { new_index } | DiffOp::Change { new_index, .. } => {
                    Some(*new_index)
                }
                _ => None,
            })
            .collect()
    }
}

/// Builds the edit script turning `old` into `new`.
///
/// Kept items come from a longest common subsequence over "same item".
/// Unmatched items that are the same item on both sides become moves; the
/// rest are removals and insertions. Every matched pair whose contents
/// differ also yields a `Change`.
pub fn calculate_diff<T, C: ItemCallback<T>>(old: &[T], new: &[T], callback: &C) -> Diff {
    let n = old.len();
    let m = new.len();

    let mut sources: Vec<Option<usize>> = vec![None; m];
    let mut old_matched = vec![false; n];

    // Matching head and tail never need the table
    let prefix = old
        .iter()
        .zip(new)
        .take_while(|&(a, b)| callback.are_items_the_same(a, b))
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|&(a, b)| callback.are_items_the_same(a, b))
        .count();
    for (k, source) in sources[..prefix].iter_mut().enumerate() {
        *source = Some(k);
    }
    for (k, source) in sources[m - suffix..].iter_mut().enumerate() {
        *source = Some(n - suffix + k);
    }
    old_matched[..prefix].fill(true);
    old_matched[n - suffix..].fill(true);

    // lcs[i][j] = LCS length of old_mid[i..] and new_mid[j..]. Every refetch
    // brings new allocations, so the middle is usually the whole list.
    let (old_mid, new_mid) = (&old[prefix..n - suffix], &new[prefix..m - suffix]);
    let (rows, cols) = (old_mid.len(), new_mid.len());
    let mut lcs = vec![vec![0usize; cols + 1]; rows + 1];
    for i in (0..rows).rev() {
        for j in (0..cols).rev() {
            lcs[i][j] = if callback.are_items_the_same(&old_mid[i], &new_mid[j]) {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let (mut i, mut j) = (0, 0);
    while i < rows && j < cols {
        if callback.are_items_the_same(&old_mid[i], &new_mid[j]) {
            sources[prefix + j] = Some(prefix + i);
            old_matched[prefix + i] = true;
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }

    let mut moves = Vec::new();
    for (new_index, source) in sources.iter_mut().enumerate() {
        if source.is_some() {
            continue;
        }
        let found = (0..n).find(|&old_index| {
            !old_matched[old_index]
                && callback.are_items_the_same(&old[old_index], &new[new_index])
        });
        if let Some(old_index) = found {
            old_matched[old_index] = true;
            *source = Some(old_index);
            moves.push(DiffOp::Move {
                old_index,
                new_index,
            });
        }
    }

    let mut ops: Vec<DiffOp> = (0..n)
        .rev()
        .filter(|&old_index| !old_matched[old_index])
        .map(|old_index| DiffOp::Remove { old_index })
        .collect();
    ops.extend(moves);
    ops.extend(
        sources
            .iter()
            .enumerate()
            .filter(|(_, source)| source.is_none())
            .map(|(new_index, _)| DiffOp::Insert { new_index }),
    );
    ops.extend(sources.iter().enumerate().filter_map(|(new_index, source)| {
        source.and_then(|old_index| {
            (!callback.are_contents_the_same(&old[old_index], &new[new_index])).then_some(
                DiffOp::Change {
                    old_index,
                    new_index,
                },
            )
        })
    }));

    Diff { ops, sources }
}
