// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data joins.
//!
//! A join diffs the elements currently bound to a group against a new list of data and splits
//! the result into three parts:
//! - **enter**: data indices with no element yet,
//! - **update**: `(data index, element)` pairs that survive,
//! - **exit**: elements with no datum left.
//!
//! Joins are pure: they never touch the document. Callers append, edit and remove elements
//! based on the returned [`Join`].

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::ElementId;

/// The result of a data join.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Join {
    /// Data indices that need a new element, ascending.
    pub enter: Vec<usize>,
    /// Surviving elements paired with the data index they are now bound to.
    pub update: Vec<(usize, ElementId)>,
    /// Elements whose datum went away, in their original order.
    pub exit: Vec<ElementId>,
}

/// Sizes of the three join parts, convenient for logging and reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoinCounts {
    /// Number of entering data.
    pub entered: usize,
    /// Number of updated elements.
    pub updated: usize,
    /// Number of exiting elements.
    pub exited: usize,
}

impl Join {
    /// Returns the size of each part.
    pub fn counts(&self) -> JoinCounts {
        JoinCounts {
            entered: self.enter.len(),
            updated: self.update.len(),
            exited: self.exit.len(),
        }
    }
}

/// Joins by position: element `i` is bound to datum `i`.
pub fn join_by_index(existing: &[ElementId], data_len: usize) -> Join {
    let kept = existing.len().min(data_len);
    Join {
        enter: (kept..data_len).collect(),
        update: existing[..kept].iter().copied().enumerate().collect(),
        exit: existing[kept..].to_vec(),
    }
}

/// Joins by key: an element survives if its bound key appears among the new data keys.
///
/// `existing` pairs each element with its bound key (`None` for unbound elements, which always
/// exit). When keys repeat, the first element and the first datum claim the key; the remaining
/// duplicates exit and enter respectively.
pub fn join_by_key<K, I>(existing: &[(ElementId, Option<K>)], data_keys: I) -> Join
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut by_key: HashMap<&K, usize> = HashMap::new();
    for (pos, (_, key)) in existing.iter().enumerate() {
        if let Some(key) = key {
            by_key.entry(key).or_insert(pos);
        }
    }

    let mut exiting = vec![true; existing.len()];
    let mut join = Join::default();
    for (index, key) in data_keys.into_iter().enumerate() {
        match by_key.remove(&key) {
            Some(pos) => {
                exiting[pos] = false;
                join.update.push((index, existing[pos].0));
            }
            None => join.enter.push(index),
        }
    }

    join.exit = existing
        .iter()
        .zip(&exiting)
        .filter(|(_, exit)| **exit)
        .map(|((id, _), _)| *id)
        .collect();
    join
}
