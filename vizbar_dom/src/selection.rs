// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data-bound selections.

extern crate alloc;

use alloc::vec::Vec;

use crate::ElementId;

/// A list of container elements, each paired with the datum bound to it.
///
/// This is what components render over: for every `(container, datum)` pair they draw the datum
/// inside the container.
#[derive(Clone, Debug, PartialEq)]
pub struct Bound<T> {
    entries: Vec<(ElementId, T)>,
}

impl<T> Default for Bound<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Bound<T> {
    /// An empty binding.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Binds one datum to one container.
    pub fn push(&mut self, container: ElementId, datum: T) -> &mut Self {
        self.entries.push((container, datum));
        self
    }

    /// Binds the same datum to every container in `containers`.
    pub fn datum(containers: impl IntoIterator<Item = ElementId>, datum: T) -> Self
    where
        T: Clone,
    {
        Self {
            entries: containers
                .into_iter()
                .map(|id| (id, datum.clone()))
                .collect(),
        }
    }

    /// Number of bound containers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no container is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(container, datum)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &T)> {
        self.entries.iter().map(|(id, d)| (*id, d))
    }
}

impl<T> FromIterator<(ElementId, T)> for Bound<T> {
    fn from_iter<I: IntoIterator<Item = (ElementId, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
