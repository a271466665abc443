// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained element tree.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::transition::{Transition, Tween};
use crate::{DomError, Element, ElementId, Selector, Tag};

/// An arena of elements rooted at a single `div`.
///
/// The document plays the part of a browser DOM for chart code: elements are created, edited,
/// queried with [`Selector`]s and removed. Pending [`Transition`]s live here too and only
/// progress when the host calls [`Document::advance`].
#[derive(Debug)]
pub struct Document {
    elements: HashMap<ElementId, Element>,
    root: ElementId,
    next_id: u64,
    pub(crate) tweens: Vec<Tween>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only its root element.
    pub fn new() -> Self {
        let root = ElementId(0);
        let mut elements = HashMap::new();
        elements.insert(root, Element::new(root, Tag::Div, None));
        Self {
            elements,
            root,
            next_id: 1,
            tweens: Vec::new(),
        }
    }

    /// The root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of live elements, including the root.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`: a document has at least its root.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns `true` if `id` names a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Borrows an element.
    pub fn element(&self, id: ElementId) -> Result<&Element, DomError> {
        self.elements.get(&id).ok_or(DomError::UnknownElement(id))
    }

    /// Mutably borrows an element.
    pub fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, DomError> {
        self.elements
            .get_mut(&id)
            .ok_or(DomError::UnknownElement(id))
    }

    /// Child ids of `id` in document order.
    pub fn children(&self, id: ElementId) -> Result<&[ElementId], DomError> {
        Ok(self.element(id)?.children())
    }

    /// Appends a new, empty element as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, tag: Tag) -> Result<ElementId, DomError> {
        let id = ElementId(self.next_id);
        self.element_mut(parent)?.children.push(id);
        self.next_id += 1;
        self.elements.insert(id, Element::new(id, tag, Some(parent)));
        Ok(id)
    }

    /// Inserts a new element into `parent` just before its child `reference`.
    ///
    /// Falls back to appending when `reference` is not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        tag: Tag,
        reference: ElementId,
    ) -> Result<ElementId, DomError> {
        let id = ElementId(self.next_id);
        let children = &mut self.element_mut(parent)?.children;
        match children.iter().position(|c| *c == reference) {
            Some(pos) => children.insert(pos, id),
            None => children.push(id),
        }
        self.next_id += 1;
        self.elements.insert(id, Element::new(id, tag, Some(parent)));
        Ok(id)
    }

    /// Detaches `id` from its parent and drops it with its whole subtree.
    ///
    /// Pending transitions on removed elements are cancelled.
    pub fn remove(&mut self, id: ElementId) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::RemoveRoot);
        }
        let parent = self.element(id)?.parent;
        if let Some(parent) = parent
            && let Some(p) = self.elements.get_mut(&parent)
        {
            p.children.retain(|c| *c != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(el) = self.elements.remove(&next) {
                stack.extend(el.children);
            }
        }
        let elements = &self.elements;
        let before = self.tweens.len();
        self.tweens.retain(|t| elements.contains_key(&t.element));
        tracing::trace!(
            ?id,
            cancelled = before - self.tweens.len(),
            "removed element subtree"
        );
        Ok(())
    }

    /// The first descendant of `scope` (pre-order, `scope` excluded) matching `selector`.
    pub fn select(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        self.descendants(scope)
            .find(|id| self.elements.get(id).is_some_and(|el| selector.matches(el)))
    }

    /// Every descendant of `scope` (pre-order, `scope` excluded) matching `selector`.
    pub fn select_all(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(scope)
            .filter(|id| self.elements.get(id).is_some_and(|el| selector.matches(el)))
            .collect()
    }

    /// Direct children of `scope` matching `selector`, in document order.
    pub fn select_children(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        let Some(el) = self.elements.get(&scope) else {
            return Vec::new();
        };
        el.children
            .iter()
            .copied()
            .filter(|id| self.elements.get(id).is_some_and(|c| selector.matches(c)))
            .collect()
    }

    /// Pre-order traversal of the subtree under `scope`, excluding `scope` itself.
    pub fn descendants(&self, scope: ElementId) -> Descendants<'_> {
        let mut stack = Vec::new();
        if let Some(el) = self.elements.get(&scope) {
            stack.extend(el.children.iter().rev().copied());
        }
        Descendants { doc: self, stack }
    }

    /// Starts a transition on `id`; see [`Transition`].
    pub fn transition(&mut self, id: ElementId) -> Transition<'_> {
        Transition::new(self, id)
    }

    /// Number of tweens still running.
    pub fn pending_transitions(&self) -> usize {
        self.tweens.len()
    }

    /// Advances every running tween by `dt_ms` milliseconds, writing interpolated values.
    pub fn advance(&mut self, dt_ms: f64) {
        let mut tweens = core::mem::take(&mut self.tweens);
        let running = tweens.len();
        tweens.retain_mut(|tween| {
            let (value, done) = tween.step(dt_ms);
            match self.elements.get_mut(&tween.element) {
                Some(el) => {
                    el.set_attr(tween.name, value);
                    !done
                }
                None => false,
            }
        });
        tracing::trace!(
            dt_ms,
            finished = running - tweens.len(),
            pending = tweens.len(),
            "advanced transitions"
        );
        self.tweens = tweens;
    }

    /// Runs every pending tween to completion.
    pub fn settle(&mut self) {
        self.advance(f64::MAX);
    }
}

/// Iterator returned by [`Document::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<ElementId>,
}

impl Iterator for Descendants<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let id = self.stack.pop()?;
        if let Some(el) = self.doc.elements.get(&id) {
            self.stack.extend(el.children.iter().rev().copied());
        }
        Some(id)
    }
}
