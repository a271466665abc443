// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compound selectors: an optional tag followed by any number of `.class` parts.
//!
//! `g.x-axis-group.axis`, `.bar` and `svg` are all valid. Combinators, ids and attribute
//! selectors are not supported; charts only ever need to find their own class hooks.

extern crate alloc;

use alloc::string::String;

use smallvec::SmallVec;

use crate::{DomError, Element, Tag};

/// A parsed compound selector.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<Tag>,
    classes: SmallVec<[String; 2]>,
}

impl Selector {
    /// Parses a compound selector.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(input.into());
        let input_trimmed = input.trim();
        if input_trimmed.is_empty() || input_trimmed.contains(char::is_whitespace) {
            return Err(invalid());
        }

        let mut parts = input_trimmed.split('.');
        let head = parts.next().unwrap_or_default();
        let tag = if head.is_empty() {
            None
        } else {
            Some(Tag::from_name(head).ok_or_else(invalid)?)
        };

        let mut classes = SmallVec::new();
        for class in parts {
            if class.is_empty() {
                return Err(invalid());
            }
            classes.push(class.into());
        }
        Ok(Self { tag, classes })
    }

    /// A selector matching any element that carries `class`.
    pub fn class(class: &str) -> Self {
        let mut classes = SmallVec::new();
        classes.push(class.into());
        Self { tag: None, classes }
    }

    /// A selector matching a tag with the given class.
    pub fn tag_class(tag: Tag, class: &str) -> Self {
        let mut sel = Self::class(class);
        sel.tag = Some(tag);
        sel
    }

    /// Returns `true` if `element` satisfies every part of this selector.
    pub fn matches(&self, element: &Element) -> bool {
        if self.tag.is_some_and(|t| t != element.tag()) {
            return false;
        }
        self.classes.iter().all(|c| element.has_class(c))
    }
}
