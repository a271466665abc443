// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document errors.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

use crate::ElementId;

/// Errors returned by [`Document`](crate::Document) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The id does not name a live element (never created, or already removed).
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),
    /// The document root cannot be removed.
    #[error("the document root cannot be removed")]
    RemoveRoot,
    /// A selector string could not be parsed.
    #[error("invalid selector {0:?}")]
    InvalidSelector(String),
}
