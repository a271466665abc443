// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A retained SVG element tree for reusable chart components.
//!
//! Chart code written against a browser DOM needs a handful of engine services; this crate
//! provides them without a browser:
//! - a [`Document`] arena of [`Element`]s with class lists, attributes, styles and text,
//! - compound [`Selector`]s to find class hooks,
//! - pure data joins ([`join_by_index`], [`join_by_key`]) producing enter/update/exit sets,
//! - fire-and-forget attribute [`Transition`]s stepped by the host,
//! - [`Bound`] selections pairing containers with data,
//! - stable markup output ([`Document::to_svg_string`]).

#![no_std]

extern crate alloc;

mod document;
mod element;
mod error;
mod join;
mod selection;
mod selector;
mod svg;
mod transition;

pub use document::{Descendants, Document};
pub use element::{AttrValue, Element, ElementId, Tag};
pub use error::DomError;
pub use join::{Join, JoinCounts, join_by_index, join_by_key};
pub use selection::Bound;
pub use selector::Selector;
pub use transition::{DEFAULT_DURATION_MS, Ease, Transition};
