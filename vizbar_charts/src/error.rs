// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render errors.
//!
//! Every error is local to one container's render attempt.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;
use vizbar_dom::DomError;

/// Why a chart could not be rendered into a container.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    /// The chart configuration cannot produce a drawable area.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// The bound dataset cannot be drawn.
    #[error("invalid dataset: {0}")]
    InvalidDataset(#[from] DatasetError),
    /// The container or one of the chart's elements is missing from the document.
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Configuration problems, detected at render time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A size, margin or gap is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The value found.
        value: f64,
    },
    /// The margins are larger than the chart.
    #[error("margins leave a negative drawable area ({width} x {height})")]
    NegativeDrawableArea {
        /// Drawable width (`width - left - right`).
        width: f64,
        /// Drawable height (`height - top - bottom`).
        height: f64,
    },
    /// The gap is not a percentage.
    #[error("gap must be between 0 and 100 percent, got {0}")]
    GapOutOfRange(f64),
}

/// Dataset problems, detected at render time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    /// Bars cannot grow downward from the baseline.
    #[error("entry {index} ({key:?}) has negative value {value}")]
    NegativeValue {
        /// Position of the entry.
        index: usize,
        /// The entry key.
        key: String,
        /// The value found.
        value: f64,
    },
    /// NaN or infinite values have no position on the linear scale.
    #[error("entry {index} ({key:?}) has non-finite value {value}")]
    NonFiniteValue {
        /// Position of the entry.
        index: usize,
        /// The entry key.
        key: String,
        /// The value found.
        value: f64,
    },
    /// Two entries share a key and would collapse onto one band.
    #[error("key {key:?} appears at entries {first} and {second}")]
    DuplicateKey {
        /// The repeated key.
        key: String,
        /// Position of the first occurrence.
        first: usize,
        /// Position of the repeat.
        second: usize,
    },
}
