// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A reusable, re-renderable bar chart over `vizbar_dom`.
//!
//! One [`BarChart`] holds a configuration (margins, size, bar gap) and renders a dataset of
//! [`Entry`] values into any number of containers:
//! - **Scales** map keys to bands and values to heights ([`ScaleBand`], [`ScaleLinear`]).
//! - **Axes** are described by [`AxisSpec`] and drawn as `g.tick` groups plus a domain path.
//! - **Bars** are reconciled with the previous render through an index-based data join, so
//!   re-rendering with new data or settings updates the existing elements.
//!
//! Invalid settings or data are reported per container as a [`ChartError`]; nothing is
//! validated when a setting is written.

#![no_std]

extern crate alloc;

mod axis;
mod bar_chart;
mod bar_mark;
mod config;
mod container;
mod dataset;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod scale;

#[cfg(test)]
mod bar_chart_tests;

pub use axis::{AxisOrient, AxisScale, AxisSpec, DOMAIN_CLASS, TICK_CLASS, Tick};
pub use bar_chart::{BarChart, RenderOutcome, RenderReport};
pub use bar_mark::{BAR_CLASS, BarGeometry, BarLayout, draw_bars};
pub use config::{BarChartConfig, Margin};
pub use container::{
    CHART_GROUP_CLASS, CONTAINER_GROUP_CLASS, SURFACE_CLASS, Surface, X_AXIS_GROUP_CLASS,
    Y_AXIS_GROUP_CLASS,
};
pub use dataset::{Entry, max_value, validate};
pub use error::{ChartError, ConfigError, DatasetError};
pub use format::TickFormat;
pub use scale::{BAND_PADDING, ScaleBand, ScaleLinear};
