// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar chart configuration.

use kurbo::Size;
use vizbar_dom::DEFAULT_DURATION_MS;

use crate::error::ConfigError;

/// Space reserved around the drawable area for axes and labels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin (holds the x axis).
    pub bottom: f64,
    /// Left margin (holds the y axis).
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

impl Margin {
    /// The same margin on all four sides.
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// `left + right`.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// The public attributes of a bar chart.
///
/// Nothing is checked when fields are written; [`BarChartConfig::drawable_size`] validates
/// the whole configuration when a render needs it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BarChartConfig {
    /// Margins around the drawable area.
    pub margin: Margin,
    /// Chart width, margins included.
    pub width: f64,
    /// Chart height, margins included.
    pub height: f64,
    /// Space between bars as a percentage (0 to 100) of the band width.
    pub gap: f64,
    /// Length of the surface resize transition in milliseconds.
    pub transition_ms: f64,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            width: 960.0,
            height: 500.0,
            gap: 2.0,
            transition_ms: DEFAULT_DURATION_MS,
        }
    }
}

impl BarChartConfig {
    /// The plotting area left after subtracting margins.
    pub fn drawable_size(&self) -> Result<Size, ConfigError> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("gap", self.gap),
            ("margin.top", self.margin.top),
            ("margin.right", self.margin.right),
            ("margin.bottom", self.margin.bottom),
            ("margin.left", self.margin.left),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field, value });
        }
        if !(0.0..=100.0).contains(&self.gap) {
            return Err(ConfigError::GapOutOfRange(self.gap));
        }

        let width = self.width - self.margin.horizontal();
        let height = self.height - self.margin.vertical();
        if width < 0.0 || height < 0.0 {
            return Err(ConfigError::NegativeDrawableArea { width, height });
        }
        Ok(Size::new(width, height))
    }

    /// The size written to the surface: `width + left + right` by `height + top + bottom`.
    pub fn surface_size(&self) -> Size {
        Size::new(
            self.width + self.margin.horizontal(),
            self.height + self.margin.vertical(),
        )
    }
}
