// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reusable bar chart component.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Size, Vec2};
use vizbar_dom::{Bound, Document, ElementId, JoinCounts};

use crate::axis::AxisSpec;
use crate::bar_mark::{BarLayout, draw_bars};
use crate::config::{BarChartConfig, Margin};
use crate::container::{self, Surface};
use crate::dataset::{self, Entry};
use crate::error::ChartError;
use crate::format::TickFormat;
use crate::scale::{ScaleBand, ScaleLinear};

/// What one render left behind in one container.
#[derive(Clone, Debug)]
struct ContainerState {
    surface: Surface,
    drawable: Size,
    x: ScaleBand,
    y: ScaleLinear,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
}

/// Summary of a successful render into one container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderReport {
    /// The container rendered into.
    pub container: ElementId,
    /// `true` when the chart surface was built by this render.
    pub created: bool,
    /// Size of the plotting area.
    pub drawable: Size,
    /// How the bars were reconciled.
    pub bars: JoinCounts,
}

/// Result of rendering into one bound container.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutcome {
    /// The container.
    pub container: ElementId,
    /// The report, or why this container was skipped.
    pub result: Result<RenderReport, ChartError>,
}

/// A configurable, re-renderable vertical bar chart.
///
/// The chart keeps its configuration plus per-container state (surface handles, scales and
/// axes from the last successful render), so one instance can render into many containers
/// without their renders interfering.
///
/// ```
/// use vizbar_charts::{BarChart, Entry, Margin};
/// use vizbar_dom::{Bound, Document, Tag};
///
/// let mut doc = Document::new();
/// let container = doc.append(doc.root(), Tag::Div).unwrap();
/// let data = vec![Entry::new("A", 0.08167), Entry::new("B", 0.01492)];
///
/// let mut chart = BarChart::new();
/// chart.set_margin(Margin::uniform(10.0)).set_gap(5.0);
/// let outcomes = chart.render(&mut doc, &Bound::datum([container], data));
/// assert!(outcomes[0].result.is_ok());
/// assert!(chart.is_rendered());
/// ```
#[derive(Clone, Debug, Default)]
pub struct BarChart {
    config: BarChartConfig,
    states: HashMap<ElementId, ContainerState>,
}

impl BarChart {
    /// Creates a chart with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a chart with `config`.
    pub fn with_config(config: BarChartConfig) -> Self {
        Self {
            config,
            states: HashMap::new(),
        }
    }

    /// The current configuration.
    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    /// Replaces the configuration. Takes effect on the next render.
    pub fn set_config(&mut self, config: BarChartConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Margins around the drawable area.
    pub fn margin(&self) -> Margin {
        self.config.margin
    }

    /// Sets the margins.
    pub fn set_margin(&mut self, margin: Margin) -> &mut Self {
        self.config.margin = margin;
        self
    }

    /// Chart width, margins included.
    pub fn width(&self) -> f64 {
        self.config.width
    }

    /// Sets the chart width.
    pub fn set_width(&mut self, width: f64) -> &mut Self {
        self.config.width = width;
        self
    }

    /// Chart height, margins included.
    pub fn height(&self) -> f64 {
        self.config.height
    }

    /// Sets the chart height.
    pub fn set_height(&mut self, height: f64) -> &mut Self {
        self.config.height = height;
        self
    }

    /// Gap between bars, as a percentage of the band width.
    pub fn gap(&self) -> f64 {
        self.config.gap
    }

    /// Sets the gap percentage.
    pub fn set_gap(&mut self, gap: f64) -> &mut Self {
        self.config.gap = gap;
        self
    }

    /// Duration of the surface resize transition.
    pub fn transition_ms(&self) -> f64 {
        self.config.transition_ms
    }

    /// Sets the resize transition duration.
    pub fn set_transition_ms(&mut self, ms: f64) -> &mut Self {
        self.config.transition_ms = ms;
        self
    }

    /// Returns `true` once any container has rendered successfully.
    pub fn is_rendered(&self) -> bool {
        !self.states.is_empty()
    }

    /// The scales committed by the last successful render into `container`.
    pub fn scales(&self, container: ElementId) -> Option<(&ScaleBand, &ScaleLinear)> {
        self.states.get(&container).map(|s| (&s.x, &s.y))
    }

    /// The x and y axes committed by the last successful render into `container`.
    pub fn axes(&self, container: ElementId) -> Option<(&AxisSpec, &AxisSpec)> {
        self.states.get(&container).map(|s| (&s.x_axis, &s.y_axis))
    }

    /// The surface last rendered into `container`.
    pub fn surface(&self, container: ElementId) -> Option<Surface> {
        self.states.get(&container).map(|s| s.surface)
    }

    /// The drawable size of the last successful render into `container`.
    pub fn drawable(&self, container: ElementId) -> Option<Size> {
        self.states.get(&container).map(|s| s.drawable)
    }

    /// Drops what the chart remembers about `container`. The document is left untouched.
    pub fn forget(&mut self, container: ElementId) -> bool {
        self.states.remove(&container).is_some()
    }

    /// Renders into every container of `selection` with the dataset bound to it.
    ///
    /// Containers are independent: one failing does not stop the others, and a failing
    /// container keeps the state of its last successful render.
    pub fn render<D: AsRef<[Entry]>>(
        &mut self,
        doc: &mut Document,
        selection: &Bound<D>,
    ) -> Vec<RenderOutcome> {
        if selection.is_empty() {
            tracing::debug!("no containers bound, nothing to render");
            return Vec::new();
        }
        selection
            .iter()
            .map(|(container, data)| {
                let result = self.render_container(doc, container, data.as_ref());
                if let Err(err) = &result {
                    tracing::warn!(?container, %err, "bar chart render failed");
                }
                RenderOutcome { container, result }
            })
            .collect()
    }

    /// Renders `data` into one container.
    pub fn render_container(
        &mut self,
        doc: &mut Document,
        container: ElementId,
        data: &[Entry],
    ) -> Result<RenderReport, ChartError> {
        let drawable = self.config.drawable_size()?;
        dataset::validate(data)?;
        doc.element(container)?;
        tracing::debug!(?container, entries = data.len(), ?drawable, "rendering bar chart");

        let x = ScaleBand::new(data.iter().map(|e| e.key.as_str()), (0.0, drawable.width));
        let y = ScaleLinear::new((0.0, dataset::max_value(data)), (drawable.height, 0.0));
        let x_axis = AxisSpec::bottom(x.clone());
        let y_axis = AxisSpec::left(y).with_ticks(10, TickFormat::Percent);

        let known = self.states.get(&container).map(|s| s.surface);
        let (surface, created) = container::ensure(doc, container, known)?;
        container::resize(doc, &surface, &self.config)?;

        let layout = BarLayout::new(x.band_width(), self.config.gap, drawable);
        let bars = draw_bars(doc, surface.chart_group, data, &x, &y, &layout)?;
        tracing::debug!(?container, ?bars, bar_width = layout.bar_width, "bars reconciled");

        doc.element_mut(surface.x_axis_group)?
            .set_attr("transform", Vec2::new(0.0, drawable.height));
        x_axis.draw(doc, surface.x_axis_group)?;
        y_axis.draw(doc, surface.y_axis_group)?;

        self.states.insert(
            container,
            ContainerState {
                surface,
                drawable,
                x,
                y,
                x_axis,
                y_axis,
            },
        );
        Ok(RenderReport {
            container,
            created,
            drawable,
            bars,
        })
    }
}
