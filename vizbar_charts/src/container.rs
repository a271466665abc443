// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart surface: the `svg` and the groups a bar chart draws into.
//!
//! ```text
//! svg.bar-chart
//! └── g.container-group            translate(left, top)
//!     ├── g.chart-group            bars
//!     ├── g.x-axis-group.axis      translate(0, drawable height)
//!     └── g.y-axis-group.axis
//! ```

use kurbo::Vec2;
use vizbar_dom::{Document, DomError, ElementId, Selector, Tag};

use crate::config::BarChartConfig;

/// Class of the chart's `svg` element.
pub const SURFACE_CLASS: &str = "bar-chart";
/// Class of the margin wrapper group.
pub const CONTAINER_GROUP_CLASS: &str = "container-group";
/// Class of the group holding the bars.
pub const CHART_GROUP_CLASS: &str = "chart-group";
/// Classes of the x axis group.
pub const X_AXIS_GROUP_CLASS: &str = "x-axis-group axis";
/// Classes of the y axis group.
pub const Y_AXIS_GROUP_CLASS: &str = "y-axis-group axis";

/// Handles to the elements of one chart surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surface {
    /// The `svg.bar-chart` element.
    pub svg: ElementId,
    /// The margin wrapper.
    pub container_group: ElementId,
    /// Parent of the bars.
    pub chart_group: ElementId,
    /// Parent of the x axis.
    pub x_axis_group: ElementId,
    /// Parent of the y axis.
    pub y_axis_group: ElementId,
}

impl Surface {
    /// Returns `true` if every element is alive and still nested under `container`.
    pub fn is_attached(&self, doc: &Document, container: ElementId) -> bool {
        let parent_is = |id: ElementId, parent: ElementId| {
            doc.element(id)
                .is_ok_and(|el| el.parent() == Some(parent))
        };
        parent_is(self.svg, container)
            && parent_is(self.container_group, self.svg)
            && parent_is(self.chart_group, self.container_group)
            && parent_is(self.x_axis_group, self.container_group)
            && parent_is(self.y_axis_group, self.container_group)
    }
}

fn first_class(class: &str) -> &str {
    class.split_whitespace().next().unwrap_or(class)
}

fn find_group(doc: &Document, parent: ElementId, class: &str) -> Option<ElementId> {
    doc.select_children(parent, &Selector::tag_class(Tag::G, first_class(class)))
        .first()
        .copied()
}

/// Finds a complete surface under the given `svg.bar-chart` element.
pub(crate) fn locate(doc: &Document, svg: ElementId) -> Option<Surface> {
    let container_group = find_group(doc, svg, CONTAINER_GROUP_CLASS)?;
    Some(Surface {
        svg,
        container_group,
        chart_group: find_group(doc, container_group, CHART_GROUP_CLASS)?,
        x_axis_group: find_group(doc, container_group, X_AXIS_GROUP_CLASS)?,
        y_axis_group: find_group(doc, container_group, Y_AXIS_GROUP_CLASS)?,
    })
}

fn group(doc: &mut Document, parent: ElementId, classes: &str) -> Result<ElementId, DomError> {
    let id = doc.append(parent, Tag::G)?;
    doc.element_mut(id)?.classed(classes, true);
    Ok(id)
}

/// Builds a fresh surface as the last child of `container`.
pub(crate) fn create(doc: &mut Document, container: ElementId) -> Result<Surface, DomError> {
    let svg = doc.append(container, Tag::Svg)?;
    doc.element_mut(svg)?.classed(SURFACE_CLASS, true);
    let container_group = group(doc, svg, CONTAINER_GROUP_CLASS)?;
    Ok(Surface {
        svg,
        container_group,
        chart_group: group(doc, container_group, CHART_GROUP_CLASS)?,
        x_axis_group: group(doc, container_group, X_AXIS_GROUP_CLASS)?,
        y_axis_group: group(doc, container_group, Y_AXIS_GROUP_CLASS)?,
    })
}

/// Returns the surface of `container`, building it if needed.
///
/// `known` is the surface remembered from an earlier render. A damaged `known` surface is
/// removed. Otherwise the container's children are searched for a complete `svg.bar-chart`;
/// incomplete ones the chart did not build are left alone. The flag is `true` when a new
/// surface was built.
pub(crate) fn ensure(
    doc: &mut Document,
    container: ElementId,
    known: Option<Surface>,
) -> Result<(Surface, bool), DomError> {
    doc.element(container)?;
    if let Some(surface) = known {
        if surface.is_attached(doc, container) {
            return Ok((surface, false));
        }
        if doc.contains(surface.svg) {
            tracing::debug!(?container, svg = ?surface.svg, "replacing damaged chart surface");
            doc.remove(surface.svg)?;
        }
    }

    let found = doc
        .select_children(container, &Selector::tag_class(Tag::Svg, SURFACE_CLASS))
        .into_iter()
        .find_map(|svg| locate(doc, svg));
    if let Some(surface) = found {
        return Ok((surface, false));
    }

    let surface = create(doc, container)?;
    tracing::debug!(?container, svg = ?surface.svg, "created chart surface");
    Ok((surface, true))
}

/// Sizes the surface for `config` and moves the wrapper group inside the margins.
///
/// The `svg` size changes through a transition of `config.transition_ms`.
pub(crate) fn resize(
    doc: &mut Document,
    surface: &Surface,
    config: &BarChartConfig,
) -> Result<(), DomError> {
    let size = config.surface_size();
    let mut transition = doc.transition(surface.svg).duration(config.transition_ms);
    transition
        .attr("width", size.width)?
        .attr("height", size.height)?;

    doc.element_mut(surface.container_group)?.set_attr(
        "transform",
        Vec2::new(config.margin.left, config.margin.top),
    );
    Ok(())
}
