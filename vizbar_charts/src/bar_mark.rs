// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar geometry and bar reconciliation.

extern crate alloc;

use kurbo::{Point, Rect, Size};
use vizbar_dom::{Document, DomError, ElementId, JoinCounts, Selector, Tag, join_by_index};

use crate::dataset::Entry;
use crate::scale::{ScaleBand, ScaleLinear};

/// Class of each bar element.
pub const BAR_CLASS: &str = "bar";

/// Position and size of one bar, in drawable-area coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    /// Top-left corner.
    pub origin: Point,
    /// Width and height.
    pub size: Size,
}

impl BarGeometry {
    /// The bar as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }
}

/// Per-render bar sizing shared by every bar.
///
/// The gap is a percentage of the band: `gap_size = band * gap / 100`, split evenly on both
/// sides of the bar, and `bar_width = band - gap_size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    /// Band width from the x scale.
    pub band_width: f64,
    /// Total horizontal gap inside a band.
    pub gap_size: f64,
    /// Drawn bar width.
    pub bar_width: f64,
    /// Size of the drawable area.
    pub drawable: Size,
}

impl BarLayout {
    /// Derives bar sizing from a band width and a gap percentage.
    pub fn new(band_width: f64, gap_percent: f64, drawable: Size) -> Self {
        let gap_size = band_width / 100.0 * gap_percent;
        Self {
            band_width,
            gap_size,
            bar_width: band_width - gap_size,
            drawable,
        }
    }

    /// Final geometry of a bar whose band starts at `band_start` and whose top is at `top`.
    pub fn bar(&self, band_start: f64, top: f64) -> BarGeometry {
        BarGeometry {
            origin: Point::new(band_start + self.gap_size / 2.0, top),
            size: Size::new(self.bar_width, self.drawable.height - top),
        }
    }

    /// Geometry of a newly entering bar: final height, parked at the right edge.
    pub fn entering(&self, top: f64) -> BarGeometry {
        BarGeometry {
            origin: Point::new(self.drawable.width, top),
            size: Size::new(self.bar_width, self.drawable.height - top),
        }
    }
}

fn write_geometry(doc: &mut Document, id: ElementId, geom: BarGeometry) -> Result<(), DomError> {
    doc.element_mut(id)?
        .set_attr("width", geom.size.width)
        .set_attr("x", geom.origin.x)
        .set_attr("y", geom.origin.y)
        .set_attr("height", geom.size.height);
    Ok(())
}

/// Reconciles the `.bar` children of `group` with `data`, joined by index.
///
/// - Entering data get a new `rect.bar` at its final height but `x` at the right edge of the
///   drawable area.
/// - Surviving bars are moved and resized to their new geometry.
/// - Exiting bars are faded to zero opacity and removed.
pub fn draw_bars(
    doc: &mut Document,
    group: ElementId,
    data: &[Entry],
    x: &ScaleBand,
    y: &ScaleLinear,
    layout: &BarLayout,
) -> Result<JoinCounts, DomError> {
    let existing = doc.select_children(group, &Selector::class(BAR_CLASS));
    let join = join_by_index(&existing, data.len());
    tracing::trace!(?group, counts = ?join.counts(), "bar join");

    for &index in &join.enter {
        let top = y.map(data[index].value);
        let rect = doc.append(group, Tag::Rect)?;
        doc.element_mut(rect)?.classed(BAR_CLASS, true);
        write_geometry(doc, rect, layout.entering(top))?;
    }

    for &(index, id) in &join.update {
        let entry = &data[index];
        let band_start = x.map(&entry.key).unwrap_or_else(|| x.x(index));
        write_geometry(doc, id, layout.bar(band_start, y.map(entry.value)))?;
    }

    for &id in &join.exit {
        doc.element_mut(id)?.set_style("opacity", 0.0);
        doc.remove(id)?;
    }
    Ok(join.counts())
}
