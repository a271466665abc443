// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis descriptors and axis drawing.
//!
//! An [`AxisSpec`] is derived from a scale and never edited in place; charts rebuild it on every
//! render. [`AxisSpec::draw`] lays the axis out inside a group element:
//! - one `g.tick` per tick, holding a `line` and a `text` label,
//! - one `path.domain` spanning the scale's range with outer ticks at both ends.
//!
//! Ticks are reconciled with a keyed join on their label, so a label that survives a redraw
//! keeps its element.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::Vec2;
use vizbar_dom::{Document, DomError, ElementId, JoinCounts, Selector, Tag, join_by_key};

use crate::format::TickFormat;
use crate::scale::{ScaleBand, ScaleLinear};

/// Class of each tick group.
pub const TICK_CLASS: &str = "tick";
/// Class of the domain line.
pub const DOMAIN_CLASS: &str = "domain";

/// Axis placement relative to the plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis with ticks pointing up.
    Top,
    /// A horizontal axis with ticks pointing down.
    Bottom,
    /// A vertical axis with ticks pointing left.
    Left,
    /// A vertical axis with ticks pointing right.
    Right,
}

impl AxisOrient {
    fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// `-1` when ticks point towards negative coordinates.
    fn sign(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }
}

/// The scale an axis is bound to.
#[derive(Clone, Debug)]
pub enum AxisScale {
    /// Categorical ticks, one per key, centred in each band.
    Band(ScaleBand),
    /// Numeric ticks at round values.
    Linear(ScaleLinear),
}

impl From<ScaleBand> for AxisScale {
    fn from(value: ScaleBand) -> Self {
        Self::Band(value)
    }
}

impl From<ScaleLinear> for AxisScale {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

/// A positioned, labelled tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Offset along the axis.
    pub position: f64,
    /// Label text.
    pub label: String,
}

/// An axis descriptor.
#[derive(Clone, Debug)]
pub struct AxisSpec {
    /// The bound scale.
    pub scale: AxisScale,
    /// Axis placement.
    pub orient: AxisOrient,
    /// Approximate number of ticks for linear scales.
    pub tick_count: usize,
    /// Label format for linear scales.
    pub tick_format: TickFormat,
    /// Length of each tick line.
    pub inner_tick_size: f64,
    /// Length of the domain path's end caps.
    pub outer_tick_size: f64,
    /// Gap between a tick line and its label.
    pub tick_padding: f64,
}

impl AxisSpec {
    /// Creates an axis with 10 ticks, automatic labels, 6px ticks and 3px label padding.
    pub fn new(scale: impl Into<AxisScale>, orient: AxisOrient) -> Self {
        Self {
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_format: TickFormat::Auto,
            inner_tick_size: 6.0,
            outer_tick_size: 6.0,
            tick_padding: 3.0,
        }
    }

    /// A bottom axis.
    pub fn bottom(scale: impl Into<AxisScale>) -> Self {
        Self::new(scale, AxisOrient::Bottom)
    }

    /// A left axis.
    pub fn left(scale: impl Into<AxisScale>) -> Self {
        Self::new(scale, AxisOrient::Left)
    }

    /// Sets the tick count hint and label format.
    pub fn with_ticks(mut self, count: usize, format: TickFormat) -> Self {
        self.tick_count = count;
        self.tick_format = format;
        self
    }

    /// Sets inner and outer tick sizes.
    pub fn with_tick_size(mut self, inner: f64, outer: f64) -> Self {
        self.inner_tick_size = inner;
        self.outer_tick_size = outer;
        self
    }

    /// Sets the label padding.
    pub fn with_tick_padding(mut self, padding: f64) -> Self {
        self.tick_padding = padding;
        self
    }

    /// Computes tick positions and labels.
    pub fn ticks(&self) -> Vec<Tick> {
        match &self.scale {
            AxisScale::Band(band) => {
                let half = band.band_width() / 2.0;
                band.domain()
                    .iter()
                    .enumerate()
                    .map(|(i, key)| Tick {
                        position: band.x(i) + half,
                        label: key.clone(),
                    })
                    .collect()
            }
            AxisScale::Linear(linear) => {
                let step = linear.tick_step(self.tick_count);
                linear
                    .ticks(self.tick_count)
                    .into_iter()
                    .map(|v| Tick {
                        position: linear.map(v),
                        label: self.tick_format.format(v, step),
                    })
                    .collect()
            }
        }
    }

    fn range(&self) -> (f64, f64) {
        match &self.scale {
            AxisScale::Band(band) => band.range_extent(),
            AxisScale::Linear(linear) => linear.range(),
        }
    }

    /// Path data for the domain line with its outer ticks.
    pub fn domain_path(&self) -> String {
        let (r0, r1) = self.range();
        let cap = self.orient.sign() * self.outer_tick_size;
        if self.orient.is_horizontal() {
            format!("M{r0},{cap}V0H{r1}V{cap}")
        } else {
            format!("M{cap},{r0}H0V{r1}H{cap}")
        }
    }

    /// Draws (or redraws) the axis into `group`.
    ///
    /// Returns the tick join counts.
    pub fn draw(&self, doc: &mut Document, group: ElementId) -> Result<JoinCounts, DomError> {
        let ticks = self.ticks();
        let domain = self.ensure_domain(doc, group)?;

        let existing = doc
            .select_children(group, &Selector::tag_class(Tag::G, TICK_CLASS))
            .into_iter()
            .map(|id| -> Result<_, DomError> {
                let key = doc.element(id)?.key().map(String::from);
                Ok((id, key))
            })
            .collect::<Result<Vec<_>, DomError>>()?;
        let join = join_by_key(&existing, ticks.iter().map(|t| t.label.clone()));
        tracing::trace!(?group, counts = ?join.counts(), "axis tick join");

        for id in &join.exit {
            doc.remove(*id)?;
        }

        let mut tick_ids = vec![None; ticks.len()];
        for (index, id) in &join.update {
            tick_ids[*index] = Some(*id);
        }
        for index in &join.enter {
            let g = doc.insert_before(group, Tag::G, domain)?;
            doc.element_mut(g)?
                .classed(TICK_CLASS, true)
                .bind_key(ticks[*index].label.clone());
            doc.append(g, Tag::Line)?;
            doc.append(g, Tag::Text)?;
            tick_ids[*index] = Some(g);
        }

        for (tick, id) in ticks.iter().zip(tick_ids) {
            if let Some(id) = id {
                self.layout_tick(doc, id, tick)?;
            }
        }

        let path = self.domain_path();
        doc.element_mut(domain)?.set_attr("d", path);
        Ok(join.counts())
    }

    fn ensure_domain(&self, doc: &mut Document, group: ElementId) -> Result<ElementId, DomError> {
        let found = doc
            .select_children(group, &Selector::tag_class(Tag::Path, DOMAIN_CLASS))
            .first()
            .copied();
        match found {
            Some(id) => Ok(id),
            None => {
                let id = doc.append(group, Tag::Path)?;
                doc.element_mut(id)?.classed(DOMAIN_CLASS, true);
                Ok(id)
            }
        }
    }

    fn layout_tick(&self, doc: &mut Document, g: ElementId, tick: &Tick) -> Result<(), DomError> {
        let sign = self.orient.sign();
        let inner = self.inner_tick_size;
        let label_offset = sign * (inner.max(0.0) + self.tick_padding);

        let offset = if self.orient.is_horizontal() {
            Vec2::new(tick.position, 0.0)
        } else {
            Vec2::new(0.0, tick.position)
        };
        doc.element_mut(g)?
            .set_attr("transform", offset)
            .set_style("opacity", 1.0);

        let line = child(doc, g, Tag::Line)?;
        let text = child(doc, g, Tag::Text)?;
        if self.orient.is_horizontal() {
            doc.element_mut(line)?
                .set_attr("x2", 0.0)
                .set_attr("y2", sign * inner);
            doc.element_mut(text)?
                .set_attr("x", 0.0)
                .set_attr("y", label_offset)
                .set_attr(
                    "dy",
                    if self.orient == AxisOrient::Top {
                        "0em"
                    } else {
                        ".71em"
                    },
                )
                .set_attr("text-anchor", "middle")
                .set_text(tick.label.clone());
        } else {
            doc.element_mut(line)?
                .set_attr("x2", sign * inner)
                .set_attr("y2", 0.0);
            doc.element_mut(text)?
                .set_attr("x", label_offset)
                .set_attr("y", 0.0)
                .set_attr("dy", ".32em")
                .set_attr(
                    "text-anchor",
                    if self.orient == AxisOrient::Left {
                        "end"
                    } else {
                        "start"
                    },
                )
                .set_text(tick.label.clone());
        }
        Ok(())
    }
}

/// First child of `g` with `tag`, appended if missing.
fn child(doc: &mut Document, g: ElementId, tag: Tag) -> Result<ElementId, DomError> {
    let found = doc
        .children(g)?
        .iter()
        .copied()
        .find(|id| doc.element(*id).is_ok_and(|el| el.tag() == tag));
    match found {
        Some(id) => Ok(id),
        None => doc.append(g, tag),
    }
}
