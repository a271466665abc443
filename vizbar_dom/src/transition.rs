// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fire-and-forget attribute transitions.
//!
//! A transition records a tween from an attribute's current value to a target. The document
//! owns all pending tweens and steps them when the host calls
//! [`Document::advance`](crate::Document::advance); whoever started the transition never hears
//! about it again.

use crate::{Document, DomError, ElementId};

/// Default transition length in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 250.0;

/// Easing curves for tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Slow start and end.
    #[default]
    CubicInOut,
}

impl Ease {
    /// Maps normalized time `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Tween {
    pub(crate) element: ElementId,
    pub(crate) name: &'static str,
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    ease: Ease,
}

impl Tween {
    /// Steps the tween and returns the value to write plus whether it has finished.
    pub(crate) fn step(&mut self, dt: f64) -> (f64, bool) {
        self.elapsed += dt.max(0.0);
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            return (self.to, true);
        }
        let k = self.ease.apply(t);
        (self.from + (self.to - self.from) * k, false)
    }
}

/// A transition bound to one element, created by [`Document::transition`].
#[derive(Debug)]
pub struct Transition<'a> {
    doc: &'a mut Document,
    element: ElementId,
    duration: f64,
    ease: Ease,
}

impl<'a> Transition<'a> {
    pub(crate) fn new(doc: &'a mut Document, element: ElementId) -> Self {
        Self {
            doc,
            element,
            duration: DEFAULT_DURATION_MS,
            ease: Ease::default(),
        }
    }

    /// Sets the duration in milliseconds. Zero or non-finite durations apply targets at once.
    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = ms;
        self
    }

    /// Sets the easing curve.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Tweens numeric attribute `name` towards `to`.
    ///
    /// If the attribute has no numeric value yet there is nothing to interpolate from, so the
    /// target is written immediately. Any tween already running on the same attribute is
    /// replaced.
    pub fn attr(&mut self, name: &'static str, to: f64) -> Result<&mut Self, DomError> {
        let element = self.element;
        let from = self.doc.element(element)?.attr_f64(name);
        self.doc
            .tweens
            .retain(|t| !(t.element == element && t.name == name));

        let animate = self.duration.is_finite() && self.duration > 0.0;
        match from {
            Some(from) if animate && from != to => {
                self.doc.tweens.push(Tween {
                    element,
                    name,
                    from,
                    to,
                    elapsed: 0.0,
                    duration: self.duration,
                    ease: self.ease,
                });
            }
            _ => {
                self.doc.element_mut(element)?.set_attr(name, to);
            }
        }
        Ok(self)
    }
}
