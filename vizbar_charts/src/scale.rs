// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales.
//!
//! [`ScaleBand`] places categorical keys into evenly spaced, padded bands along x.
//! [`ScaleLinear`] maps magnitudes onto pixel extents and generates round tick values.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;

/// Padding fraction used by the bar chart between (and around) bands.
pub const BAND_PADDING: f64 = 0.1;

/// A discrete band scale over an ordered list of keys.
///
/// The domain keeps keys in the order given; a repeated key keeps its first band. With
/// rounding on (the default), the step and band width are whole pixels and the leftover space
/// is split evenly on both sides, so bars never straddle pixel seams.
#[derive(Clone, Debug)]
pub struct ScaleBand {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    round: bool,
}

#[derive(Clone, Copy, Debug)]
struct BandLayout {
    first: f64,
    step: f64,
    band: f64,
}

impl ScaleBand {
    /// Creates a rounded band scale with [`BAND_PADDING`] inner and outer padding.
    pub fn new<I, S>(domain: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keys = Vec::new();
        let mut index = HashMap::new();
        for key in domain {
            let key = key.into();
            if !index.contains_key(&key) {
                index.insert(key.clone(), keys.len());
                keys.push(key);
            }
        }
        Self {
            domain: keys,
            index,
            range,
            padding_inner: BAND_PADDING,
            padding_outer: BAND_PADDING,
            round: true,
        }
    }

    /// Sets inner and outer padding as fractions of a step.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Enables or disables whole-pixel rounding.
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    fn layout(&self) -> BandLayout {
        let (r0, r1) = self.range;
        let (start, stop) = if r1 < r0 { (r1, r0) } else { (r0, r1) };
        let n = self.domain.len() as f64;
        let denom = n - self.padding_inner + 2.0 * self.padding_outer;
        if self.domain.is_empty() || denom <= 0.0 {
            return BandLayout {
                first: start,
                step: 0.0,
                band: 0.0,
            };
        }

        let span = stop - start;
        if self.round {
            let step = (span / denom).floor();
            let error = span - (n - self.padding_inner) * step;
            BandLayout {
                first: start + (error / 2.0).round(),
                step,
                band: (step * (1.0 - self.padding_inner)).round(),
            }
        } else {
            let step = span / denom;
            BandLayout {
                first: start + step * self.padding_outer,
                step,
                band: step * (1.0 - self.padding_inner),
            }
        }
    }

    /// Width of a single band.
    pub fn band_width(&self) -> f64 {
        self.layout().band
    }

    /// Distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.layout().step
    }

    /// Start of the band at `index` (domain order).
    ///
    /// A reversed range (`r1 < r0`) lays the first key out at the high end.
    pub fn x(&self, index: usize) -> f64 {
        let layout = self.layout();
        let (r0, r1) = self.range;
        let slot = if r1 < r0 {
            self.domain.len().saturating_sub(index + 1)
        } else {
            index
        };
        layout.first + layout.step * slot as f64
    }

    /// Start of the band for `key`, or `None` if the key is not in the domain.
    pub fn map(&self, key: &str) -> Option<f64> {
        self.index_of(key).map(|i| self.x(i))
    }

    /// Position of `key` in the domain.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// The keys in domain order.
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Number of bands.
    pub fn count(&self) -> usize {
        self.domain.len()
    }

    /// The configured output range, low end first.
    pub fn range_extent(&self) -> (f64, f64) {
        let (r0, r1) = self.range;
        if r1 < r0 { (r1, r0) } else { (r0, r1) }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain (`d0 == d1`) maps everything to the start of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// The domain as authored.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The range as authored.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Spacing between ticks for roughly `count` ticks over the domain.
    ///
    /// Steps are powers of ten times 1, 2 or 5. Returns `0` for an empty or non-finite domain.
    pub fn tick_step(&self, count: usize) -> f64 {
        let (min, max) = self.sorted_domain();
        let span = max - min;
        if count == 0 || !span.is_finite() || span <= 0.0 {
            return 0.0;
        }
        let m = count as f64;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "log10 of a finite positive span fits easily in i32"
        )]
        let power = (span / m).log10().floor() as i32;
        let mut step = 10_f64.powi(power);
        let err = m / span * step;
        if err <= 0.15 {
            step *= 10.0;
        } else if err <= 0.35 {
            step *= 5.0;
        } else if err <= 0.75 {
            step *= 2.0;
        }
        step
    }

    /// Round tick values inside the domain, ascending.
    ///
    /// A degenerate domain yields its single value.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.sorted_domain();
        if count == 0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let step = self.tick_step(count);
        if step <= 0.0 {
            return alloc::vec![min];
        }

        let first = (min / step).ceil();
        let last = (max / step).floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "tick counts are bounded by the requested count times a small factor"
        )]
        let (first, last) = (first as i64, last as i64);

        // Dividing by the inverse step keeps fractional ticks exact (7 / 100 rather than 7 * 0.01).
        let inverse = if step < 1.0 {
            Some((1.0 / step).round())
        } else {
            None
        };
        (first..=last)
            .map(|i| match inverse {
                Some(inv) => i as f64 / inv,
                None => i as f64 * step,
            })
            .collect()
    }

    fn sorted_domain(&self) -> (f64, f64) {
        let (d0, d1) = self.domain;
        if d1 < d0 { (d1, d0) } else { (d0, d1) }
    }
}
