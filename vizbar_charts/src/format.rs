// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// How numeric tick values are turned into labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TickFormat {
    /// Fixed-point with thousands separators, with just enough decimals for the tick step.
    #[default]
    Auto,
    /// The value times 100 with a `%` suffix (`0.07` becomes `7%`).
    Percent,
}

impl TickFormat {
    /// Number of decimals needed to tell ticks `step` apart.
    pub fn precision(self, step: f64) -> usize {
        if !step.is_finite() || step <= 0.0 {
            return 0;
        }
        let digits = -(step.log10() + 0.01).floor();
        let digits = match self {
            Self::Auto => digits,
            Self::Percent => digits - 2.0,
        };
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "clamped to a small non-negative range first"
        )]
        {
            digits.clamp(0.0, 20.0) as usize
        }
    }

    /// Formats `value` for a tick sequence spaced `step` apart.
    pub fn format(self, value: f64, step: f64) -> String {
        let precision = self.precision(step);
        match self {
            Self::Auto => group_thousands(&format!("{:.*}", precision, value + 0.0)),
            Self::Percent => format!("{:.*}%", precision, value * 100.0 + 0.0),
        }
    }
}

/// Inserts `,` between groups of three integer digits.
fn group_thousands(fixed: &str) -> String {
    let (sign, rest) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int, frac) = match rest.find('.') {
        Some(dot) => rest.split_at(dot),
        None => (rest, ""),
    };

    let mut out = String::with_capacity(fixed.len() + int.len() / 3);
    out.push_str(sign);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(frac);
    out
}
