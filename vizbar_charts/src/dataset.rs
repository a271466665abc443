// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bar chart data.

extern crate alloc;

use alloc::string::String;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry as MapEntry;

use crate::error::DatasetError;

/// One bar: a categorical key and its magnitude.
///
/// With the `serde` feature, `letter` and `frequency` are accepted as field aliases.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    /// Category shown on the x axis.
    #[cfg_attr(feature = "serde", serde(alias = "letter"))]
    pub key: String,
    /// Bar magnitude; must be finite and non-negative.
    #[cfg_attr(feature = "serde", serde(alias = "frequency"))]
    pub value: f64,
}

impl Entry {
    /// Creates an entry.
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Checks that every value is finite and non-negative and that keys are unique.
pub fn validate(entries: &[Entry]) -> Result<(), DatasetError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if !entry.value.is_finite() {
            return Err(DatasetError::NonFiniteValue {
                index,
                key: entry.key.clone(),
                value: entry.value,
            });
        }
        if entry.value < 0.0 {
            return Err(DatasetError::NegativeValue {
                index,
                key: entry.key.clone(),
                value: entry.value,
            });
        }
        match seen.entry(entry.key.as_str()) {
            MapEntry::Occupied(first) => {
                return Err(DatasetError::DuplicateKey {
                    key: entry.key.clone(),
                    first: *first.get(),
                    second: index,
                });
            }
            MapEntry::Vacant(slot) => {
                slot.insert(index);
            }
        }
    }
    Ok(())
}

/// Largest value in `entries`, or `0` when empty.
pub fn max_value(entries: &[Entry]) -> f64 {
    entries.iter().map(|e| e.value).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn accepts_unique_non_negative_entries() {
        let data = vec![Entry::new("A", 0.08167), Entry::new("B", 0.0)];
        assert_eq!(validate(&data), Ok(()));
        assert_eq!(max_value(&data), 0.08167);
        assert_eq!(max_value(&[]), 0.0);
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        let data = vec![Entry::new("A", 1.0), Entry::new("B", -0.5)];
        assert_eq!(
            validate(&data),
            Err(DatasetError::NegativeValue {
                index: 1,
                key: "B".into(),
                value: -0.5
            })
        );

        let data = vec![Entry::new("A", f64::NAN)];
        assert!(matches!(
            validate(&data),
            Err(DatasetError::NonFiniteValue { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let data = vec![
            Entry::new("A", 1.0),
            Entry::new("B", 2.0),
            Entry::new("A", 3.0),
        ];
        assert_eq!(
            validate(&data),
            Err(DatasetError::DuplicateKey {
                key: "A".into(),
                first: 0,
                second: 2
            })
        );
    }
}
