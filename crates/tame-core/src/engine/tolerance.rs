use super::config::ConfigError;
use crate::core::models::line::QualityCategory;
use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default acceptance half-windows in cm⁻¹, keyed by quality category code.
#[rustfmt::skip]
static DEFAULT_TOLERANCES: Map<&'static str, f64> = phf_map! {
    "P" => 0.10,
    "L" => 0.02,
    "G" => 0.02,
    "I" => 0.02,
    "F" => 0.02,
};

/// Mapping from line quality category to the wavenumber half-window (cm⁻¹)
/// within which a line is accepted as a match for a predicted transition.
///
/// Only categories present in the table are searched; lines of any other
/// category are never matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<QualityCategory, f64>",
    into = "BTreeMap<QualityCategory, f64>"
)]
pub struct ToleranceTable {
    half_widths: BTreeMap<QualityCategory, f64>,
}

impl ToleranceTable {
    /// Builds a table from explicit half-widths, rejecting negative or non-finite values.
    pub fn new(half_widths: BTreeMap<QualityCategory, f64>) -> Result<Self, ConfigError> {
        for (&category, &value) in &half_widths {
            check_half_width(category, value)?;
        }
        Ok(Self { half_widths })
    }

    /// A table with no categories; matching against it never finds a line.
    pub fn empty() -> Self {
        Self {
            half_widths: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, category: QualityCategory, half_width: f64) -> Result<(), ConfigError> {
        check_half_width(category, half_width)?;
        self.half_widths.insert(category, half_width);
        Ok(())
    }

    pub fn remove(&mut self, category: QualityCategory) -> Option<f64> {
        self.half_widths.remove(&category)
    }

    pub fn get(&self, category: QualityCategory) -> Option<f64> {
        self.half_widths.get(&category).copied()
    }

    /// Iterates over `(category, half_width)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (QualityCategory, f64)> + '_ {
        self.half_widths.iter().map(|(&c, &w)| (c, w))
    }

    pub fn len(&self) -> usize {
        self.half_widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.half_widths.is_empty()
    }

    /// Returns a copy of this table with every entry of `overrides` applied on top.
    pub fn merged_with(&self, overrides: &ToleranceTable) -> Self {
        let mut half_widths = self.half_widths.clone();
        half_widths.extend(overrides.iter());
        Self { half_widths }
    }
}

impl Default for ToleranceTable {
    fn default() -> Self {
        let half_widths = DEFAULT_TOLERANCES
            .entries()
            .filter_map(|(code, &width)| code.parse::<QualityCategory>().ok().map(|c| (c, width)))
            .collect();
        Self { half_widths }
    }
}

impl TryFrom<BTreeMap<QualityCategory, f64>> for ToleranceTable {
    type Error = ConfigError;

    fn try_from(half_widths: BTreeMap<QualityCategory, f64>) -> Result<Self, Self::Error> {
        Self::new(half_widths)
    }
}

impl From<ToleranceTable> for BTreeMap<QualityCategory, f64> {
    fn from(table: ToleranceTable) -> Self {
        table.half_widths
    }
}

fn check_half_width(category: QualityCategory, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance { category, value })
    }
}
