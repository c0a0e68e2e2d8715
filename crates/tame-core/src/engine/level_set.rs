use crate::core::models::level::{Level, MAX_LABEL_LEN, Parity};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LevelSetError {
    #[error("Level list contains a blank level (row {index}); edit or delete it before matching")]
    BlankLevel { index: usize },

    #[error("Level label '{label}' is {length} characters long (maximum is {max})", max = MAX_LABEL_LEN)]
    LabelTooLong { label: String, length: usize },

    #[error("Level label '{label}' is used more than once")]
    DuplicateLabel { label: String },

    #[error("Level '{label}' has an invalid J value: {j}")]
    InvalidJ { label: String, j: f64 },

    #[error("Level '{label}' has a non-finite energy: {energy}")]
    InvalidEnergy { label: String, energy: f64 },
}

/// Checks the preconditions every level list must meet before matching.
///
/// Checks run in a fixed order over the whole list: blank levels first, then
/// label lengths, duplicate labels, and finally the numeric fields. The first
/// failing check is reported.
pub fn validate(levels: &[Level]) -> Result<(), LevelSetError> {
    if let Some(index) = levels.iter().position(Level::is_placeholder) {
        return Err(LevelSetError::BlankLevel { index });
    }

    if let Some(level) = levels.iter().find(|l| l.label_len() > MAX_LABEL_LEN) {
        return Err(LevelSetError::LabelTooLong {
            label: level.label.clone(),
            length: level.label_len(),
        });
    }

    let mut seen = HashSet::with_capacity(levels.len());
    for level in levels {
        if !seen.insert(level.label.as_str()) {
            return Err(LevelSetError::DuplicateLabel {
                label: level.label.clone(),
            });
        }
    }

    for level in levels {
        if !level.j.is_finite() || level.j < 0.0 {
            return Err(LevelSetError::InvalidJ {
                label: level.label.clone(),
                j: level.j,
            });
        }
        if !level.energy.is_finite() {
            return Err(LevelSetError::InvalidEnergy {
                label: level.label.clone(),
                energy: level.energy,
            });
        }
    }

    Ok(())
}

/// A validated level list split by parity, each half sorted ascending by J.
///
/// Sorting is stable, so levels sharing a J value keep their input order.
#[derive(Debug, Clone)]
pub struct LevelSet<'a> {
    even: Vec<&'a Level>,
    odd: Vec<&'a Level>,
}

impl<'a> LevelSet<'a> {
    pub fn new(levels: &'a [Level]) -> Result<Self, LevelSetError> {
        validate(levels)?;

        let (mut even, mut odd): (Vec<&Level>, Vec<&Level>) =
            levels.iter().partition(|l| l.parity == Parity::Even);
        even.sort_by(|a, b| a.j.total_cmp(&b.j));
        odd.sort_by(|a, b| a.j.total_cmp(&b.j));

        Ok(Self { even, odd })
    }

    pub fn even(&self) -> &[&'a Level] {
        &self.even
    }

    pub fn odd(&self) -> &[&'a Level] {
        &self.odd
    }

    pub fn len(&self) -> usize {
        self.even.len() + self.odd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
