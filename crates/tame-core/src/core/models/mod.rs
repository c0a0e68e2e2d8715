//! # Core Models Module
//!
//! This module contains the data structures shared by every part of TAME: the
//! candidate energy levels of an element, the observed lines of a spectrum, and
//! the identifications that link the two.
//!
//! ## Key Components
//!
//! - [`level`] - Energy levels with their J value, energy and parity
//! - [`line`] - Observed lines, their quality category and operator annotations
//! - [`assignment`] - Line identifications as (element, upper level, lower level)
//!
//! ## Usage
//!
//! ```
//! use tame_core::core::models::level::{Level, Parity};
//! use tame_core::core::models::line::{Line, QualityCategory};
//!
//! let ground = Level::new("a6D4.5", 4.5, 0.0, Parity::Even);
//! let line = Line::new(38458.9934, QualityCategory::L);
//! assert!(!ground.is_placeholder());
//! assert!(!line.is_matched());
//! ```

pub mod assignment;
pub mod level;
pub mod line;
