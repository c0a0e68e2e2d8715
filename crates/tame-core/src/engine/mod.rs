//! # Engine Module
//!
//! This module implements the line-identification engine: it turns a list of
//! candidate energy levels into predicted transitions and reconciles them with an
//! observed line list.
//!
//! ## Overview
//!
//! A matching pass for one element runs entirely in this module:
//!
//! 1. [`level_set`] validates the levels and splits them by parity, sorted by J.
//! 2. [`candidates`] enumerates even/odd pairs allowed by the ΔJ ∈ {-1, 0, +1}
//!    selection rule (J = 0 → 0 excluded) using binary search on J.
//! 3. [`line_index`] groups the observed lines by quality category, sorted by
//!    wavenumber, and answers half-open window queries by binary search.
//! 4. [`matcher`] queries every category with its half-window from the
//!    [`tolerance`] table, flags ambiguous matches, and appends assignments.
//!
//! Sequencing of passes across elements lives in [`crate::workflows`].
//!
//! ## Supporting Modules
//!
//! - **Configuration** ([`config`]) - Run settings and the configuration builder
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-level error type

pub mod candidates;
pub mod config;
pub mod error;
pub mod level_set;
pub mod line_index;
pub mod matcher;
pub mod progress;
pub mod tolerance;
