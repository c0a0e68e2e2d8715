//! # TAME Core Library
//!
//! Term analysis for atomic spectroscopy: identifies which observed spectral lines
//! correspond to transitions between candidate energy levels, and prepares the
//! identified lines for an external least-squares level optimization (LOPT).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Plain data models (`Level`, `Line`, `Assignment`)
//!   and the file formats around them: CSV level and line tables, the exported
//!   linelist, and the LOPT input files.
//!
//! - **[`engine`]: The Logic Core.** The matching engine itself: level validation,
//!   selection-rule candidate generation, the per-category sorted line index, and
//!   the tolerance-window matcher. The engine performs no I/O.
//!
//! - **[`workflows`]: The Public API.** Sequencing of matching passes for the main
//!   element and impurity elements with idempotent, per-element re-computation.

pub mod core;
pub mod engine;
pub mod workflows;
