//! # Workflows Module
//!
//! This module provides the top-level entry points for line identification in TAME.
//!
//! ## Overview
//!
//! A workflow sequences the engine's matching passes over one or more elements and
//! owns the rules that keep repeated runs consistent: each pass clears the
//! assignments it is about to recompute, impurity passes never touch the main
//! element's list, and level sets are validated before any line is modified.
//!
//! ## Architecture
//!
//! - **Line Matching Workflow** ([`strans`]) - Main element pass, impurity passes,
//!   and the full run combining both.
//!
//! The caller lends the line table as `&mut [Line]` for the duration of a call and
//! remains responsible for loading and persisting it.
//!
//! [`Line`]: crate::core::models::line::Line

pub mod strans;
