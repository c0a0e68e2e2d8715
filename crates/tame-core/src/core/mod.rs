//! # Core Module
//!
//! Data structures and file formats shared by the matching engine and its callers.
//!
//! ## Architecture
//!
//! - **Spectroscopic Data** ([`models`]) - Energy levels, observed lines, and the
//!   assignments that link them
//! - **File I/O** ([`io`]) - Level and line tables, linelist export, and LOPT input files
//!
//! Nothing in this module performs matching; see [`crate::engine`].

pub mod io;
pub mod models;
