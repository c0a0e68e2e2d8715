//! Reading and writing the file formats of a line-identification project.
//!
//! Level and line tables are CSV ([`tables`]). Results leave the workbench either as
//! an annotated linelist ([`linelist`]) or as input files for the LOPT
//! level-optimization program ([`lopt`]).

pub mod linelist;
pub mod lopt;
pub mod tables;
