use super::candidates::{self, CandidateTransition};
use super::level_set::LevelSet;
use super::line_index::LineIndex;
use super::progress::{Progress, ProgressReporter};
use super::tolerance::ToleranceTable;
use crate::core::models::line::{AssignmentTarget, Line};
use tracing::trace;

/// Finds the observed lines that lie within tolerance of a predicted transition.
pub struct LineMatcher<'a> {
    index: &'a LineIndex,
    tolerances: &'a ToleranceTable,
}

impl<'a> LineMatcher<'a> {
    pub fn new(index: &'a LineIndex, tolerances: &'a ToleranceTable) -> Self {
        Self { index, tolerances }
    }

    /// Indices of every line matching `candidate`, over all categories of the
    /// tolerance table, each category searched with its own half-window.
    ///
    /// Every line belongs to exactly one category, so the union never repeats an index.
    pub fn match_set(&self, candidate: &CandidateTransition) -> Vec<usize> {
        let mut matches = Vec::new();
        for (category, half_width) in self.tolerances.iter() {
            matches.extend(
                self.index
                    .range_query(category, candidate.predicted_wavenumber, half_width)
                    .iter()
                    .map(|e| e.index),
            );
        }
        matches
    }
}

/// Counters collected over one matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Candidate transitions generated from the level set.
    pub candidates: usize,
    /// Candidates with at least one line within tolerance.
    pub matched_candidates: usize,
    /// Candidates with more than one line within tolerance.
    pub ambiguous_candidates: usize,
    /// Assignments appended to lines.
    pub assignments: usize,
}

/// Matches every candidate transition of `level_set` against `lines`, appending an
/// assignment to the `target` list of each matched line.
///
/// The caller is responsible for clearing stale assignments beforehand; this
/// function only appends.
pub fn match_levels(
    level_set: &LevelSet,
    lines: &mut [Line],
    element: &str,
    target: AssignmentTarget,
    tolerances: &ToleranceTable,
    reporter: &ProgressReporter,
) -> MatchStats {
    let index = LineIndex::build(lines);
    let matcher = LineMatcher::new(&index, tolerances);
    let mut stats = MatchStats::default();

    reporter.report(Progress::TaskStart {
        total_steps: level_set.even().len() as u64,
    });

    for &even in level_set.even() {
        for candidate in candidates::transitions_from(even, level_set.odd()) {
            stats.candidates += 1;

            let matches = matcher.match_set(&candidate);
            if matches.is_empty() {
                continue;
            }
            let ambiguous = matches.len() > 1;
            stats.matched_candidates += 1;
            if ambiguous {
                stats.ambiguous_candidates += 1;
            }
            trace!(
                even = %candidate.even.label,
                odd = %candidate.odd.label,
                wavenumber = candidate.predicted_wavenumber,
                matches = matches.len(),
                "Candidate transition matched."
            );

            for line_idx in matches {
                lines[line_idx]
                    .assignments_mut(target)
                    .push(candidate.assignment(element, ambiguous));
                stats.assignments += 1;
            }
        }
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    stats
}
