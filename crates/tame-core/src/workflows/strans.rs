use crate::core::models::level::Level;
use crate::core::models::line::{AssignmentTarget, Line};
use crate::engine::config::{ConfigError, StransConfig};
use crate::engine::error::EngineError;
use crate::engine::level_set::LevelSet;
use crate::engine::matcher::{MatchStats, match_levels};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tolerance::ToleranceTable;
use tracing::{info, instrument, warn};

/// The levels of one element, labelled with the element name used in assignments.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementLevels {
    pub element: String,
    pub levels: Vec<Level>,
}

impl ElementLevels {
    pub fn new(element: impl Into<String>, levels: Vec<Level>) -> Self {
        Self {
            element: element.into(),
            levels,
        }
    }
}

/// Outcome of one element's matching pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassSummary {
    pub element: String,
    pub target: AssignmentTarget,
    pub stats: MatchStats,
    /// Lines carrying at least one assignment from this element after the pass.
    pub matched_lines: usize,
}

/// Outcome of a full run: the main element pass followed by every impurity pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StransReport {
    pub main: PassSummary,
    pub others: Vec<PassSummary>,
}

impl StransReport {
    pub fn total_assignments(&self) -> usize {
        self.main.stats.assignments
            + self
                .others
                .iter()
                .map(|s| s.stats.assignments)
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clearing {
    /// Empty the whole target list before matching.
    WholeList,
    /// Remove only the entries of the element being matched.
    ElementOnly,
    /// Leave the target list as it is.
    Keep,
}

/// Matches the element under study, replacing every main-list assignment.
///
/// Levels are validated before anything else; on failure no line is modified.
/// Running this twice on unchanged input leaves the lines exactly as after the
/// first run.
#[instrument(skip_all, name = "strans_main", fields(element = %config.main_element))]
pub fn run_main(
    levels: &[Level],
    lines: &mut [Line],
    config: &StransConfig,
    reporter: &ProgressReporter,
) -> Result<PassSummary, EngineError> {
    let level_set = build_level_set(&config.main_element, levels)?;
    Ok(execute_pass(
        &level_set,
        lines,
        &config.main_element,
        AssignmentTarget::Main,
        Clearing::WholeList,
        &config.tolerances,
        reporter,
    ))
}

/// Matches a single impurity element into the other-elements list.
///
/// Only this element's previous entries are removed first, so assignments from
/// other impurity elements and the main list are left untouched.
#[instrument(skip_all, name = "strans_other", fields(element = %set.element))]
pub fn run_other(
    set: &ElementLevels,
    lines: &mut [Line],
    config: &StransConfig,
    reporter: &ProgressReporter,
) -> Result<PassSummary, EngineError> {
    let level_set = build_level_set(&set.element, &set.levels)?;
    Ok(execute_pass(
        &level_set,
        lines,
        &set.element,
        AssignmentTarget::Other,
        Clearing::ElementOnly,
        &config.tolerances,
        reporter,
    ))
}

/// Re-matches every impurity element: empties the other-elements list once, then
/// runs one pass per element in the given order.
///
/// Every level set is validated before the list is emptied.
#[instrument(skip_all, name = "strans_others", fields(elements = sets.len()))]
pub fn run_others(
    sets: &[ElementLevels],
    lines: &mut [Line],
    config: &StransConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<PassSummary>, EngineError> {
    let level_sets = build_all(sets)?;
    Ok(execute_other_passes(&level_sets, lines, &config.tolerances, reporter))
}

/// Runs the main element pass followed by every impurity pass.
///
/// All level sets are validated up front; if any is invalid the call fails
/// before a single line is modified.
#[instrument(skip_all, name = "strans_full", fields(element = %config.main_element, others = others.len()))]
pub fn run_full(
    main_levels: &[Level],
    others: &[ElementLevels],
    lines: &mut [Line],
    config: &StransConfig,
    reporter: &ProgressReporter,
) -> Result<StransReport, EngineError> {
    let main_set = build_level_set(&config.main_element, main_levels)?;
    let other_sets = build_all(others)?;

    let main = execute_pass(
        &main_set,
        lines,
        &config.main_element,
        AssignmentTarget::Main,
        Clearing::WholeList,
        &config.tolerances,
        reporter,
    );
    let others = execute_other_passes(&other_sets, lines, &config.tolerances, reporter);

    let report = StransReport { main, others };
    info!(
        total_assignments = report.total_assignments(),
        "Full line matching run complete."
    );
    Ok(report)
}

fn build_level_set<'a>(element: &str, levels: &'a [Level]) -> Result<LevelSet<'a>, EngineError> {
    if element.trim().is_empty() {
        return Err(ConfigError::EmptyElementName.into());
    }
    LevelSet::new(levels).map_err(|source| EngineError::InvalidLevels {
        element: element.to_string(),
        source,
    })
}

fn build_all(sets: &[ElementLevels]) -> Result<Vec<(&str, LevelSet<'_>)>, EngineError> {
    sets.iter()
        .map(|set| Ok((set.element.as_str(), build_level_set(&set.element, &set.levels)?)))
        .collect()
}

fn execute_other_passes(
    level_sets: &[(&str, LevelSet)],
    lines: &mut [Line],
    tolerances: &ToleranceTable,
    reporter: &ProgressReporter,
) -> Vec<PassSummary> {
    clear_target(lines, AssignmentTarget::Other);

    let mut summaries = Vec::with_capacity(level_sets.len());
    for (element, level_set) in level_sets {
        summaries.push(execute_pass(
            level_set,
            lines,
            element,
            AssignmentTarget::Other,
            Clearing::Keep,
            tolerances,
            reporter,
        ));
    }
    summaries
}

fn execute_pass(
    level_set: &LevelSet,
    lines: &mut [Line],
    element: &str,
    target: AssignmentTarget,
    clearing: Clearing,
    tolerances: &ToleranceTable,
    reporter: &ProgressReporter,
) -> PassSummary {
    reporter.report(Progress::PhaseStart {
        name: format!("Matching {element}"),
    });

    match clearing {
        Clearing::WholeList => clear_target(lines, target),
        Clearing::ElementOnly => {
            for line in lines.iter_mut() {
                line.assignments_mut(target).retain(|a| a.element != element);
            }
        }
        Clearing::Keep => {}
    }

    let stats = match_levels(level_set, lines, element, target, tolerances, reporter);
    let matched_lines = lines
        .iter()
        .filter(|l| l.assignments(target).iter().any(|a| a.element == element))
        .count();

    if stats.candidates == 0 {
        warn!(
            element,
            levels = level_set.len(),
            "No candidate transitions could be formed from the supplied levels."
        );
    }
    info!(
        element,
        candidates = stats.candidates,
        matched = stats.matched_candidates,
        ambiguous = stats.ambiguous_candidates,
        assignments = stats.assignments,
        matched_lines,
        "Matching pass complete."
    );
    reporter.report(Progress::Message(format!(
        "{element}: {} of {} transitions matched, {} ambiguous, {} lines assigned",
        stats.matched_candidates, stats.candidates, stats.ambiguous_candidates, matched_lines
    )));
    reporter.report(Progress::PhaseFinish);

    PassSummary {
        element: element.to_string(),
        target,
        stats,
        matched_lines,
    }
}

fn clear_target(lines: &mut [Line], target: AssignmentTarget) {
    for line in lines.iter_mut() {
        line.assignments_mut(target).clear();
    }
}
