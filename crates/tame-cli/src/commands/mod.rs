pub mod lopt;
pub mod strans;

use crate::config::ProjectConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use std::path::Path;
use tame_core::core::io::tables;
use tame_core::core::models::level::Level;
use tame_core::core::models::line::Line;
use tame_core::engine::progress::ProgressReporter;
use tame_core::workflows::strans::{self as workflow, ElementLevels, PassSummary, StransReport};
use tracing::info;

/// Project configuration together with every table it references.
pub struct LoadedProject {
    pub config: ProjectConfig,
    pub main_levels: Vec<Level>,
    pub other_levels: Vec<ElementLevels>,
    pub lines: Vec<Line>,
}

impl LoadedProject {
    pub fn load(config_path: &Path, include_others: bool) -> Result<Self> {
        let config = ProjectConfig::from_file(config_path)?;

        info!("Loading levels of {} from {:?}", config.main_element, &config.levels);
        let main_levels = tables::read_levels_from_path(&config.levels)?;

        let mut other_levels = Vec::new();
        if include_others {
            for other in &config.other_elements {
                info!("Loading levels of {} from {:?}", other.name, &other.levels);
                let levels = tables::read_levels_from_path(&other.levels)?;
                other_levels.push(ElementLevels::new(other.name.clone(), levels));
            }
        }

        info!("Loading observed lines from {:?}", &config.lines);
        let lines = tables::read_lines_from_path(&config.lines)?;
        info!("Loaded {} lines.", lines.len());

        Ok(Self {
            config,
            main_levels,
            other_levels,
            lines,
        })
    }

    /// Runs the main pass and every loaded impurity pass over the project's lines.
    pub fn run_matching(&mut self) -> Result<StransReport> {
        let strans_config = self.config.strans_config()?;
        let progress_handler = CliProgressHandler::new();
        let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

        let report = workflow::run_full(
            &self.main_levels,
            &self.other_levels,
            &mut self.lines,
            &strans_config,
            &reporter,
        )?;
        print_report(&report);
        Ok(report)
    }
}

fn print_report(report: &StransReport) {
    print_summary(&report.main);
    for summary in &report.others {
        print_summary(summary);
    }
}

fn print_summary(summary: &PassSummary) {
    println!(
        "  {:<12} {:>6} candidates, {:>6} matched lines, {:>5} ambiguous",
        summary.element,
        summary.stats.candidates,
        summary.matched_lines,
        summary.stats.ambiguous_candidates
    );
}
