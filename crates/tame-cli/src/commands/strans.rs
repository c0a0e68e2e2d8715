use super::LoadedProject;
use crate::cli::MatchArgs;
use crate::error::Result;
use tame_core::core::io::linelist::{self, ExportMode};
use tracing::{info, warn};

pub fn run(args: MatchArgs) -> Result<()> {
    let mut project = LoadedProject::load(&args.config, !args.main_only)?;

    println!(
        "Matching {} lines for {}...",
        project.lines.len(),
        project.config.main_element
    );
    let report = project.run_matching()?;

    if report.main.matched_lines == 0 {
        warn!("No line was identified for the main element.");
        println!("Warning: no line was identified for {}.", report.main.element);
    }

    let mode = if args.complete {
        ExportMode::Complete
    } else {
        ExportMode::Matched
    };
    info!("Writing linelist ({:?}) to {:?}", mode, &args.output);
    let written = linelist::write_linelist_to_path(&project.lines, mode, &args.output)?;
    println!(
        "✓ {} lines written to: {}",
        written,
        args.output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_project(dir: &Path) -> std::path::PathBuf {
        fs::write(
            dir.join("main.lev"),
            "label,j,energy,parity\na,1,0.0,1\nb,1,100.0,0\nc,3,250.0,0\n",
        )
        .unwrap();
        fs::write(
            dir.join("other.lev"),
            "label,j,energy,parity\nx,0,0.0,1\ny,1,150.01,0\n",
        )
        .unwrap();
        fs::write(
            dir.join("lines.csv"),
            "wavenumber,snr,fwhm,eq width,tags,unc\n\
             100.01,50,120,300,L,0.003\n\
             150.0,20,140,100,L,0.004\n\
             400.0,10,100,50,P,0.010\n",
        )
        .unwrap();
        let project = dir.join("project.toml");
        fs::write(
            &project,
            "[project]\nmain-element = \"Fe II\"\nlevels = \"main.lev\"\nlines = \"lines.csv\"\n\n\
             [[other-elements]]\nname = \"Fe I\"\nlevels = \"other.lev\"\n",
        )
        .unwrap();
        project
    }

    #[test]
    fn match_command_exports_identified_lines() {
        let dir = tempdir().unwrap();
        let config = write_project(dir.path());
        let output = dir.path().join("matched.csv");

        run(MatchArgs {
            config,
            output: output.clone(),
            complete: false,
            main_only: false,
        })
        .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let rows: Vec<_> = content.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[1].starts_with("100.0100,"));
        assert!(rows[1].contains("Fe II: b - a"));
    }

    #[test]
    fn complete_export_includes_impurity_only_lines() {
        let dir = tempdir().unwrap();
        let config = write_project(dir.path());
        let output = dir.path().join("all.csv");

        run(MatchArgs {
            config,
            output: output.clone(),
            complete: true,
            main_only: false,
        })
        .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        let rows: Vec<_> = content.lines().collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[2].ends_with(",,Fe I: y - x"));
    }

    #[test]
    fn main_only_skips_impurity_passes() {
        let dir = tempdir().unwrap();
        let config = write_project(dir.path());
        let output = dir.path().join("main_only.csv");

        run(MatchArgs {
            config,
            output: output.clone(),
            complete: true,
            main_only: true,
        })
        .unwrap();

        let content = fs::read_to_string(&output).unwrap();
        assert!(!content.contains("Fe I:"));
    }
}
