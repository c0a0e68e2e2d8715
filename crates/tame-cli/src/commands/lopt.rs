use super::LoadedProject;
use crate::cli::LoptArgs;
use crate::error::{CliError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tame_core::core::io::lopt::{self, LoptFileNames};
use tracing::info;

pub fn run(args: LoptArgs) -> Result<()> {
    let mut project = LoadedProject::load(&args.config, true)?;
    let settings = project.config.lopt_settings()?;

    println!(
        "Matching {} lines for {}...",
        project.lines.len(),
        project.config.main_element
    );
    project.run_matching()?;

    fs::create_dir_all(&args.out_dir)?;
    let names = LoptFileNames::for_element(&project.config.main_element);

    let inp_path = args.out_dir.join(&names.inp);
    info!("Writing LOPT line input to {:?}", &inp_path);
    let records = write_with(&inp_path, |w| {
        Ok(lopt::write_inp(&project.lines, &settings, w)?)
    })?;
    println!("✓ {} LOPT records written to: {}", records, inp_path.display());

    let options = project.config.lopt_options()?;
    let fixed_path = args.out_dir.join(&names.fixed);
    info!("Writing {} fixed levels to {:?}", options.fixed_levels.len(), &fixed_path);
    write_with(&fixed_path, |w| {
        Ok(lopt::write_fixed(&project.main_levels, &options.fixed_levels, w)?)
    })?;
    println!("✓ Fixed levels written to: {}", fixed_path.display());

    if let Some(template_path) = &options.par_template {
        let template = fs::read_to_string(template_path).map_err(|e| CliError::FileParsing {
            path: template_path.clone(),
            source: e.into(),
        })?;
        let par_path = args.out_dir.join(&names.par);
        info!("Writing LOPT parameter file to {:?}", &par_path);
        write_with(&par_path, |w| {
            Ok(lopt::write_par(&template, &project.config.main_element, w)?)
        })?;
        println!("✓ Parameter file written to: {}", par_path.display());
    }

    Ok(())
}

fn write_with<T>(
    path: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<T>,
) -> Result<T> {
    let mut writer = BufWriter::new(File::create(path)?);
    let value = write(&mut writer)?;
    writer.flush()?;
    Ok(value)
}
