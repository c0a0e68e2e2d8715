use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tame_core::core::io::lopt::LoptSettings;
use tame_core::engine::config::{StransConfig, StransConfigBuilder};
use tame_core::engine::tolerance::ToleranceTable;
use tracing::debug;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialProjectSection {
    main_element: String,
    levels: PathBuf,
    lines: PathBuf,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialStransSection {
    tolerances: Option<ToleranceTable>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct PartialOtherElement {
    name: String,
    levels: PathBuf,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialLoptSection {
    default_uncertainty: f64,
    #[serde(default)]
    fixed_levels: Vec<String>,
    par_template: Option<PathBuf>,
}

/// The project file as written on disk, before path resolution.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialProjectConfig {
    project: PartialProjectSection,
    #[serde(default)]
    strans: PartialStransSection,
    #[serde(default)]
    other_elements: Vec<PartialOtherElement>,
    lopt: Option<PartialLoptSection>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OtherElement {
    pub name: String,
    pub levels: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoptOptions {
    pub default_uncertainty: f64,
    pub fixed_levels: Vec<String>,
    pub par_template: Option<PathBuf>,
}

/// A fully resolved project: every path is relative to the working directory or
/// absolute, and tolerance overrides are merged onto the defaults.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub main_element: String,
    pub levels: PathBuf,
    pub lines: PathBuf,
    pub tolerances: ToleranceTable,
    pub other_elements: Vec<OtherElement>,
    pub lopt: Option<LoptOptions>,
}

impl ProjectConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading project configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let partial: PartialProjectConfig =
            toml::from_str(&content).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::resolve(partial, base_dir)
    }

    fn resolve(partial: PartialProjectConfig, base_dir: &Path) -> Result<Self> {
        if partial.project.main_element.trim().is_empty() {
            return Err(CliError::Config(
                "'project.main-element' must not be empty".to_string(),
            ));
        }

        let tolerances = match partial.strans.tolerances {
            Some(overrides) => ToleranceTable::default().merged_with(&overrides),
            None => ToleranceTable::default(),
        };

        let lopt = partial
            .lopt
            .map(|section| -> Result<LoptOptions> {
                if !section.default_uncertainty.is_finite() || section.default_uncertainty < 0.0 {
                    return Err(CliError::Config(format!(
                        "'lopt.default-uncertainty' must be a non-negative number, got {}",
                        section.default_uncertainty
                    )));
                }
                Ok(LoptOptions {
                    default_uncertainty: section.default_uncertainty,
                    fixed_levels: section.fixed_levels,
                    par_template: section.par_template.map(|p| resolve_path(base_dir, p)),
                })
            })
            .transpose()?;

        Ok(Self {
            main_element: partial.project.main_element,
            levels: resolve_path(base_dir, partial.project.levels),
            lines: resolve_path(base_dir, partial.project.lines),
            tolerances,
            other_elements: partial
                .other_elements
                .into_iter()
                .map(|o| OtherElement {
                    name: o.name,
                    levels: resolve_path(base_dir, o.levels),
                })
                .collect(),
            lopt,
        })
    }

    pub fn strans_config(&self) -> Result<StransConfig> {
        StransConfigBuilder::new()
            .main_element(self.main_element.clone())
            .tolerances(self.tolerances.clone())
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// LOPT options of the project; the `lopt` command cannot run without them.
    pub fn lopt_options(&self) -> Result<&LoptOptions> {
        self.lopt
            .as_ref()
            .ok_or_else(|| CliError::Config("the project file has no [lopt] section".to_string()))
    }

    pub fn lopt_settings(&self) -> Result<LoptSettings> {
        Ok(LoptSettings {
            main_element: self.main_element.clone(),
            default_uncertainty: self.lopt_options()?.default_uncertainty,
        })
    }
}

fn resolve_path(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
