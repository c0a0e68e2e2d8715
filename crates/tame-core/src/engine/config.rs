use super::tolerance::ToleranceTable;
use crate::core::models::line::QualityCategory;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Element name must not be empty")]
    EmptyElementName,

    #[error(
        "Invalid tolerance for quality category '{category}': {value} (must be finite and non-negative)"
    )]
    InvalidTolerance {
        category: QualityCategory,
        value: f64,
    },
}

/// Settings shared by every matching pass of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct StransConfig {
    /// Name of the element under study; its assignments go to the main list.
    pub main_element: String,
    pub tolerances: ToleranceTable,
}

#[derive(Default)]
pub struct StransConfigBuilder {
    main_element: Option<String>,
    tolerances: Option<ToleranceTable>,
}

impl StransConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn main_element(mut self, name: impl Into<String>) -> Self {
        self.main_element = Some(name.into());
        self
    }
    pub fn tolerances(mut self, table: ToleranceTable) -> Self {
        self.tolerances = Some(table);
        self
    }

    /// Builds the configuration. The tolerance table falls back to
    /// [`ToleranceTable::default`] when not given.
    pub fn build(self) -> Result<StransConfig, ConfigError> {
        let main_element = self
            .main_element
            .ok_or(ConfigError::MissingParameter("main_element"))?;
        if main_element.trim().is_empty() {
            return Err(ConfigError::EmptyElementName);
        }
        Ok(StransConfig {
            main_element,
            tolerances: self.tolerances.unwrap_or_default(),
        })
    }
}
