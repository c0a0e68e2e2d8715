use super::config::ConfigError;
use super::level_set::LevelSetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid levels for element '{element}': {source}")]
    InvalidLevels {
        element: String,
        #[source]
        source: LevelSetError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
