use std::path::PathBuf;
use tame_core::core::io::lopt::LoptError;
use tame_core::core::io::tables::TableError;
use tame_core::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    TameCore(#[from] EngineError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("LOPT export failed: {0}")]
    Lopt(#[from] LoptError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
