use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContabilError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Could not identify {0}")]
    AmbiguousSchema(String),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Corrupt entry {id}: {reason}")]
    CorruptEntry { id: String, reason: String },

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, ContabilError>;
