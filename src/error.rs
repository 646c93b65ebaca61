//! Error handling for the CV importer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, CvImportError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CvImportError {
    fn from(err: anyhow::Error) -> Self {
        CvImportError::Processing(err.to_string())
    }
}
