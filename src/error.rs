//! Error handling for the ATS scorer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parsing error: {0}")]
    Parsing(String),

    #[error("Scoring error: {0}")]
    Scoring(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AtsError>;

impl From<std::num::ParseIntError> for AtsError {
    fn from(err: std::num::ParseIntError) -> Self {
        AtsError::Parsing(err.to_string())
    }
}

impl From<regex::Error> for AtsError {
    fn from(err: regex::Error) -> Self {
        AtsError::Parsing(format!("invalid pattern: {}", err))
    }
}

impl From<aho_corasick::BuildError> for AtsError {
    fn from(err: aho_corasick::BuildError) -> Self {
        AtsError::Parsing(format!("failed to build vocabulary matcher: {}", err))
    }
}

impl From<toml::de::Error> for AtsError {
    fn from(err: toml::de::Error) -> Self {
        AtsError::Configuration(format!("invalid config file: {}", err))
    }
}

impl From<toml::ser::Error> for AtsError {
    fn from(err: toml::ser::Error) -> Self {
        AtsError::Configuration(format!("failed to serialize config: {}", err))
    }
}
