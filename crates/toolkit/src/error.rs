use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolkitError>;

#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("Failed to read or write snapshot: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Scoring error: {0}")]
    ScoringError(#[from] scoring::ScoringError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),
}
