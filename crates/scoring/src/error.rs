use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid fields: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error("Invalid weight set: weights sum to {total}%, expected 100%")]
    InvalidWeightSet { total: u32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ScoringError>;

impl ScoringError {
    /// Errors a user can fix by changing their input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ScoringError::Validation(_)
                | ScoringError::InvalidFields(_)
                | ScoringError::InvalidWeightSet { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ScoringError::NotFound(_))
    }
}
