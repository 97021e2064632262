use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NutritionAdvisorError>;

#[derive(Error, Debug)]
pub enum NutritionAdvisorError {
    /// The completion endpoint could not be reached, timed out, or answered
    /// with a non-2xx status.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered, but the payload could not be turned into a
    /// reply (malformed JSON, empty choices, missing content).
    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NutritionAdvisorError {
    /// True for failures caused by connectivity rather than by the payload.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}
