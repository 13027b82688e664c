use crate::commands::calc::ExprError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid expression: {0}")]
    Expression(#[from] ExprError),

    /// Every generated short code collided with an existing one.
    #[error("Unable to generate a unique code after {attempts} attempts. Try again later.")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("Store error: {0}")]
    Store(String),
}

impl DrillError {
    /// Whether retrying the whole operation later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, DrillError::CodeSpaceExhausted { .. })
    }

    /// Whether the error was caused by caller input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(self, DrillError::Validation(_) | DrillError::Expression(_))
    }
}

pub type Result<T> = std::result::Result<T, DrillError>;
