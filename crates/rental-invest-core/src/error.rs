use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentalInvestError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RentalInvestError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        RentalInvestError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RentalInvestError {
    fn from(e: serde_json::Error) -> Self {
        RentalInvestError::SerializationError(e.to_string())
    }
}
