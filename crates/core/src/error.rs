use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A spend would take the spoon balance below zero.
    #[error("Insufficient spoons: balance {balance}, required {required}")]
    InsufficientSpoons { balance: i64, required: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// How many spoons the caller is missing, for `InsufficientSpoons`.
    pub fn shortfall(&self) -> Option<i64> {
        match self {
            CoreError::InsufficientSpoons { balance, required } => Some(required - balance),
            _ => None,
        }
    }
}
