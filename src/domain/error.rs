use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Remote generation failed: {0}")]
    RemoteGeneration(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds: requested ${requested:.2}, available ${available:.2}")]
    InsufficientFunds { requested: f64, available: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl DomainError {
    /// True for errors caused by user input rather than the remote service or the session mode.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidAmount(_)
                | DomainError::InsufficientFunds { .. }
                | DomainError::InvalidInput(_)
        )
    }
}
