use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No provider mapping for {0}")]
    MappingMissing(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<String> for DomainError {
    fn from(s: String) -> Self {
        DomainError::Database(s)
    }
}

impl From<&str> for DomainError {
    fn from(s: &str) -> Self {
        DomainError::InvalidInput(s.to_string())
    }
}
