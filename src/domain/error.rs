// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Invalid link: {0}")]
    InvalidLink(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Link not found: {0}")]
    LinkNotFound(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Failed to serialize: {0}")]
    SerializationError(String),

    #[error("Failed to deserialize: {0}")]
    DeserializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    /// Prefix the error message with additional context, keeping the variant where possible.
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        let context = context.into();
        match self {
            DomainError::InvalidTag(msg) => DomainError::InvalidTag(format!("{}: {}", context, msg)),
            DomainError::InvalidLink(msg) => {
                DomainError::InvalidLink(format!("{}: {}", context, msg))
            }
            DomainError::LinkNotFound(msg) => {
                DomainError::LinkNotFound(format!("{}: {}", context, msg))
            }
            DomainError::Authentication(msg) => {
                DomainError::Authentication(format!("{}: {}", context, msg))
            }
            DomainError::RepositoryError(msg) => {
                DomainError::RepositoryError(format!("{}: {}", context, msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context, msg)),
            err => DomainError::Other(format!("{}: {}", context, err)),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
