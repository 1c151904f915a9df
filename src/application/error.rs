// src/application/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Persistence failed: {0}")]
    Persistence(String),

    #[error("Link not found: {0}")]
    LinkNotFound(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Persistence(msg) => {
                ApplicationError::Persistence(format!("{}: {}", context.into(), msg))
            }
            err => ApplicationError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    /// Sort a domain failure into the user-facing categories: bad input, auth or persistence
    pub fn from_domain(err: DomainError) -> Self {
        match err {
            DomainError::InvalidLink(msg)
            | DomainError::InvalidTag(msg)
            | DomainError::InvalidCredentials(msg) => ApplicationError::Validation(msg),
            DomainError::LinkNotFound(msg) => ApplicationError::LinkNotFound(msg),
            DomainError::Authentication(msg) => ApplicationError::Authentication(msg),
            other => ApplicationError::Persistence(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::Io(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
