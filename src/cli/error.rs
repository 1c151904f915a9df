// src/cli/error.rs
use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;
use crate::exitcode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not signed in. Run `linklocker signin <EMAIL>` first")]
    NotSignedIn,

    #[error("Operation aborted by user")]
    OperationAborted,

    /// Failure that was already shown to the user as a notification
    #[error("{0}")]
    Reported(ApplicationError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Application(err) => CliError::Application(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    /// Whether the user has already seen this failure
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::Reported(_))
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidInput(_) => exitcode::USAGE,
            CliError::NotSignedIn => exitcode::NOPERM,
            CliError::OperationAborted => exitcode::CANCEL,
            CliError::Reported(err) | CliError::Application(err) => match err {
                ApplicationError::Validation(_) | ApplicationError::LinkNotFound(_) => {
                    exitcode::DATAERR
                }
                ApplicationError::Authentication(_) => exitcode::NOPERM,
                _ => exitcode::SOFTWARE,
            },
            CliError::CommandFailed(_) | CliError::Io(_) | CliError::Other(_) => {
                exitcode::SOFTWARE
            }
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Application(ApplicationError::from_domain(err))
    }
}

pub type CliResult<T> = Result<T, CliError>;
