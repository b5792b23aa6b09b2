//! Error handling for gootstrap.
//! Defines the error taxonomy of a scaffolding run and the exit conditions
//! reported to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can abort a scaffolding run.
///
/// Every variant identifies the path the failing phase was working on.
#[derive(Error, Debug)]
pub enum Error {
    /// The output root exists and is not a directory.
    #[error("Output path '{}' already exists and it is not a directory.", path.display())]
    DestinationConflict { path: PathBuf },

    /// The output root is a directory with entries in it.
    #[error("Output directory '{}' already exists and it is not empty.", path.display())]
    DestinationNotEmpty { path: PathBuf },

    /// The template tree could not be walked or one of its entries read.
    #[error("Template tree unreadable at '{}': {source}.", path.display())]
    TemplateTreeUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template references a placeholder absent from the render context.
    #[error("Unknown placeholder '{name}' in template '{template}'.")]
    UnknownPlaceholder { name: String, template: String },

    /// Creating a directory or writing a file under the output root failed.
    #[error("Failed to write '{}': {source}.", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A path handed to the path mapper does not lie under the template root.
    #[error("Internal error: '{}' is not under template root '{}'.", path.display(), root.display())]
    PathOutsideRoot { path: PathBuf, root: PathBuf },

    /// Caller-side configuration problems (template root lookup, values file, project name).
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

/// How a run ended, as signaled to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCondition {
    Success,
    DestinationConflict,
    DestinationNotEmpty,
    TemplateTreeUnreadable,
    UnknownPlaceholder,
    WriteFailure,
    InvalidConfiguration,
    InternalError,
}

impl ExitCondition {
    /// Process exit code used by the command-line front end.
    pub fn code(self) -> i32 {
        match self {
            ExitCondition::Success => 0,
            ExitCondition::InternalError => 1,
            ExitCondition::InvalidConfiguration => 2,
            ExitCondition::DestinationConflict => 3,
            ExitCondition::DestinationNotEmpty => 4,
            ExitCondition::TemplateTreeUnreadable => 5,
            ExitCondition::UnknownPlaceholder => 6,
            ExitCondition::WriteFailure => 7,
        }
    }
}

impl Error {
    pub fn exit_condition(&self) -> ExitCondition {
        match self {
            Error::DestinationConflict { .. } => ExitCondition::DestinationConflict,
            Error::DestinationNotEmpty { .. } => ExitCondition::DestinationNotEmpty,
            Error::TemplateTreeUnreadable { .. } => ExitCondition::TemplateTreeUnreadable,
            Error::UnknownPlaceholder { .. } => ExitCondition::UnknownPlaceholder,
            Error::WriteFailure { .. } => ExitCondition::WriteFailure,
            Error::ConfigError(_) => ExitCondition::InvalidConfiguration,
            Error::PathOutsideRoot { .. } | Error::IoError(_) => ExitCondition::InternalError,
        }
    }
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with the code of its exit condition
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(err.exit_condition().code());
}
