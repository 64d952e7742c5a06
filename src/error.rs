use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Git operation failed. Original error: {0}")]
    Git2Error(#[from] git2::Error),

    #[error("Failed to render. Original error: {0}")]
    MiniJinjaError(#[from] minijinja::Error),

    #[error("Failed to parse options JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Invalid pattern. Original error: {0}")]
    RegexError(#[from] regex::Error),

    /// When an external command has executed but finished with an error.
    #[error("Command `{command}` failed with status: {status}")]
    CommandFailed { command: String, status: ExitStatus },

    #[error("Cannot proceed: application directory '{app_dir}' does not exist.")]
    AppDirDoesNotExistError { app_dir: String },

    #[error("Cannot determine an application name for '{app_dir}'. Pass --app-name.")]
    AppNameError { app_dir: String },
}

/// Convenience type alias for Results with dockerdev's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
