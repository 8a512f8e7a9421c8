//! CLI-level errors (wraps domain and config errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::GraphError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Graph(#[from] GraphError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Graph(e) => match e {
                GraphError::NotFound(_) | GraphError::PreconditionViolation(_) => {
                    crate::exitcode::DATAERR
                }
                GraphError::Structural(_) | GraphError::Corrupted { .. } => {
                    crate::exitcode::SOFTWARE
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exitcode;

    #[test]
    fn given_errors_when_mapping_then_sysexits_codes() {
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), exitcode::USAGE);
        assert_eq!(
            CliError::from(GraphError::NotFound("\"x\"".into())).exit_code(),
            exitcode::DATAERR
        );
        assert_eq!(
            CliError::from(GraphError::structural("full")).exit_code(),
            exitcode::SOFTWARE
        );
        assert_eq!(
            CliError::from(SettingsError {
                message: "bad".into()
            })
            .exit_code(),
            exitcode::CONFIG
        );
    }
}
