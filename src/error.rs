//! Top-level error types and exit status mapping.

use thiserror::Error;

use crate::packager;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, WindeployError>;

/// Exit status of a successful run.
pub const EXIT_OK: i32 = 0;
/// Generic failure: bad arguments, IO errors, anything unclassified.
pub const EXIT_FAILURE: i32 = 1;
/// makensis could not be found or started.
pub const EXIT_TOOL_MISSING: i32 = 2;
/// A compiler pass finished with a failure status.
pub const EXIT_COMPILE_FAILURE: i32 = 3;
/// The signer rejected an artifact.
pub const EXIT_SIGNING_FAILED: i32 = 4;

/// Main error type for the windeploy binary
#[derive(Error, Debug)]
pub enum WindeployError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Packaging errors
    #[error("{0}")]
    Packager(#[from] packager::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl WindeployError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WindeployError::Packager(packager::Error::ToolMissing { .. }) => EXIT_TOOL_MISSING,
            WindeployError::Packager(packager::Error::CompileFailure { .. }) => {
                EXIT_COMPILE_FAILURE
            }
            WindeployError::Packager(packager::Error::SigningFailed { .. }) => {
                EXIT_SIGNING_FAILED
            }
            _ => EXIT_FAILURE,
        }
    }
}
