//! Error types for packaging operations.
//!
//! Every failure of the two-pass build is represented here so the binary can
//! map it to a distinct exit status.

use std::path::PathBuf;
use thiserror::Error;

use super::nsis::Pass;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Packaging errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The installer compiler could not be located or started.
    #[error("{tool} could not be started: {reason}")]
    ToolMissing {
        /// Tool name or path as requested
        tool: String,
        /// What went wrong
        reason: String,
    },

    /// The installer compiler finished with a failure status.
    #[error("{pass} pass failed: {tool} exited with {}", describe_code(.code))]
    CompileFailure {
        /// Which pass failed
        pass: Pass,
        /// Compiler that was run
        tool: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// The signer rejected an artifact.
    #[error("failed to sign {}: {reason}", .artifact.display())]
    SigningFailed {
        /// Artifact that was being signed
        artifact: PathBuf,
        /// Reason reported by the signer
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catch-all error with a message
    #[error("{0}")]
    GenericError(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
