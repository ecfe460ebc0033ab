//! Two-pass NSIS installer packaging.
//!
//! This library drives makensis through an uninstaller pass and an installer pass,
//! with a manual operator checkpoint in between and an optional signing gate.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, Result, WindeployError};
