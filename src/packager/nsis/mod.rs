//! NSIS compiler passes.
//!
//! The installer is produced in two `makensis` passes over the same script:
//!
//! - the **uninstaller** pass defines `INNER`, producing `tempinstaller.exe`, which the
//!   operator runs elevated so it writes out the uninstaller;
//! - the **installer** pass compiles the final installer, embedding that uninstaller.
//!
//! # Module Organization
//!
//! - `build` - makensis execution
//! - `toolset` - makensis discovery and version probing

mod build;
mod toolset;

pub use build::Makensis;
pub use toolset::{locate_makensis, probe_version};

use super::Result;
use std::{
    fmt,
    path::{Path, PathBuf},
    process::ExitStatus,
};

/// Preprocessor symbol that switches the script into its uninstaller variant.
pub const INNER_DEFINE: &str = "INNER";

/// Verbosity level passed to makensis (errors only).
pub const QUIET_VERBOSITY: u8 = 0;

/// Switch prefix understood by makensis on the host platform.
const SWITCH_PREFIX: char = if cfg!(windows) { '/' } else { '-' };

/// One of the two compiler passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    /// Pass with `INNER` defined, producing the temporary installer.
    Uninstaller,
    /// Final pass producing the distributable installer.
    Installer,
}

impl Pass {
    /// Compiler switches for this pass, without the script path.
    pub fn flags(self) -> Vec<String> {
        let verbosity = format!("{SWITCH_PREFIX}V{QUIET_VERBOSITY}");
        match self {
            Pass::Uninstaller => vec![format!("{SWITCH_PREFIX}D{INNER_DEFINE}"), verbosity],
            Pass::Installer => vec![verbosity],
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pass::Uninstaller => "uninstaller",
            Pass::Installer => "installer",
        })
    }
}

/// A single compiler run: the script and the switches preceding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilerInvocation {
    /// Pass this invocation belongs to.
    pub pass: Pass,
    /// Script handed to the compiler as the last argument.
    pub script_path: PathBuf,
    /// Switches in command-line order.
    pub flags: Vec<String>,
}

impl CompilerInvocation {
    /// Builds the invocation for `pass` over `script_path`.
    pub fn for_pass(pass: Pass, script_path: &Path) -> Self {
        Self {
            pass,
            script_path: script_path.to_path_buf(),
            flags: pass.flags(),
        }
    }

    /// Full argument vector: flags followed by the script path.
    pub fn args(&self) -> Vec<std::ffi::OsString> {
        self.flags
            .iter()
            .map(Into::into)
            .chain(std::iter::once(self.script_path.clone().into_os_string()))
            .collect()
    }
}

/// Completion status of a compiler run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompilerResult {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CompilerResult {
    /// Whether the compiler reported success.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for CompilerResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Runs the installer compiler.
#[allow(async_fn_in_trait)]
pub trait Compiler {
    /// Human-readable name of the compiler, used in errors.
    fn name(&self) -> String;

    /// Runs one invocation to completion.
    ///
    /// Returns `Err` only when the compiler could not be started; a failed
    /// compilation is reported through [`CompilerResult`].
    async fn invoke(&self, invocation: &CompilerInvocation) -> Result<CompilerResult>;
}
