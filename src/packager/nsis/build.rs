//! makensis execution.
//!
//! Compiles the installer script with the resolved makensis binary.

use super::{Compiler, CompilerInvocation, CompilerResult};
use crate::packager::error::{Error, Result};
use std::path::{Path, PathBuf};

/// The NSIS compiler at a resolved location.
#[derive(Clone, Debug)]
pub struct Makensis {
    path: PathBuf,
}

impl Makensis {
    /// Wraps an already-resolved makensis executable.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Locates makensis (or `requested`) and wraps it.
    pub fn locate(requested: Option<&Path>) -> Result<Self> {
        super::locate_makensis(requested).map(Self::new)
    }

    /// Path of the executable that will be run.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Compiler for Makensis {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    /// Run makensis and wait for it.
    ///
    /// Output is inherited so the operator sees compiler diagnostics directly.
    async fn invoke(&self, invocation: &CompilerInvocation) -> Result<CompilerResult> {
        let args = invocation.args();
        log::debug!("{} {:?}", self.path.display(), args);

        let status = tokio::process::Command::new(&self.path)
            .args(&args)
            .status()
            .await
            .map_err(|e| Error::ToolMissing {
                tool: self.name(),
                reason: e.to_string(),
            })?;

        let result = CompilerResult::from(status);
        log::debug!("{} pass finished with {:?}", invocation.pass, result.code);
        Ok(result)
    }
}
