//! makensis discovery.
//!
//! Resolves the compiler on `PATH` (or an explicit override) and probes its version.

use crate::packager::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Default compiler name looked up on `PATH`.
pub const MAKENSIS: &str = "makensis";

/// Resolve the makensis executable.
///
/// `requested` may be a bare name (looked up on `PATH`) or a path.
pub fn locate_makensis(requested: Option<&Path>) -> Result<PathBuf> {
    let requested = requested.unwrap_or(Path::new(MAKENSIS));

    match which::which(requested) {
        Ok(path) => {
            log::debug!("Found makensis at: {}", path.display());
            Ok(path)
        }
        Err(e) => Err(Error::ToolMissing {
            tool: requested.display().to_string(),
            reason: format!(
                "{e}. Please install NSIS (e.g., apt-get install nsis) or pass --makensis"
            ),
        }),
    }
}

/// Ask makensis for its version.
///
/// Returns `None` when the probe fails; a broken probe does not stop the build,
/// the real invocation reports the failure.
pub async fn probe_version(path: &Path) -> Option<String> {
    match tokio::process::Command::new(path)
        .arg("-VERSION")
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            log::info!("makensis available: {}", version);
            Some(version)
        }
        Ok(output) => {
            log::warn!(
                "makensis found at {} but -VERSION check failed (exit code: {:?}). Stderr: {}",
                path.display(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
            None
        }
        Err(e) => {
            log::warn!(
                "makensis found at {} but failed to execute: {}. Check file permissions.",
                path.display(),
                e
            );
            None
        }
    }
}
