//! Progress reporting for a packaging run.
//!
//! The orchestrator and signers report steps through [`Progress`]; the front end
//! decides how they are shown.

/// Receives one line per step of the run.
pub trait Progress {
    /// A step started or completed, e.g. `processing uninstaller`.
    fn step(&self, message: &str);
}

/// Reports steps to the `log` facade only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn step(&self, message: &str) {
        log::info!("{message}");
    }
}
