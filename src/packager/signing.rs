//! Code signing gate and signer collaborators.
//!
//! The gate only decides whether signing applies. The signing itself is done by a
//! [`Signer`], which the orchestrator calls once per produced artifact.

use std::path::Path;

use super::{Result, nsis::Pass, progress::Progress};

/// Decides whether produced artifacts should be code signed.
///
/// Both inputs are trimmed first. Signing applies only when the certificate path
/// names an existing filesystem entry and the password is non-empty.
pub fn should_sign(certificate_path: &str, password: &str) -> bool {
    let certificate_path = certificate_path.trim();
    let password = password.trim();

    !certificate_path.is_empty() && Path::new(certificate_path).exists() && !password.is_empty()
}

/// Signs one artifact produced by a compiler pass.
#[allow(async_fn_in_trait)]
pub trait Signer {
    /// Sign `artifact`, produced by `pass`.
    async fn sign(&self, pass: Pass, artifact: &Path) -> Result<()>;
}

/// Signer that announces the signing step without performing it.
///
/// Stands in until an Authenticode tool is wired up.
pub struct AnnouncingSigner<'a> {
    progress: &'a dyn Progress,
}

impl<'a> AnnouncingSigner<'a> {
    /// Announce each signing step through `progress`.
    pub fn new(progress: &'a dyn Progress) -> Self {
        Self { progress }
    }
}

impl Signer for AnnouncingSigner<'_> {
    async fn sign(&self, pass: Pass, artifact: &Path) -> Result<()> {
        log::debug!("code sign {}: {}", pass, artifact.display());
        self.progress.step(&format!("code sign {pass}"));
        Ok(())
    }
}
