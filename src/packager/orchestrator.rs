//! Two-pass packaging orchestration.
//!
//! Drives the fixed sequence:
//!
//! ```text
//! Start -> CompilingUninstaller -> AwaitingManualStep -> CompilingInstaller -> Done
//! ```
//!
//! A failed compiler pass aborts the run; nothing is retried.

use std::path::{Path, PathBuf};

use super::{
    BuildConfiguration, DerivedPaths, Error, Result,
    checkpoint::Checkpoint,
    nsis::{Compiler, CompilerInvocation, Pass},
    progress::Progress,
    signing::{Signer, should_sign},
};

/// Where a run currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing has run yet.
    Start,
    /// Uninstaller pass is compiling.
    CompilingUninstaller,
    /// Waiting for the operator to run the temporary installer.
    AwaitingManualStep,
    /// Installer pass is compiling.
    CompilingInstaller,
    /// Both passes completed.
    Done,
}

/// Summary of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Whether signing applied to this run.
    pub signed: bool,
    /// Artifacts handed to the signer (empty when unsigned).
    pub signed_artifacts: Vec<PathBuf>,
    /// Installer artifact of the final pass.
    pub installer: PathBuf,
}

/// Sequences both compiler passes, the checkpoint and signing.
///
/// Collaborators are injected so the sequence can run against fakes.
pub struct Orchestrator<'a, C, K, S> {
    config: &'a BuildConfiguration,
    compiler: C,
    checkpoint: K,
    signer: S,
    progress: &'a dyn Progress,
    phase: Phase,
}

impl<'a, C, K, S> Orchestrator<'a, C, K, S>
where
    C: Compiler,
    K: Checkpoint,
    S: Signer,
{
    /// Creates an orchestrator in [`Phase::Start`].
    pub fn new(
        config: &'a BuildConfiguration,
        compiler: C,
        checkpoint: K,
        signer: S,
        progress: &'a dyn Progress,
    ) -> Self {
        Self {
            config,
            compiler,
            checkpoint,
            signer,
            progress,
            phase: Phase::Start,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs the whole sequence.
    ///
    /// Returns the first error encountered; later steps do not run.
    pub async fn run(&mut self) -> Result<RunReport> {
        let paths = self.config.derived_paths();
        let sign = should_sign(self.config.certificate_path(), self.config.password());
        log::debug!("installer script: {}", paths.installer_script.display());
        log::debug!("temp installer: {}", paths.temp_installer.display());
        if sign {
            log::info!("code signing enabled");
        } else {
            log::info!("code signing disabled: certificate or password not available");
        }

        let mut signed_artifacts = Vec::new();

        self.advance(Phase::CompilingUninstaller);
        self.compile(Pass::Uninstaller, &paths.installer_script).await?;
        if sign {
            self.sign(Pass::Uninstaller, &paths.temp_installer).await?;
            signed_artifacts.push(paths.temp_installer.clone());
        }

        self.advance(Phase::AwaitingManualStep);
        self.checkpoint
            .wait_for_confirmation(&confirmation_message(&paths))
            .await?;

        self.advance(Phase::CompilingInstaller);
        self.compile(Pass::Installer, &paths.installer_script).await?;
        let installer = self.config.installer_output();
        if sign {
            self.sign(Pass::Installer, &installer).await?;
            signed_artifacts.push(installer.clone());
        }

        self.advance(Phase::Done);
        Ok(RunReport {
            signed: sign,
            signed_artifacts,
            installer,
        })
    }

    fn advance(&mut self, next: Phase) {
        log::debug!("{:?} -> {:?}", self.phase, next);
        self.phase = next;
    }

    async fn compile(&self, pass: Pass, script: &Path) -> Result<()> {
        self.progress.step(&format!("processing {pass}"));

        let invocation = CompilerInvocation::for_pass(pass, script);
        let result = self.compiler.invoke(&invocation).await?;
        if !result.success() {
            return Err(Error::CompileFailure {
                pass,
                tool: self.compiler.name(),
                code: result.code,
            });
        }
        Ok(())
    }

    async fn sign(&self, pass: Pass, artifact: &Path) -> Result<()> {
        self.signer
            .sign(pass, artifact)
            .await
            .map_err(|e| match e {
                Error::SigningFailed { .. } => e,
                other => Error::SigningFailed {
                    artifact: artifact.to_path_buf(),
                    reason: other.to_string(),
                },
            })
    }
}

/// Prompt shown at the checkpoint.
fn confirmation_message(paths: &DerivedPaths) -> String {
    let name = paths
        .temp_installer
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| paths.temp_installer.display().to_string());
    format!("Run '{name}' as admin, then press enter...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::nsis::{CompilerResult, INNER_DEFINE};
    use std::{cell::RefCell, rc::Rc};
    use tempfile::NamedTempFile;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Compile(CompilerInvocation),
        Checkpoint(String),
        Sign(Pass, PathBuf),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct FakeCompiler {
        log: Log,
        codes: RefCell<Vec<Option<i32>>>,
    }

    impl FakeCompiler {
        fn new(log: &Log, codes: &[Option<i32>]) -> Self {
            Self {
                log: Rc::clone(log),
                codes: RefCell::new(codes.iter().rev().copied().collect()),
            }
        }
    }

    impl Compiler for FakeCompiler {
        fn name(&self) -> String {
            "fake-makensis".into()
        }

        async fn invoke(&self, invocation: &CompilerInvocation) -> Result<CompilerResult> {
            self.log.borrow_mut().push(Event::Compile(invocation.clone()));
            let code = self.codes.borrow_mut().pop().unwrap_or(Some(0));
            Ok(CompilerResult { code })
        }
    }

    struct MissingCompiler;

    impl Compiler for MissingCompiler {
        fn name(&self) -> String {
            "makensis".into()
        }

        async fn invoke(&self, _invocation: &CompilerInvocation) -> Result<CompilerResult> {
            Err(Error::ToolMissing {
                tool: self.name(),
                reason: "not found".into(),
            })
        }
    }

    struct FakeCheckpoint(Log);

    impl Checkpoint for FakeCheckpoint {
        async fn wait_for_confirmation(&self, message: &str) -> Result<()> {
            self.0.borrow_mut().push(Event::Checkpoint(message.to_string()));
            Ok(())
        }
    }

    struct FakeSigner {
        log: Log,
        fail: bool,
    }

    impl Signer for FakeSigner {
        async fn sign(&self, pass: Pass, artifact: &Path) -> Result<()> {
            self.log
                .borrow_mut()
                .push(Event::Sign(pass, artifact.to_path_buf()));
            if self.fail {
                return Err(Error::GenericError("token locked".into()));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct Steps(RefCell<Vec<String>>);

    impl Progress for Steps {
        fn step(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn wire<'a, C: Compiler>(
        config: &'a BuildConfiguration,
        steps: &'a Steps,
        compiler: C,
        log: &Log,
        signer_fails: bool,
    ) -> Orchestrator<'a, C, FakeCheckpoint, FakeSigner> {
        Orchestrator::new(
            config,
            compiler,
            FakeCheckpoint(Rc::clone(log)),
            FakeSigner {
                log: Rc::clone(log),
                fail: signer_fails,
            },
            steps,
        )
    }

    fn unsigned_config() -> BuildConfiguration {
        BuildConfiguration::builder()
            .build_directory("/tmp/build")
            .build()
    }

    fn signed_config(cert: &NamedTempFile) -> BuildConfiguration {
        BuildConfiguration::builder()
            .build_directory("/tmp/build")
            .certificate_path(cert.path().to_string_lossy())
            .password("secret")
            .build()
    }

    fn compiles(events: &[Event]) -> Vec<&CompilerInvocation> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::Compile(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn unsigned_run_compiles_twice_around_checkpoint() {
        let log = Log::default();
        let config = unsigned_config();
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, FakeCompiler::new(&log, &[]), &log, false);

        let report = orchestrator.run().await.unwrap();
        assert_eq!(orchestrator.phase(), Phase::Done);
        assert!(!report.signed);
        assert!(report.signed_artifacts.is_empty());

        let events = log.borrow();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::Compile(ref i) if i.pass == Pass::Uninstaller));
        assert!(matches!(events[1], Event::Checkpoint(_)));
        assert!(matches!(events[2], Event::Compile(ref i) if i.pass == Pass::Installer));

        let invocations = compiles(&events);
        let script = Path::new("/tmp/build/tools/windeploy/setup.nsi");
        assert!(invocations.iter().all(|i| i.script_path == script));
        assert!(invocations[0].flags.iter().any(|f| f.contains(INNER_DEFINE)));
        assert!(!invocations[1].flags.iter().any(|f| f.contains(INNER_DEFINE)));
    }

    #[tokio::test]
    async fn checkpoint_names_temp_installer() {
        let log = Log::default();
        let config = unsigned_config();
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, FakeCompiler::new(&log, &[]), &log, false);
        orchestrator.run().await.unwrap();

        let events = log.borrow();
        assert_eq!(
            events[1],
            Event::Checkpoint("Run 'tempinstaller.exe' as admin, then press enter...".into())
        );
    }

    #[tokio::test]
    async fn signed_run_signs_after_each_pass() {
        let cert = NamedTempFile::new().unwrap();
        let log = Log::default();
        let config = signed_config(&cert);
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, FakeCompiler::new(&log, &[]), &log, false);

        let report = orchestrator.run().await.unwrap();
        assert!(report.signed);

        let temp = PathBuf::from("/tmp/build/tempinstaller.exe");
        let installer = PathBuf::from("/tmp/build/setup.exe");
        assert_eq!(report.signed_artifacts, vec![temp.clone(), installer.clone()]);

        let events = log.borrow();
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], Event::Compile(ref i) if i.pass == Pass::Uninstaller));
        assert_eq!(events[1], Event::Sign(Pass::Uninstaller, temp));
        assert!(matches!(events[2], Event::Checkpoint(_)));
        assert!(matches!(events[3], Event::Compile(ref i) if i.pass == Pass::Installer));
        assert_eq!(events[4], Event::Sign(Pass::Installer, installer));
    }

    #[tokio::test]
    async fn missing_certificate_skips_signing() {
        let dir = tempfile::tempdir().unwrap();
        let log = Log::default();
        let config = BuildConfiguration::builder()
            .build_directory("/tmp/build")
            .certificate_path(dir.path().join("absent.pfx").to_string_lossy())
            .password("secret")
            .build();
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, FakeCompiler::new(&log, &[]), &log, false);

        let report = orchestrator.run().await.unwrap();
        assert!(!report.signed);
        assert!(!log.borrow().iter().any(|e| matches!(e, Event::Sign(..))));
    }

    #[tokio::test]
    async fn failed_uninstaller_pass_aborts_before_checkpoint() {
        let log = Log::default();
        let config = unsigned_config();
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, FakeCompiler::new(&log, &[Some(1)]), &log, false);

        let err = orchestrator.run().await.unwrap_err();
        assert!(matches!(
            err,
            Error::CompileFailure {
                pass: Pass::Uninstaller,
                code: Some(1),
                ..
            }
        ));
        assert_eq!(orchestrator.phase(), Phase::CompilingUninstaller);
        assert_eq!(log.borrow().len(), 1);
    }

    #[tokio::test]
    async fn failed_installer_pass_is_reported() {
        let cert = NamedTempFile::new().unwrap();
        let log = Log::default();
        let config = signed_config(&cert);
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, FakeCompiler::new(&log, &[Some(0), Some(2)]), &log, false);

        let err = orchestrator.run().await.unwrap_err();
        assert!(matches!(
            err,
            Error::CompileFailure {
                pass: Pass::Installer,
                code: Some(2),
                ..
            }
        ));
        // The installer artifact is never handed to the signer.
        let events = log.borrow();
        assert!(!events
            .iter()
            .any(|e| matches!(e, Event::Sign(Pass::Installer, _))));
    }

    #[tokio::test]
    async fn tool_missing_propagates() {
        let log = Log::default();
        let config = unsigned_config();
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, MissingCompiler, &log, false);

        let err = orchestrator.run().await.unwrap_err();
        assert!(matches!(err, Error::ToolMissing { .. }));
        assert!(log.borrow().is_empty());
    }

    #[tokio::test]
    async fn signer_errors_become_signing_failed() {
        let cert = NamedTempFile::new().unwrap();
        let log = Log::default();
        let config = signed_config(&cert);
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, FakeCompiler::new(&log, &[]), &log, true);

        let err = orchestrator.run().await.unwrap_err();
        match err {
            Error::SigningFailed { artifact, reason } => {
                assert_eq!(artifact, Path::new("/tmp/build/tempinstaller.exe"));
                assert!(reason.contains("token locked"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!log.borrow().iter().any(|e| matches!(e, Event::Checkpoint(_))));
    }

    #[tokio::test]
    async fn each_pass_is_reported_as_a_step() {
        let log = Log::default();
        let config = unsigned_config();
        let steps = Steps::default();
        let mut orchestrator =
            wire(&config, &steps, FakeCompiler::new(&log, &[]), &log, false);
        orchestrator.run().await.unwrap();

        assert_eq!(
            *steps.0.borrow(),
            vec!["processing uninstaller", "processing installer"]
        );
    }
}
