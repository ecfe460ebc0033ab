//! Command line interface for windeploy.
//!
//! Parses arguments into an immutable build configuration and runs the two-pass
//! packaging sequence against the real makensis, console and signer.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{CliError, EXIT_OK, Result};
use crate::packager::{
    AnnouncingSigner, ConsoleCheckpoint, Makensis, Orchestrator, nsis::probe_version,
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(&args);
    execute(&config).await
}

/// Runs the packaging sequence for an already-built configuration.
pub async fn execute(config: &RuntimeConfig) -> Result<i32> {
    let build = config.build();
    let output = config.output();

    output.section("Windows installer packaging");
    output.verbose(&format!("build directory: {}", build.build_directory().display()));

    let compiler = Makensis::locate(build.compiler())?;
    match probe_version(compiler.path()).await {
        Some(version) => output.verbose(&format!("makensis {version}")),
        None => output.warn("could not determine the makensis version"),
    }

    let mut orchestrator = Orchestrator::new(
        build,
        compiler,
        ConsoleCheckpoint,
        AnnouncingSigner::new(output),
        output,
    );
    let report = orchestrator.run().await?;

    if report.signed {
        output.success(&format!(
            "installer compiled, {} artifact(s) passed to signing",
            report.signed_artifacts.len()
        ));
    } else {
        output.success("installer compiled (unsigned)");
    }

    Ok(EXIT_OK)
}
