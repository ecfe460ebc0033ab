//! Command line argument parsing and validation.

use clap::Parser;
use path_absolutize::Absolutize;
use std::path::PathBuf;

use crate::packager::BuildConfiguration;

/// Two-pass NSIS installer packaging
#[derive(Parser, Debug)]
#[command(
    name = "windeploy",
    version,
    about = "Make the NSIS installer package",
    long_about = "Compiles tools/windeploy/setup.nsi twice with makensis.

The first pass defines INNER and writes tempinstaller.exe into the build directory.
Run that file as administrator when prompted, then press enter: the second pass
compiles the final installer. When a certificate and password are given, each
artifact is handed to the signer after its pass.

Usage:
  windeploy --builddir build
  windeploy --builddir build --certificate codesign.pfx --password \"$PASS\"

Exit code 0 = both passes succeeded."
)]
pub struct Args {
    /// Build directory containing tools/windeploy/setup.nsi
    #[arg(
        long = "builddir",
        value_name = "DIR",
        default_value = ".",
        env = "WINDEPLOY_BUILD_DIR"
    )]
    pub build_dir: PathBuf,

    /// Code-signing certificate
    #[arg(
        long,
        value_name = "PATH",
        default_value = "",
        env = "WINDEPLOY_CERTIFICATE"
    )]
    pub certificate: String,

    /// Certificate password
    #[arg(
        long,
        value_name = "PASSWORD",
        default_value = "",
        env = "WINDEPLOY_CERTIFICATE_PASSWORD",
        hide_env_values = true
    )]
    pub password: String,

    /// makensis executable (name on PATH or a path)
    #[arg(long, value_name = "PATH", env = "WINDEPLOY_MAKENSIS")]
    pub makensis: Option<PathBuf>,

    /// Installer produced by the second pass, handed to the signer
    ///
    /// Defaults to <builddir>/setup.exe.
    #[arg(long, value_name = "PATH")]
    pub installer_output: Option<PathBuf>,

    /// Print resolved paths and the makensis version
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.build_dir.as_os_str().is_empty() {
            return Err("Build directory cannot be empty".to_string());
        }

        if self.build_dir.exists() && !self.build_dir.is_dir() {
            return Err(format!(
                "Build directory is not a directory: {}",
                self.build_dir.display()
            ));
        }

        if let Some(makensis) = &self.makensis {
            if makensis.as_os_str().is_empty() {
                return Err("--makensis cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    build: BuildConfiguration,
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let build_dir = args
            .build_dir
            .absolutize()
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| args.build_dir.clone());

        let mut builder = BuildConfiguration::builder()
            .build_directory(build_dir)
            .certificate_path(args.certificate.as_str())
            .password(args.password.as_str());
        if let Some(makensis) = &args.makensis {
            builder = builder.compiler(makensis);
        }
        if let Some(installer) = &args.installer_output {
            builder = builder.installer_output(installer);
        }

        Self {
            build: builder.build(),
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Immutable build configuration for the run
    pub fn build(&self) -> &BuildConfiguration {
        &self.build
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}
