//! Build configuration and path derivation.

use std::path::{Path, PathBuf};

/// Location of the installer script relative to the build directory.
pub const INSTALLER_SCRIPT: &str = "tools/windeploy/setup.nsi";

/// File the uninstaller pass writes, relative to the build directory.
pub const TEMP_INSTALLER: &str = "tempinstaller.exe";

/// Default installer artifact handed to the signer after the installer pass.
pub const DEFAULT_INSTALLER_OUTPUT: &str = "setup.exe";

/// Immutable configuration for a single packaging run.
///
/// Built once at startup (see [`BuildConfiguration::builder`]) and passed to the
/// [`Orchestrator`](crate::packager::Orchestrator).
///
/// # Examples
///
/// ```no_run
/// use windeploy::packager::BuildConfiguration;
///
/// let config = BuildConfiguration::builder()
///     .build_directory("dist")
///     .certificate_path("certs/codesign.pfx")
///     .password("hunter2")
///     .build();
/// assert!(config.derived_paths().installer_script.starts_with("dist"));
/// ```
#[derive(Clone, Debug)]
pub struct BuildConfiguration {
    build_directory: PathBuf,
    certificate_path: String,
    password: String,
    compiler: Option<PathBuf>,
    installer_output: Option<PathBuf>,
}

impl BuildConfiguration {
    /// Starts a builder with every field at its default.
    pub fn builder() -> BuildConfigurationBuilder {
        BuildConfigurationBuilder::default()
    }

    /// Root from which every other path is derived.
    pub fn build_directory(&self) -> &Path {
        &self.build_directory
    }

    /// Certificate path as supplied, untrimmed.
    pub fn certificate_path(&self) -> &str {
        &self.certificate_path
    }

    /// Certificate password as supplied, untrimmed.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Explicit compiler binary, if one was requested.
    pub fn compiler(&self) -> Option<&Path> {
        self.compiler.as_deref()
    }

    /// Installer artifact produced by the installer pass.
    ///
    /// Defaults to `<build_directory>/setup.exe`.
    pub fn installer_output(&self) -> PathBuf {
        self.installer_output
            .clone()
            .unwrap_or_else(|| self.build_directory.join(DEFAULT_INSTALLER_OUTPUT))
    }

    /// Paths derived from the build directory.
    pub fn derived_paths(&self) -> DerivedPaths {
        resolve(&self.build_directory)
    }
}

/// Builder for [`BuildConfiguration`].
#[derive(Default)]
pub struct BuildConfigurationBuilder {
    build_directory: Option<PathBuf>,
    certificate_path: String,
    password: String,
    compiler: Option<PathBuf>,
    installer_output: Option<PathBuf>,
}

impl BuildConfigurationBuilder {
    /// Sets the build directory.
    ///
    /// Default: `.`
    pub fn build_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the code-signing certificate path.
    ///
    /// Default: empty (signing disabled)
    pub fn certificate_path(mut self, path: impl Into<String>) -> Self {
        self.certificate_path = path.into();
        self
    }

    /// Sets the certificate password.
    ///
    /// Default: empty (signing disabled)
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Overrides the compiler binary.
    ///
    /// Default: `makensis` found on `PATH`
    pub fn compiler<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.compiler = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the installer artifact location.
    pub fn installer_output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.installer_output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Finishes the configuration.
    pub fn build(self) -> BuildConfiguration {
        BuildConfiguration {
            build_directory: self.build_directory.unwrap_or_else(|| PathBuf::from(".")),
            certificate_path: self.certificate_path,
            password: self.password,
            compiler: self.compiler,
            installer_output: self.installer_output,
        }
    }
}

/// Paths every run works with, all under the build directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedPaths {
    /// NSIS script compiled by both passes.
    pub installer_script: PathBuf,
    /// Installer written by the uninstaller pass.
    pub temp_installer: PathBuf,
}

/// Derives [`DerivedPaths`] from a build directory.
///
/// Does not touch the filesystem; a missing script only shows up when the
/// compiler runs.
pub fn resolve(build_directory: &Path) -> DerivedPaths {
    DerivedPaths {
        installer_script: build_directory.join(INSTALLER_SCRIPT),
        temp_installer: build_directory.join(TEMP_INSTALLER),
    }
}
