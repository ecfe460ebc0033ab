//! Two-pass NSIS installer packaging.
//!
//! # Overview
//!
//! A run:
//! 1. Derives script and output paths from a [`BuildConfiguration`]
//! 2. Decides once whether signing applies ([`should_sign`])
//! 3. Compiles the uninstaller variant and signs it if applicable
//! 4. Waits for the operator to run the temporary installer elevated
//! 5. Compiles the installer variant and signs it if applicable
//!
//! # Example
//!
//! ```no_run
//! use windeploy::packager::{
//!     AnnouncingSigner, BuildConfiguration, ConsoleCheckpoint, LogProgress, Makensis,
//!     Orchestrator,
//! };
//!
//! # async fn example() -> windeploy::packager::Result<()> {
//! let config = BuildConfiguration::builder().build_directory("dist").build();
//! let compiler = Makensis::locate(config.compiler())?;
//!
//! let mut orchestrator = Orchestrator::new(
//!     &config,
//!     compiler,
//!     ConsoleCheckpoint,
//!     AnnouncingSigner::new(&LogProgress),
//!     &LogProgress,
//! );
//! let report = orchestrator.run().await?;
//! println!("installer: {}", report.installer.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`settings`] - Build configuration and path derivation
//! - [`signing`] - Signing gate and signers
//! - [`nsis`] - Compiler passes and makensis invocation
//! - [`checkpoint`] - Operator confirmation
//! - [`orchestrator`] - The two-pass sequence
//! - [`progress`] - Step reporting to the front end

pub mod checkpoint;
pub mod error;
pub mod nsis;
pub mod orchestrator;
pub mod progress;
pub mod settings;
pub mod signing;

pub use checkpoint::{Checkpoint, ConsoleCheckpoint};
pub use error::{Error, Result};
pub use nsis::{Compiler, CompilerInvocation, CompilerResult, Makensis, Pass};
pub use orchestrator::{Orchestrator, Phase, RunReport};
pub use progress::{LogProgress, Progress};
pub use settings::{BuildConfiguration, DerivedPaths, resolve};
pub use signing::{AnnouncingSigner, Signer, should_sign};
