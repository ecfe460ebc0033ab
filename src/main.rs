//! windeploy - two-pass NSIS installer packaging.
//!
//! Compiles the uninstaller variant, waits for the operator to run the temporary
//! installer elevated, then compiles the final installer, signing each artifact
//! when a certificate and password are available.

use std::process;

use windeploy::cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
