//! Operator checkpoint between the two compiler passes.
//!
//! The temporary installer has to be run elevated before the installer pass, which
//! this process cannot do for the operator. The run blocks here until they confirm.

use super::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Blocks until the operator confirms a manual step.
#[allow(async_fn_in_trait)]
pub trait Checkpoint {
    /// Show `message` and wait for confirmation.
    ///
    /// There is no timeout; cancellation is left to whoever owns the process.
    async fn wait_for_confirmation(&self, message: &str) -> Result<()>;
}

/// Checkpoint that waits for a line on stdin.
#[derive(Debug, Default)]
pub struct ConsoleCheckpoint;

impl Checkpoint for ConsoleCheckpoint {
    async fn wait_for_confirmation(&self, message: &str) -> Result<()> {
        let mut stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        confirm(&mut stdin, &mut stdout, message).await
    }
}

/// Write `message` to `prompt` and wait for one line (or end of input) from `input`.
///
/// The content of the line is ignored; an empty line confirms.
pub async fn confirm<R, W>(input: &mut R, prompt: &mut W, message: &str) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    prompt.write_all(message.as_bytes()).await?;
    prompt.flush().await?;

    let mut line = String::new();
    let read = input.read_line(&mut line).await?;
    if read == 0 {
        log::debug!("stdin closed at checkpoint, treating as confirmation");
    }
    Ok(())
}
