use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::secret::Secret;

/// Lowercased marker that identifies a password prompt.
pub const PROMPT_NEEDLE: &str = "password:";

/// Longest chunk scanned as one line when no newline shows up.
pub const MAX_LINE_LEN: u64 = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// A prompt was seen and the secret was written.
    Injected,
    /// Output ended without a prompt; nothing was written.
    EndOfStream,
}

/// Case-insensitive substring test. Deliberately naive: any line that
/// mentions "password:" counts, banners included.
pub fn is_password_prompt(line: &[u8]) -> bool {
    String::from_utf8_lossy(line)
        .to_lowercase()
        .contains(PROMPT_NEEDLE)
}

/// Scan `output` line by line and answer the first prompt on `input`.
///
/// Both handles are owned and dropped on return, whichever way it goes.
/// On a match `output` is dropped before the secret is written. Dropping
/// `input` closes the child's stdin.
pub async fn watch<R, W>(output: R, mut input: W, secret: &Secret) -> io::Result<WatchOutcome>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(output);
    let mut line = Vec::with_capacity(256);

    loop {
        line.clear();
        let read = (&mut reader)
            .take(MAX_LINE_LEN)
            .read_until(b'\n', &mut line)
            .await?;
        if read == 0 {
            return Ok(WatchOutcome::EndOfStream);
        }
        if is_password_prompt(&line) {
            // Hang up on the tee first so it keeps relaying while a large
            // secret waits for the child to read it.
            drop(reader);
            input.write_all(secret.as_bytes()).await?;
            input.flush().await?;
            return Ok(WatchOutcome::Injected);
        }
    }
}

/// Run [`watch`] as a detached task. Nobody joins it; errors such as a
/// broken pipe from an already-exited child are logged and dropped.
pub fn spawn_watcher<R, W>(output: R, input: W, secret: Secret)
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        match watch(output, input, &secret).await {
            Ok(WatchOutcome::Injected) => {
                tracing::info!(len = secret.len(), "password prompt answered")
            }
            Ok(WatchOutcome::EndOfStream) => {
                tracing::debug!("child output ended without a password prompt")
            }
            Err(err) => tracing::debug!(error = %err, "prompt watcher stopped"),
        }
    });
}
