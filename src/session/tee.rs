//! Fan-out of the child's stdout.
//!
//! The primary sink is our own stdout and sees every byte. The secondary
//! sink feeds the prompt watcher and is dropped as soon as the watcher hangs
//! up, so a finished watcher never stalls the session.

use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const CHUNK_SIZE: usize = 8 * 1024;

pub struct Tee<P, S> {
    primary: P,
    secondary: Option<S>,
}

impl<P, S> Tee<P, S>
where
    P: AsyncWrite + Unpin,
    S: AsyncWrite + Unpin,
{
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// Write `buf` to the primary sink, then to the secondary one.
    ///
    /// The first error is returned, except a broken pipe on the secondary
    /// sink, which detaches it.
    pub async fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.primary.write_all(buf).await?;
        self.primary.flush().await?;

        if let Some(secondary) = self.secondary.as_mut() {
            match secondary.write_all(buf).await {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    tracing::debug!("watcher hung up, tee continues to stdout only");
                    self.secondary = None;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    pub fn is_detached(&self) -> bool {
        self.secondary.is_none()
    }

    /// Close the secondary sink, signalling end-of-stream to its reader.
    pub async fn close(&mut self) -> io::Result<()> {
        if let Some(mut secondary) = self.secondary.take() {
            // The reader may already be gone.
            let _ = secondary.shutdown().await;
        }
        self.primary.flush().await
    }
}

/// Relay `source` through `tee` until end-of-stream. Returns the number of
/// bytes relayed.
pub async fn pump<R, P, S>(mut source: R, mut tee: Tee<P, S>) -> io::Result<u64>
where
    R: AsyncRead + Unpin,
    P: AsyncWrite + Unpin,
    S: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;

    loop {
        let count = source.read(&mut buffer).await?;
        if count == 0 {
            break;
        }
        tee.write_all(&buffer[..count]).await?;
        total += count as u64;
    }

    tee.close().await?;
    Ok(total)
}
