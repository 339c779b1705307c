//! Loading the password that gets fed to the prompt.

use std::fmt;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::WrapperError;

const REDACTED: &str = "****";

/// Opaque bytes read from stdin. Never trimmed, never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({REDACTED}, {} bytes)", self.0.len())
    }
}

/// Read `input` to end-of-stream and keep every byte as the secret.
pub async fn load_secret<R>(mut input: R) -> Result<Secret, WrapperError>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .await
        .map_err(|source| WrapperError::SecretRead { source })?;
    tracing::debug!(len = bytes.len(), "secret loaded");
    Ok(Secret::new(bytes))
}
