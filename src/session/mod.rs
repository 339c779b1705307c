//! One wrapped session: load the secret, launch the child, tee its output
//! past the prompt watcher and wait for it to finish.

mod command;
mod exit;
mod launch;
mod tee;
mod watcher;

pub use command::{parse_command, parse_command_from, Invocation};
pub use exit::{exit_code, Termination, SIGNALED_STATUS};
pub use launch::{launch, LaunchedChild};
pub use tee::{pump, Tee, CHUNK_SIZE};
pub use watcher::{is_password_prompt, spawn_watcher, watch, WatchOutcome, PROMPT_NEEDLE};

use std::io;
use std::process::ExitStatus;
use tokio::io::{duplex, AsyncRead, AsyncWrite};

use crate::error::WrapperError;
use crate::secret::load_secret;

/// Drive one session to completion.
///
/// `input` is read to end before the child starts. `output` receives a
/// live copy of the child's stdout. The returned status is the child's; a
/// failure to relay its output only counts when the child itself succeeded.
pub async fn run_session<I, O>(
    invocation: &Invocation,
    input: I,
    output: O,
) -> Result<ExitStatus, WrapperError>
where
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin + Send + 'static,
{
    let secret = load_secret(input).await?;

    let LaunchedChild {
        mut child,
        stdin,
        stdout,
    } = launch(invocation)?;

    let (tee_tx, tee_rx) = duplex(CHUNK_SIZE);
    let relay = tokio::spawn(pump(stdout, Tee::new(output, tee_tx)));
    spawn_watcher(tee_rx, stdin, secret);

    let status = child
        .wait()
        .await
        .map_err(|source| WrapperError::Wait { source })?;
    tracing::info!(?status, "child exited");

    // Drain whatever the child left in its stdout before reporting.
    let relayed = match relay.await {
        Ok(result) => result,
        Err(join_err) => Err(io::Error::other(join_err)),
    };
    match relayed {
        Ok(bytes) => tracing::debug!(bytes, "child stdout drained"),
        Err(source) if status.success() => return Err(WrapperError::Relay { source }),
        Err(err) => tracing::warn!(error = %err, "relay failed after child failure"),
    }

    Ok(status)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use tokio::io::AsyncReadExt;

    fn sh(script: &str) -> Invocation {
        parse_command_from("sh", vec![OsString::from("-c"), OsString::from(script)])
    }

    async fn run_capturing(invocation: &Invocation, secret: &[u8]) -> (i32, Vec<u8>) {
        let (out_tx, mut out_rx) = duplex(64 * 1024);
        let collector = tokio::spawn(async move {
            let mut captured = Vec::new();
            out_rx.read_to_end(&mut captured).await.map(|_| captured)
        });
        let outcome = run_session(invocation, secret, out_tx).await;
        let captured = collector.await.unwrap().unwrap();
        (exit_code(&outcome), captured)
    }

    #[tokio::test]
    async fn answers_prompt_and_relays_session() {
        let invocation = sh(r#"echo "Remote host Password:"; read line; echo "got: $line""#);
        let (code, out) = run_capturing(&invocation, b"s3cr3t").await;
        assert_eq!(code, 0);
        assert_eq!(out, b"Remote host Password:\ngot: s3cr3t\n");
    }

    #[tokio::test]
    async fn child_exit_code_is_kept() {
        let (code, out) = run_capturing(&sh("echo bye; exit 7"), b"").await;
        assert_eq!(code, 7);
        assert_eq!(out, b"bye\n");
    }

    #[tokio::test]
    async fn second_prompt_gets_nothing() {
        let invocation = sh(
            r#"echo password:; read a; echo "a=$a"; echo password:; read b; echo "b=[$b]""#,
        );
        let (code, out) = run_capturing(&invocation, b"s3cr3t\n").await;
        assert_eq!(code, 0);
        assert_eq!(out, b"password:\na=s3cr3t\npassword:\nb=[]\n");
    }

    #[tokio::test]
    async fn spawn_failure_is_reported() {
        let invocation = parse_command_from("sshfeed-no-such-program-4d1f", Vec::new());
        let outcome = run_session(&invocation, &b"pw"[..], tokio::io::sink()).await;
        assert!(matches!(outcome, Err(WrapperError::Spawn { .. })));
        assert_eq!(exit_code(&outcome), 1);
    }
}
