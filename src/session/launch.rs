use std::process::Stdio;
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

use crate::error::WrapperError;
use crate::session::command::Invocation;

/// A running child with its piped ends split out.
pub struct LaunchedChild {
    pub child: Child,
    pub stdin: ChildStdin,
    pub stdout: ChildStdout,
}

/// Start the program with piped stdin/stdout and our own stderr.
///
/// Working directory and environment are inherited; the program is
/// resolved on `PATH`.
pub fn launch(invocation: &Invocation) -> Result<LaunchedChild, WrapperError> {
    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| WrapperError::Spawn {
        program: invocation.program.clone(),
        source,
    })?;
    tracing::info!(program = %invocation.program, pid = ?child.id(), "child started");

    let Some(stdin) = child.stdin.take() else {
        return Err(abandon(child, "stdin"));
    };
    let Some(stdout) = child.stdout.take() else {
        return Err(abandon(child, "stdout"));
    };

    Ok(LaunchedChild {
        child,
        stdin,
        stdout,
    })
}

/// Kill a child we can't drive. `kill_on_drop` hands it to tokio's orphan
/// reaper once it goes out of scope.
fn abandon(mut child: Child, stream: &'static str) -> WrapperError {
    if let Err(err) = child.start_kill() {
        tracing::warn!(error = %err, "failed to kill child after {} pipe setup failed", stream);
    }
    WrapperError::PipeSetup { stream }
}
