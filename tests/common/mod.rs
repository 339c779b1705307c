//! Shared helpers for driving the built binary.

#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Result of one wrapper run.
pub struct Run {
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Run {
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Command for the wrapper binary with an isolated, absent config file.
pub fn sshfeed_cmd(config_dir: &TempDir, program: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sshfeed"));
    cmd.env("SSHFEED_CONFIG", config_dir.path().join("config.toml"))
        .env("SSHFEED_PROGRAM", program)
        .env_remove("SSHFEED_LOG");
    cmd
}

/// Run the wrapper around `program args...`, feeding `secret` on stdin.
pub fn run_with_secret(program: &str, args: &[&str], secret: &[u8]) -> Run {
    let config_dir = TempDir::new().expect("Failed to create temp dir");
    let mut cmd = sshfeed_cmd(&config_dir, program);
    cmd.args(args);
    feed(cmd, secret)
}

/// Run the wrapper around `sh -c script`.
pub fn run_script(script: &str, secret: &[u8]) -> Run {
    run_with_secret("sh", &["-c", script], secret)
}

pub fn feed(mut cmd: Command, secret: &[u8]) -> Run {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn sshfeed");

    {
        let mut stdin = child.stdin.take().expect("stdin is piped");
        stdin.write_all(secret).expect("Failed to write secret");
    }

    let Output {
        status,
        stdout,
        stderr,
    } = child.wait_with_output().expect("Failed to wait for sshfeed");

    Run {
        code: status.code(),
        stdout,
        stderr,
    }
}
