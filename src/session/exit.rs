use std::process::ExitStatus;

use crate::error::{WrapperError, GENERIC_FAILURE};

/// Wait status reported for a child that died from a signal. Passed to
/// `process::exit` it surfaces as 255.
pub const SIGNALED_STATUS: i32 = -1;

/// How a child that is no longer running ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Killed(i32),
    Unknown,
}

impl Termination {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }
        match signal_of(status) {
            Some(signal) => Termination::Killed(signal),
            None => Termination::Unknown,
        }
    }

    /// Our own exit code for this termination. Every signal death maps to
    /// the same status regardless of the signal.
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::Exited(code) => code,
            Termination::Killed(_) => SIGNALED_STATUS,
            Termination::Unknown => GENERIC_FAILURE,
        }
    }
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> Option<i32> {
    None
}

/// Map the outcome of waiting on the child to our exit code.
///
/// A successful status short-circuits to 0 before any extraction is tried.
pub fn exit_code(outcome: &Result<ExitStatus, WrapperError>) -> i32 {
    match outcome {
        Ok(status) if status.success() => 0,
        Ok(status) => Termination::from_status(*status).exit_code(),
        Err(_) => GENERIC_FAILURE,
    }
}
