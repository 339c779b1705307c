//! Error types for the wrapper pipeline.
//!
//! Every variant is fatal and maps to the generic failure exit code; the
//! distinction only shows up in the log.

use thiserror::Error;

use crate::config::ConfigError;

/// Exit code used for every failure that has no child status to forward.
pub const GENERIC_FAILURE: i32 = 1;

/// Errors that can occur while setting up or supervising the child.
#[derive(Debug, Error)]
pub enum WrapperError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Standard input could not be read to end-of-stream
    #[error("Failed to read secret from stdin: {source}")]
    SecretRead {
        #[source]
        source: std::io::Error,
    },

    /// A stdio pipe to the child was not established
    #[error("Failed to set up child {stream} pipe")]
    PipeSetup { stream: &'static str },

    /// The program could not be found or started
    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed
    #[error("Failed to wait for child: {source}")]
    Wait {
        #[source]
        source: std::io::Error,
    },

    /// Child output could not be relayed to our stdout
    #[error("Failed to relay child output: {source}")]
    Relay {
        #[source]
        source: std::io::Error,
    },
}
