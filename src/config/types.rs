use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Program launched with the forwarded arguments (e.g. "ssh").
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: default_program(),
        }
    }
}

fn default_program() -> String {
    "ssh".to_string()
}
