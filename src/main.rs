use std::process::ExitStatus;

use sshfeed::config::Config;
use sshfeed::error::WrapperError;
use sshfeed::logging::init_tracing;
use sshfeed::session::{exit_code, parse_command, run_session};

#[tokio::main]
async fn main() {
    init_tracing();

    let outcome = run().await;
    // stdout and stderr belong to the child; failures only show up in the
    // exit code and the optional log file.
    if let Err(err) = &outcome {
        tracing::error!(error = %err, "session failed");
    }

    std::process::exit(exit_code(&outcome));
}

async fn run() -> Result<ExitStatus, WrapperError> {
    let config = Config::load()?;
    let invocation = parse_command(&config.program);
    run_session(&invocation, tokio::io::stdin(), tokio::io::stdout()).await
}
