use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file prefix.
pub const LOG_PATH_ENV: &str = "SSHFEED_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is off by default: stdout and stderr belong to the child.
/// Set `SSHFEED_LOG` to a file path to enable it. The file gets a
/// `{path}.{timestamp}.{pid}` name so parallel provisioning runs don't
/// clobber each other.
pub fn init_tracing() {
    let Some(log_path) = std::env::var(LOG_PATH_ENV).ok() else {
        return;
    };

    let Ok(file) = std::fs::File::create(unique_log_path(&log_path)) else {
        // No diagnostics on stderr; it is the child's stream.
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
