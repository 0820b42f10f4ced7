use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that overrides the log filter, in `RUST_LOG` syntax.
pub const LOG_ENV: &str = "GIT_TAG_VERSION_LOG";

/// Map the `-v` count to a level: warn, info, debug, then trace.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialize the tracing subscriber.
///
/// Logs go to stderr so stdout stays reserved for the console report.
/// `GIT_TAG_VERSION_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "git_tag_version={}",
            level_for_verbosity(verbosity)
        ))
    });

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot initialize logging: {}", e))
}
