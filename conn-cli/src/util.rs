//! Logging setup shared by all commands.

use std::path::Path;

use conn_core::tracing::{TracingConfig, TracingLevel, TracingOutput};

/// Environment variable holding a log level or a full filter directive
pub const LOG_ENV: &str = "CONN_LOG";

/// Builds the tracing configuration from the global flags.
///
/// `env` is the value of [`LOG_ENV`]: a bare level replaces the `-v` level,
/// anything else is used as a filter directive.
pub fn tracing_config(
    verbose: u8,
    quiet: bool,
    log_file: Option<&Path>,
    env: Option<&str>,
) -> TracingConfig {
    let level = if quiet {
        TracingLevel::Error
    } else {
        TracingLevel::from_verbosity(verbose)
    };
    let mut config = TracingConfig::new().with_level(level);

    if let Some(path) = log_file {
        config = config.with_output(TracingOutput::File {
            path: path.to_path_buf(),
        });
    }

    match env.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => match value.parse::<TracingLevel>() {
            Ok(level) => config.with_level(level),
            Err(()) => config.with_filter(value),
        },
        None => config,
    }
}
