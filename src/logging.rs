use crate::error::Result;
use flexi_logger::{opt_format, Logger, LoggerHandle};

/// Starts logging to stderr. `RUST_LOG` overrides `default_level`.
///
/// Keep the returned handle alive for the lifetime of the program.
pub fn setup_logging(default_level: &str) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(default_level)?
        .log_to_stderr()
        .format(opt_format)
        .start()?;
    Ok(handle)
}
