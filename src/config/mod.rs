//! Process-wide configuration
//!
//! Holds the immutable context built once at start-up and the logging setup
//! derived from the resolved log level.

use crate::cli::options::LogLevel;
use tracing_subscriber::{EnvFilter, fmt};

/// Immutable facts about the running tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    pub program: &'static str,
    pub version: &'static str,
}

impl AppContext {
    /// Context describing this build
    #[must_use]
    pub const fn new() -> Self {
        return Self {
            program: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        };
    }

    /// Line printed by the `version` action
    #[must_use]
    pub fn version_line(&self) -> String {
        format!("{} {}", self.program, self.version)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the log filter, letting `RUST_LOG` win over the resolved level
#[must_use]
pub fn log_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Install the global tracing subscriber; diagnostics go to stderr so stdout
/// stays clean for piping
///
/// Only the first call in a process installs a subscriber; later calls keep
/// the existing one.
#[inline]
pub fn init_logging(level: LogLevel) {
    let installed = fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(level))
        .try_init();
    if installed.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging(LogLevel::Normal);
        init_logging(LogLevel::Debug);
    }

    #[test]
    fn test_version_line() {
        let context = AppContext::new();
        assert_eq!(
            context.version_line(),
            format!("gomu {}", env!("CARGO_PKG_VERSION"))
        );
    }
}
