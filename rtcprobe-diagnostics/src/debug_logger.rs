//! Structured debug logging system

use rtcprobe_core::RtcProbeError;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the caller supplies one
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Debug logger for structured logging
#[derive(Debug, Clone)]
pub struct DebugLogger {
    filter: String,
}

impl DebugLogger {
    /// Create a debug logger with the given default filter directive
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
        }
    }

    /// Default filter directive, overridden by `RUST_LOG` when set
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Install the global `tracing` subscriber
    pub fn init(&self) -> Result<(), RtcProbeError> {
        Self::init_logging(&self.filter)
    }

    /// Parse a filter directive such as `info` or `rtcprobe_diagnostics=debug`
    pub fn parse_filter(filter: &str) -> Result<EnvFilter, RtcProbeError> {
        EnvFilter::try_new(filter).map_err(|e| RtcProbeError::InvalidConfiguration {
            reason: format!("Invalid log filter {:?}: {}", filter, e),
        })
    }

    /// Initialize logging system
    ///
    /// A malformed `default_filter` is an `InvalidConfiguration` error. An
    /// already installed global subscriber is an `Initialization` error.
    pub fn init_logging(default_filter: &str) -> Result<(), RtcProbeError> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => Self::parse_filter(default_filter)?,
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .map_err(|e| RtcProbeError::Initialization {
                reason: format!("Failed to install tracing subscriber: {}", e),
            })
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(DebugLogger::default().filter(), DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_second_init_reports_error() {
        let logger = DebugLogger::new("rtcprobe_diagnostics=debug");
        // Another test in this binary may have installed the subscriber first.
        match logger.init() {
            Ok(()) | Err(RtcProbeError::Initialization { .. }) => {}
            Err(other) => panic!("Unexpected first init error: {:?}", other),
        }
        let err = logger.init().unwrap_err();
        assert_eq!(err.error_code(), "INITIALIZATION_FAILED");
    }

    #[test]
    fn test_parse_filter() {
        assert!(DebugLogger::parse_filter("info").is_ok());
        assert!(DebugLogger::parse_filter("rtcprobe=debug,tokio=warn").is_ok());

        let err = DebugLogger::parse_filter("foo=notalevel").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
    }
}
