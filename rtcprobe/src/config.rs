//! Configuration types and defaults

use crate::{DebugLogger, Environment, RequiredThresholds, RtcProbeError};
use rtcprobe_diagnostics::debug_logger::DEFAULT_LOG_FILTER;
use serde::{Deserialize, Serialize};

/// Global rtcprobe configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Install a tracing subscriber on init
    pub debug_logging: bool,
    /// Default log filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Candidate sufficiency policy
    pub thresholds: RequiredThresholds,
    /// User agent reported in diagnostics instead of the process default
    pub user_agent: Option<String>,
    /// Platform reported in diagnostics instead of the process default
    pub platform: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            thresholds: RequiredThresholds::default(),
            user_agent: None,
            platform: None,
        }
    }
}

impl GlobalConfig {
    /// Parse a JSON configuration document, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, RtcProbeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject configurations that cannot gate a call meaningfully
    pub fn validate(&self) -> Result<(), RtcProbeError> {
        if self.thresholds.total_required() == 0 {
            return Err(RtcProbeError::InvalidConfiguration {
                reason: "host, srflx and relay thresholds are all zero".to_string(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(RtcProbeError::InvalidConfiguration {
                reason: "log_filter is empty".to_string(),
            });
        }
        DebugLogger::parse_filter(&self.log_filter)?;
        Ok(())
    }

    /// Environment for diagnostics, applying any overrides
    pub fn environment(&self) -> Environment {
        let current = Environment::current();
        Environment {
            user_agent: self.user_agent.clone().unwrap_or(current.user_agent),
            platform: self.platform.clone().unwrap_or(current.platform),
        }
    }
}
