//! Error types for rtcprobe

use thiserror::Error;

/// Main error type for rtcprobe operations
#[derive(Error, Debug)]
pub enum RtcProbeError {
    /// Initialization error
    #[error("Initialization failed: {reason}")]
    Initialization {
        /// Reason for initialization failure
        reason: String,
    },

    /// Configuration was parsed but describes an unusable policy
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason the configuration was rejected
        reason: String,
    },

    /// Candidate type tag outside the closed ICE type set
    #[error("Invalid candidate type: {value:?}")]
    InvalidCandidateType {
        /// The offending type tag
        value: String,
    },

    /// Candidate attribute could not be parsed
    #[error("Invalid candidate {candidate:?}: {reason}")]
    InvalidCandidate {
        /// Raw candidate attribute
        candidate: String,
        /// Reason for parse failure
        reason: String,
    },

    /// The connection's statistics query failed
    #[error("Statistics query failed: {reason}")]
    StatsQuery {
        /// Reason reported by the connection
        reason: String,
    },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {source}")]
    Serialization {
        /// Underlying serde_json error
        #[from]
        source: serde_json::Error,
    },
}

impl RtcProbeError {
    /// Get error code for programmatic handling
    pub fn error_code(&self) -> String {
        match self {
            RtcProbeError::Initialization { .. } => "INITIALIZATION_FAILED".to_string(),
            RtcProbeError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION".to_string(),
            RtcProbeError::InvalidCandidateType { .. } => "INVALID_CANDIDATE_TYPE".to_string(),
            RtcProbeError::InvalidCandidate { .. } => "INVALID_CANDIDATE".to_string(),
            RtcProbeError::StatsQuery { .. } => "STATS_QUERY_FAILED".to_string(),
            RtcProbeError::Serialization { .. } => "SERIALIZATION_ERROR".to_string(),
        }
    }

    /// Whether the caller may reasonably retry the failed operation
    pub fn is_retryable(&self) -> bool {
        matches!(self, RtcProbeError::StatsQuery { .. })
    }
}
