//! Peer connection state and statistics report types

use crate::candidate::CandidateType;
use crate::error::RtcProbeError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a peer connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerConnectionState {
    /// Created, no transport activity yet
    New,
    /// ICE or DTLS negotiation in progress
    Connecting,
    /// At least one transport is usable
    Connected,
    /// Connectivity was lost, may recover
    Disconnected,
    /// Connectivity checks or DTLS failed
    Failed,
    /// Connection was closed locally
    Closed,
}

impl PeerConnectionState {
    /// Wire name as reported by `connectionState`
    pub fn as_str(&self) -> &'static str {
        match self {
            PeerConnectionState::New => "new",
            PeerConnectionState::Connecting => "connecting",
            PeerConnectionState::Connected => "connected",
            PeerConnectionState::Disconnected => "disconnected",
            PeerConnectionState::Failed => "failed",
            PeerConnectionState::Closed => "closed",
        }
    }

    /// Whether the connection can no longer carry media without renegotiation
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PeerConnectionState::Failed | PeerConnectionState::Closed
        )
    }
}

impl fmt::Display for PeerConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a statistics report entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsReportKind {
    /// `local-candidate`
    LocalCandidate,
    /// `remote-candidate`
    RemoteCandidate,
    /// `candidate-pair`
    CandidatePair,
    /// `transport`
    Transport,
    /// Any other report kind
    #[default]
    #[serde(other)]
    Other,
}

/// One entry of a statistics report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReportEntry {
    /// Report entry identifier
    #[serde(default)]
    pub id: String,
    /// Entry kind
    #[serde(rename = "type", default)]
    pub kind: StatsReportKind,
    /// Candidate type, present on candidate entries
    #[serde(default)]
    pub candidate_type: Option<CandidateType>,
}

impl StatsReportEntry {
    /// Local candidate entry of the given type
    pub fn local_candidate(id: impl Into<String>, candidate_type: CandidateType) -> Self {
        Self {
            id: id.into(),
            kind: StatsReportKind::LocalCandidate,
            candidate_type: Some(candidate_type),
        }
    }

    /// Remote candidate entry of the given type
    pub fn remote_candidate(id: impl Into<String>, candidate_type: CandidateType) -> Self {
        Self {
            id: id.into(),
            kind: StatsReportKind::RemoteCandidate,
            candidate_type: Some(candidate_type),
        }
    }

    /// Entry of any kind with no candidate type
    pub fn other(id: impl Into<String>, kind: StatsReportKind) -> Self {
        Self {
            id: id.into(),
            kind,
            candidate_type: None,
        }
    }
}

/// A statistics report: the entries returned by one stats query
pub type StatsReport = Vec<StatsReportEntry>;

/// Parse a statistics report from its JSON array form
pub fn parse_stats_report(json: &str) -> Result<StatsReport, RtcProbeError> {
    Ok(serde_json::from_str(json)?)
}

/// Live peer connection that can be asked for statistics
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Current lifecycle state, read at call time
    fn connection_state(&self) -> PeerConnectionState;

    /// Query the connection's current statistics report
    async fn get_stats(&self) -> Result<StatsReport, RtcProbeError>;
}
