//! Point-in-time diagnostics snapshots of a live peer connection

use crate::environment::Environment;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use rtcprobe_core::{
    CandidateType, PeerConnectionState, RtcProbeError, StatsReportKind, StatsSource,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};
use uuid::Uuid;

/// Candidate type counts as displayed in a report
///
/// Types that were never seen are absent rather than zero.
pub type CandidateTypeCounts = BTreeMap<CandidateType, u32>;

/// Snapshot of a connection's candidate usage and environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDiagnostics {
    /// Identifier for correlating this report in telemetry
    pub report_id: Uuid,
    /// When the report was assembled
    pub collected_at: DateTime<Utc>,
    /// Connection state read after the stats query completed
    pub connection_state: PeerConnectionState,
    /// Local candidate counts by type
    pub local_candidate_types: CandidateTypeCounts,
    /// Remote candidate counts by type
    pub remote_candidate_types: CandidateTypeCounts,
    /// Coarse browser name
    pub browser: String,
    /// Platform identifier
    pub platform: String,
}

impl ConnectionDiagnostics {
    /// Local candidates of the given type, zero when absent
    pub fn local_count(&self, candidate_type: CandidateType) -> u32 {
        self.local_candidate_types
            .get(&candidate_type)
            .copied()
            .unwrap_or(0)
    }

    /// Remote candidates of the given type, zero when absent
    pub fn remote_count(&self, candidate_type: CandidateType) -> u32 {
        self.remote_candidate_types
            .get(&candidate_type)
            .copied()
            .unwrap_or(0)
    }

    /// JSON form for error reports and telemetry payloads
    pub fn to_json(&self) -> Result<String, RtcProbeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Builds [`ConnectionDiagnostics`] from a live connection
#[derive(Debug, Clone, Default)]
pub struct ConnectionDiagnosticsCollector {
    environment: Environment,
}

impl ConnectionDiagnosticsCollector {
    /// Create a collector that reports the given environment
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    /// Environment stamped onto every report
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Snapshot a connection
    ///
    /// The state is read after the stats query resolves, so the two are not
    /// atomic. A failed stats query is returned unchanged.
    pub async fn collect<S>(&self, connection: &S) -> Result<ConnectionDiagnostics, RtcProbeError>
    where
        S: StatsSource + ?Sized,
    {
        let report = connection.get_stats().await?;
        let connection_state = connection.connection_state();

        let mut local_candidate_types = CandidateTypeCounts::new();
        let mut remote_candidate_types = CandidateTypeCounts::new();

        for entry in &report {
            let tally = match entry.kind {
                StatsReportKind::LocalCandidate => &mut local_candidate_types,
                StatsReportKind::RemoteCandidate => &mut remote_candidate_types,
                _ => continue,
            };
            match entry.candidate_type {
                Some(candidate_type) => *tally.entry(candidate_type).or_insert(0) += 1,
                None => trace!(id = %entry.id, "Skipping candidate entry without type"),
            }
        }

        let diagnostics = ConnectionDiagnostics {
            report_id: Uuid::new_v4(),
            collected_at: Utc::now(),
            connection_state,
            local_candidate_types,
            remote_candidate_types,
            browser: self.environment.browser().to_string(),
            platform: self.environment.platform.clone(),
        };

        debug!(
            report_id = %diagnostics.report_id,
            state = %diagnostics.connection_state,
            entries = report.len(),
            local = ?diagnostics.local_candidate_types,
            remote = ?diagnostics.remote_candidate_types,
            "Collected connection diagnostics"
        );

        Ok(diagnostics)
    }

    /// Snapshot several connections concurrently
    ///
    /// Results are in input order and independent of each other.
    pub async fn collect_all<S>(
        &self,
        connections: &[&S],
    ) -> Vec<Result<ConnectionDiagnostics, RtcProbeError>>
    where
        S: StatsSource + ?Sized,
    {
        join_all(connections.iter().map(|connection| self.collect(*connection))).await
    }
}
