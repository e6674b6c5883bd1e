//! # rtcprobe - Connectivity Checks for WebRTC Calls
//!
//! rtcprobe decides whether the ICE candidates gathered during call setup give
//! a peer-to-peer call a healthy enough network path, and snapshots a live peer
//! connection's candidate usage for troubleshooting.
//!
//! ## Key Features
//!
//! - **Candidate classification**: tally host, srflx, prflx and relay candidates
//! - **Sufficiency policy**: configurable per-type thresholds with a cheap pre-check
//! - **Diagnostics**: local/remote candidate counts, connection state, browser and platform
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rtcprobe::{CandidateRecord, RtcProbe};
//!
//! # async fn example(connection: &dyn rtcprobe::StatsSource) -> Result<(), rtcprobe::RtcProbeError> {
//! let probe = RtcProbe::init()?;
//!
//! let gathered = vec![
//!     CandidateRecord::parse("candidate:1 1 udp 2122260223 192.168.1.20 54321 typ host")?,
//!     CandidateRecord::parse("candidate:2 1 udp 1686052607 198.51.100.4 61000 typ srflx")?,
//!     CandidateRecord::parse("candidate:3 1 udp 41885439 203.0.113.7 3478 typ relay")?,
//! ];
//!
//! if !probe.gate().evaluate(&gathered)?.is_ready() {
//!     let diagnostics = probe.diagnose(connection).await?;
//!     println!("{}", diagnostics.to_json()?);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use rtcprobe_core::{
    parse_stats_report, CandidateRecord, CandidateType, PeerConnectionState, RtcProbeError,
    StatsReport, StatsReportEntry, StatsReportKind, StatsSource, TypedCandidate,
};

pub use rtcprobe_diagnostics::{
    detect_browser, CandidateClassifier, CandidateStat, CandidateTypeCounts,
    ConnectionDiagnostics, ConnectionDiagnosticsCollector, DebugLogger, Environment,
    RequiredThresholds,
};

// Public API modules
pub mod config;
pub mod gate;

// Re-export main API types
pub use config::GlobalConfig;
pub use gate::{CallGate, Verdict};

use std::sync::Arc;
use tracing::warn;

/// Main entry point for rtcprobe
#[derive(Debug, Clone)]
pub struct RtcProbe {
    inner: Arc<RtcProbeInner>,
}

#[derive(Debug)]
struct RtcProbeInner {
    config: GlobalConfig,
    gate: CallGate,
    collector: ConnectionDiagnosticsCollector,
}

impl RtcProbe {
    /// Initialize rtcprobe with default settings
    ///
    /// # Example
    /// ```rust
    /// use rtcprobe::RtcProbe;
    ///
    /// let probe = RtcProbe::init()?;
    /// assert_eq!(probe.config().thresholds.total_required(), 3);
    /// # Ok::<(), rtcprobe::RtcProbeError>(())
    /// ```
    pub fn init() -> Result<Self, RtcProbeError> {
        Self::init_with(GlobalConfig::default())
    }

    /// Initialize with custom global configuration
    pub fn init_with(config: GlobalConfig) -> Result<Self, RtcProbeError> {
        config.validate()?;

        if config.debug_logging {
            match DebugLogger::new(config.log_filter.clone()).init() {
                Ok(()) => {}
                Err(RtcProbeError::Initialization { reason }) => {
                    warn!("Logging already initialized: {}", reason);
                }
                Err(e) => return Err(e),
            }
        }

        let gate = CallGate::new(CandidateClassifier::new(config.thresholds));
        let collector = ConnectionDiagnosticsCollector::new(config.environment());

        Ok(Self {
            inner: Arc::new(RtcProbeInner {
                config,
                gate,
                collector,
            }),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &GlobalConfig {
        &self.inner.config
    }

    /// Candidate readiness gate built from the configured thresholds
    pub fn gate(&self) -> &CallGate {
        &self.inner.gate
    }

    /// Candidate classifier built from the configured thresholds
    pub fn classifier(&self) -> &CandidateClassifier {
        self.inner.gate.classifier()
    }

    /// Snapshot a live connection's candidate usage
    pub async fn diagnose<S>(&self, connection: &S) -> Result<ConnectionDiagnostics, RtcProbeError>
    where
        S: StatsSource + ?Sized,
    {
        self.inner.collector.collect(connection).await
    }
}
