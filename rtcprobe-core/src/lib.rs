//! # rtcprobe Core
//!
//! Shared vocabulary for evaluating WebRTC call connectivity: ICE candidate
//! types and records, peer connection statistics reports, and the error type
//! used across the rtcprobe crates.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod error;
pub mod stats;

// Re-export main types
pub use candidate::{CandidateRecord, CandidateType, TypedCandidate};
pub use error::RtcProbeError;
pub use stats::{
    parse_stats_report, PeerConnectionState, StatsReport, StatsReportEntry, StatsReportKind,
    StatsSource,
};
