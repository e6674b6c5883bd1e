//! # rtcprobe Diagnostics
//!
//! Connectivity evaluation for WebRTC calls.
//! Provides ICE candidate classification against a sufficiency policy,
//! connection diagnostics snapshots, and structured logging.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod collector;
pub mod debug_logger;
pub mod environment;

// Re-export main types
pub use classifier::{CandidateClassifier, CandidateStat, RequiredThresholds};
pub use collector::{CandidateTypeCounts, ConnectionDiagnostics, ConnectionDiagnosticsCollector};
pub use debug_logger::DebugLogger;
pub use environment::{detect_browser, Environment};
