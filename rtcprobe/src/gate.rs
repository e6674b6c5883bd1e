//! Call readiness gate over gathered ICE candidates

use crate::{CandidateClassifier, CandidateStat, CandidateType, RtcProbeError, TypedCandidate};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of evaluating the candidates gathered so far
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Too few candidates to possibly satisfy the policy; nothing was classified
    AwaitingCandidates {
        /// Candidates gathered so far
        observed: usize,
        /// Minimum count the policy needs
        required: u64,
    },
    /// Enough candidates, but some checked type is below its threshold
    Insufficient {
        /// Tally of the gathered candidates
        stat: CandidateStat,
        /// Types below threshold, in order host, srflx, relay
        missing: Vec<CandidateType>,
    },
    /// Every checked type meets its threshold
    Ready {
        /// Tally of the gathered candidates
        stat: CandidateStat,
    },
}

impl Verdict {
    /// Whether the call may proceed
    pub fn is_ready(&self) -> bool {
        matches!(self, Verdict::Ready { .. })
    }

    /// Tally, when classification ran
    pub fn stat(&self) -> Option<&CandidateStat> {
        match self {
            Verdict::AwaitingCandidates { .. } => None,
            Verdict::Insufficient { stat, .. } | Verdict::Ready { stat } => Some(stat),
        }
    }
}

/// Runs the cheap pre-check before full classification
#[derive(Debug, Clone, Default)]
pub struct CallGate {
    classifier: CandidateClassifier,
}

impl CallGate {
    /// Create a gate around a classifier
    pub fn new(classifier: CandidateClassifier) -> Self {
        Self { classifier }
    }

    /// The classifier this gate consults
    pub fn classifier(&self) -> &CandidateClassifier {
        &self.classifier
    }

    /// Evaluate the candidates gathered so far
    ///
    /// Returns early without classifying when the pre-check fails.
    pub fn evaluate<C: TypedCandidate>(&self, candidates: &[C]) -> Result<Verdict, RtcProbeError> {
        if !self.classifier.passes_pre_check(candidates) {
            let required = self.classifier.thresholds().total_required();
            debug!(
                observed = candidates.len(),
                required, "Waiting for more ICE candidates"
            );
            return Ok(Verdict::AwaitingCandidates {
                observed: candidates.len(),
                required,
            });
        }

        let stat = self.classifier.classify(candidates)?;
        if self.classifier.is_sufficient(&stat) {
            info!(%stat, "ICE candidates sufficient for call");
            return Ok(Verdict::Ready { stat });
        }

        let missing = self.classifier.thresholds().missing(&stat);
        info!(%stat, ?missing, "ICE candidates insufficient for call");
        Ok(Verdict::Insufficient { stat, missing })
    }
}
