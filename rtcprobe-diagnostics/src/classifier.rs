//! ICE candidate tallies and sufficiency policy

use rtcprobe_core::{CandidateType, RtcProbeError, TypedCandidate};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Per-type candidate counts
///
/// Every type is always present, zero when unseen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateStat {
    /// Host candidates
    pub host: u32,
    /// Server reflexive candidates
    pub srflx: u32,
    /// Peer reflexive candidates
    pub prflx: u32,
    /// Relay candidates
    pub relay: u32,
}

impl CandidateStat {
    /// Build a stat from explicit counts
    pub fn new(host: u32, srflx: u32, prflx: u32, relay: u32) -> Self {
        Self {
            host,
            srflx,
            prflx,
            relay,
        }
    }

    /// Count for one candidate type
    pub fn get(&self, candidate_type: CandidateType) -> u32 {
        match candidate_type {
            CandidateType::Host => self.host,
            CandidateType::ServerReflexive => self.srflx,
            CandidateType::PeerReflexive => self.prflx,
            CandidateType::Relay => self.relay,
        }
    }

    fn increment(&mut self, candidate_type: CandidateType) {
        let slot = match candidate_type {
            CandidateType::Host => &mut self.host,
            CandidateType::ServerReflexive => &mut self.srflx,
            CandidateType::PeerReflexive => &mut self.prflx,
            CandidateType::Relay => &mut self.relay,
        };
        *slot += 1;
    }

    /// Sum of all four counts
    pub fn total(&self) -> u64 {
        u64::from(self.host)
            + u64::from(self.srflx)
            + u64::from(self.prflx)
            + u64::from(self.relay)
    }

    /// Counts in fixed order host, srflx, prflx, relay
    pub fn iter(&self) -> impl Iterator<Item = (CandidateType, u32)> + '_ {
        CandidateType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

impl fmt::Display for CandidateStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "host={}, srflx={}, prflx={}, relay={}",
            self.host, self.srflx, self.prflx, self.relay
        )
    }
}

/// Minimum count per candidate type for a candidate set to be sufficient
///
/// `prflx` is carried for completeness but never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredThresholds {
    /// Minimum host candidates
    pub host: u32,
    /// Minimum server reflexive candidates
    pub srflx: u32,
    /// Peer reflexive threshold, not enforced
    pub prflx: u32,
    /// Minimum relay candidates
    pub relay: u32,
}

impl Default for RequiredThresholds {
    fn default() -> Self {
        Self {
            host: 1,
            srflx: 1,
            prflx: 0,
            relay: 1,
        }
    }
}

impl RequiredThresholds {
    /// Candidate count below which a set can never be sufficient
    ///
    /// Summed in `u64` so that thresholds read from configuration cannot wrap.
    pub fn total_required(&self) -> u64 {
        u64::from(self.host) + u64::from(self.srflx) + u64::from(self.relay)
    }

    /// Checked types whose count in `stat` is below threshold, in order host, srflx, relay
    pub fn missing(&self, stat: &CandidateStat) -> Vec<CandidateType> {
        [
            (CandidateType::Host, stat.host, self.host),
            (CandidateType::ServerReflexive, stat.srflx, self.srflx),
            (CandidateType::Relay, stat.relay, self.relay),
        ]
        .into_iter()
        .filter(|(_, have, need)| have < need)
        .map(|(candidate_type, _, _)| candidate_type)
        .collect()
    }
}

/// Counts candidates by type and applies the sufficiency policy
#[derive(Debug, Clone, Default)]
pub struct CandidateClassifier {
    thresholds: RequiredThresholds,
}

impl CandidateClassifier {
    /// Create a classifier with the given policy
    pub fn new(thresholds: RequiredThresholds) -> Self {
        Self { thresholds }
    }

    /// The policy this classifier enforces
    pub fn thresholds(&self) -> &RequiredThresholds {
        &self.thresholds
    }

    /// Tally candidates by type
    ///
    /// Duplicates count independently. Fails on the first candidate whose
    /// type tag is not one of host, srflx, prflx or relay.
    pub fn classify<I>(&self, candidates: I) -> Result<CandidateStat, RtcProbeError>
    where
        I: IntoIterator,
        I::Item: TypedCandidate,
    {
        let mut stat = CandidateStat::default();
        for candidate in candidates {
            stat.increment(candidate.candidate_type()?);
        }
        trace!(%stat, "Classified candidates");
        Ok(stat)
    }

    /// Whether every checked type meets its threshold
    pub fn is_sufficient(&self, stat: &CandidateStat) -> bool {
        let sufficient = stat.host >= self.thresholds.host
            && stat.srflx >= self.thresholds.srflx
            && stat.relay >= self.thresholds.relay;
        debug!(%stat, sufficient, "Evaluated candidate sufficiency");
        sufficient
    }

    /// Length-only gate run before classification
    ///
    /// A true result does not imply [`is_sufficient`](Self::is_sufficient).
    pub fn passes_pre_check<C>(&self, candidates: &[C]) -> bool {
        self.passes_pre_check_count(candidates.len())
    }

    /// Length-only gate for callers that track a running count
    pub fn passes_pre_check_count(&self, count: usize) -> bool {
        count as u64 >= self.thresholds.total_required()
    }
}
