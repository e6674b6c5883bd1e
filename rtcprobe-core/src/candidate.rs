//! ICE candidate types and SDP candidate attribute parsing

use crate::error::RtcProbeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a candidate's transport address was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CandidateType {
    /// Address of a local interface
    #[serde(rename = "host")]
    Host,
    /// Public mapping reported by a STUN server
    #[serde(rename = "srflx")]
    ServerReflexive,
    /// Address learned from connectivity checks with the peer
    #[serde(rename = "prflx")]
    PeerReflexive,
    /// Address allocated on a TURN relay
    #[serde(rename = "relay")]
    Relay,
}

impl CandidateType {
    /// All candidate types in tally order
    pub const ALL: [CandidateType; 4] = [
        CandidateType::Host,
        CandidateType::ServerReflexive,
        CandidateType::PeerReflexive,
        CandidateType::Relay,
    ];

    /// Wire tag as it appears after `typ` in an SDP candidate
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateType::Host => "host",
            CandidateType::ServerReflexive => "srflx",
            CandidateType::PeerReflexive => "prflx",
            CandidateType::Relay => "relay",
        }
    }

    /// Type preference from RFC 8445 section 5.1.2.2
    ///
    /// The RECOMMENDED values are 126 for host candidates, 110 for peer
    /// reflexive candidates, 100 for server reflexive candidates and 0 for
    /// relayed candidates.
    pub fn preference(&self) -> u16 {
        match self {
            CandidateType::Host => 126,
            CandidateType::PeerReflexive => 110,
            CandidateType::ServerReflexive => 100,
            CandidateType::Relay => 0,
        }
    }
}

impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateType {
    type Err = RtcProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(CandidateType::Host),
            "srflx" => Ok(CandidateType::ServerReflexive),
            "prflx" => Ok(CandidateType::PeerReflexive),
            "relay" => Ok(CandidateType::Relay),
            other => Err(RtcProbeError::InvalidCandidateType {
                value: other.to_string(),
            }),
        }
    }
}

/// Anything that carries an ICE candidate type tag
pub trait TypedCandidate {
    /// The candidate's type, or `InvalidCandidateType` when the tag is unknown
    fn candidate_type(&self) -> Result<CandidateType, RtcProbeError>;
}

impl TypedCandidate for CandidateType {
    fn candidate_type(&self) -> Result<CandidateType, RtcProbeError> {
        Ok(*self)
    }
}

impl<T: TypedCandidate + ?Sized> TypedCandidate for &T {
    fn candidate_type(&self) -> Result<CandidateType, RtcProbeError> {
        (**self).candidate_type()
    }
}

/// One observed ICE candidate
///
/// The type tag is kept as received so that an unknown tag surfaces as an
/// error where candidates are classified rather than being lost at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Candidate foundation
    pub foundation: String,
    /// Component ID (1 = RTP, 2 = RTCP)
    pub component: u16,
    /// Transport protocol, lowercased
    pub protocol: String,
    /// Candidate priority
    pub priority: u32,
    /// Connection address (IP or mDNS hostname)
    pub address: String,
    /// Connection port
    pub port: u16,
    /// Raw type tag
    #[serde(rename = "type")]
    pub typ: String,
    /// Related address for reflexive and relayed candidates
    pub related_address: Option<String>,
    /// Related port for reflexive and relayed candidates
    pub related_port: Option<u16>,
}

impl CandidateRecord {
    /// Parse an SDP candidate attribute
    ///
    /// Accepts `a=candidate:...`, `candidate:...` or the bare attribute value.
    pub fn parse(raw: &str) -> Result<Self, RtcProbeError> {
        let invalid = |reason: &str| RtcProbeError::InvalidCandidate {
            candidate: raw.to_string(),
            reason: reason.to_string(),
        };

        let value = raw.trim();
        let value = value.strip_prefix("a=").unwrap_or(value);
        let value = value.strip_prefix("candidate:").unwrap_or(value);

        let fields: Vec<&str> = value.split_whitespace().collect();
        if fields.len() < 8 {
            return Err(invalid("attribute too short"));
        }
        if fields[6] != "typ" {
            return Err(invalid("missing typ keyword"));
        }

        let component = fields[1]
            .parse()
            .map_err(|_| invalid("component is not a number"))?;
        let priority = fields[3]
            .parse()
            .map_err(|_| invalid("priority is not a number"))?;
        let port = fields[5]
            .parse()
            .map_err(|_| invalid("port is not a number"))?;

        let mut related_address = None;
        let mut related_port = None;
        for pair in fields[8..].chunks(2) {
            match pair {
                ["raddr", raddr] => related_address = Some(raddr.to_string()),
                ["rport", rport] => {
                    related_port = Some(
                        rport
                            .parse()
                            .map_err(|_| invalid("related port is not a number"))?,
                    )
                }
                _ => {}
            }
        }

        Ok(Self {
            foundation: fields[0].to_string(),
            component,
            protocol: fields[2].to_ascii_lowercase(),
            priority,
            address: fields[4].to_string(),
            port,
            typ: fields[7].to_string(),
            related_address,
            related_port,
        })
    }
}

impl TypedCandidate for CandidateRecord {
    fn candidate_type(&self) -> Result<CandidateType, RtcProbeError> {
        self.typ.parse()
    }
}

impl FromStr for CandidateRecord {
    type Err = RtcProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
