//! Integration tests for candidate classification and the sufficiency policy

use rtcprobe_core::*;
use rtcprobe_diagnostics::*;
use tokio_test::assert_err;

use rtcprobe_core::CandidateType::{Host, PeerReflexive, Relay, ServerReflexive};

/// Deterministic candidate mixes covering every type in varying proportions
fn candidate_mixes() -> Vec<Vec<CandidateType>> {
    let mut mixes = Vec::new();
    for len in 0..12usize {
        let mix = (0..len)
            .map(|i| CandidateType::ALL[(i * 7 + len) % CandidateType::ALL.len()])
            .collect();
        mixes.push(mix);
    }
    mixes.push(vec![Relay; 9]);
    mixes.push(vec![PeerReflexive; 4]);
    mixes
}

#[test]
fn test_counts_sum_to_input_length() {
    let classifier = CandidateClassifier::default();
    for mix in candidate_mixes() {
        let stat = classifier.classify(&mix).unwrap();
        assert_eq!(stat.total(), mix.len() as u64, "mix {:?}", mix);
    }
}

#[test]
fn test_pre_check_depends_only_on_length() {
    let classifier = CandidateClassifier::default();
    for mix in candidate_mixes() {
        assert_eq!(classifier.passes_pre_check(&mix), mix.len() >= 3);
    }
}

#[test]
fn test_sufficiency_is_monotonic() {
    let classifier = CandidateClassifier::default();
    for host in 0..3 {
        for srflx in 0..3 {
            for relay in 0..3 {
                let stat = CandidateStat::new(host, srflx, 0, relay);
                if !classifier.is_sufficient(&stat) {
                    continue;
                }
                assert!(classifier.is_sufficient(&CandidateStat::new(host + 1, srflx, 0, relay)));
                assert!(classifier.is_sufficient(&CandidateStat::new(host, srflx + 1, 0, relay)));
                assert!(classifier.is_sufficient(&CandidateStat::new(host, srflx, 0, relay + 1)));
            }
        }
    }
}

#[test]
fn test_sufficiency_ignores_prflx() {
    let classifier = CandidateClassifier::default();
    for host in 0..2 {
        for srflx in 0..2 {
            for relay in 0..2 {
                let baseline = classifier.is_sufficient(&CandidateStat::new(host, srflx, 0, relay));
                for prflx in [1, 5, 100] {
                    assert_eq!(
                        classifier.is_sufficient(&CandidateStat::new(host, srflx, prflx, relay)),
                        baseline
                    );
                }
            }
        }
    }
}

#[test]
fn test_prflx_threshold_is_not_enforced() {
    let classifier = CandidateClassifier::new(RequiredThresholds {
        prflx: 10,
        ..RequiredThresholds::default()
    });
    assert!(classifier.is_sufficient(&CandidateStat::new(1, 1, 0, 1)));
    assert_eq!(classifier.thresholds().total_required(), 3);
}

#[test]
fn test_parsed_gathering_sequence() {
    let classifier = CandidateClassifier::default();
    let gathered: Vec<CandidateRecord> = [
        "candidate:1 1 udp 2122260223 192.168.1.20 54321 typ host generation 0",
        "candidate:2 1 tcp 1518280447 192.168.1.20 9 typ host tcptype active",
        "candidate:3 1 udp 1686052607 198.51.100.4 61000 typ srflx raddr 192.168.1.20 rport 54321",
        "candidate:4 1 udp 41885439 203.0.113.7 3478 typ relay raddr 198.51.100.4 rport 61000",
    ]
    .iter()
    .map(|line| CandidateRecord::parse(line).unwrap())
    .collect();

    assert!(!classifier.passes_pre_check(&gathered[..2]));

    let partial = classifier.classify(&gathered[..3]).unwrap();
    assert!(classifier.passes_pre_check(&gathered[..3]));
    assert!(!classifier.is_sufficient(&partial));

    let complete = classifier.classify(&gathered).unwrap();
    assert_eq!(complete, CandidateStat::new(2, 1, 0, 1));
    assert!(classifier.is_sufficient(&complete));
}

#[test]
fn test_duplicate_records_count_independently() {
    let classifier = CandidateClassifier::default();
    let record = CandidateRecord::parse("candidate:1 1 udp 100 10.0.0.1 5000 typ relay").unwrap();
    let stat = classifier
        .classify(vec![record.clone(), record.clone(), record])
        .unwrap();
    assert_eq!(stat.relay, 3);
}

#[test]
fn test_unknown_type_fails_classification() {
    let classifier = CandidateClassifier::default();
    let records = vec![
        CandidateRecord::parse("candidate:1 1 udp 100 10.0.0.1 5000 typ host").unwrap(),
        CandidateRecord::parse("candidate:2 1 udp 100 10.0.0.2 5000 typ turn").unwrap(),
    ];

    let err = assert_err!(classifier.classify(&records));
    match err {
        RtcProbeError::InvalidCandidateType { value } => assert_eq!(value, "turn"),
        other => panic!("Expected InvalidCandidateType, got {:?}", other),
    }
}

#[test]
fn test_stat_serializes_all_four_types() {
    let classifier = CandidateClassifier::default();
    let stat = classifier.classify([Host, ServerReflexive]).unwrap();
    let value = serde_json::to_value(stat).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"host": 1, "srflx": 1, "prflx": 0, "relay": 0})
    );
}

#[test]
fn test_max_thresholds_pre_check_boundary() {
    let classifier = CandidateClassifier::new(RequiredThresholds {
        host: u32::MAX,
        srflx: 1,
        prflx: 0,
        relay: 1,
    });

    assert!(!classifier.passes_pre_check(&[Host]));
    assert!(!classifier.passes_pre_check_count(3));
    assert!(!classifier.passes_pre_check_count(u32::MAX as usize));
    if usize::BITS > 32 {
        let required = u32::MAX as usize + 2;
        assert!(!classifier.passes_pre_check_count(required - 1));
        assert!(classifier.passes_pre_check_count(required));
    }
}

#[test]
fn test_max_thresholds_sufficiency_boundary() {
    let classifier = CandidateClassifier::new(RequiredThresholds {
        host: u32::MAX,
        srflx: u32::MAX,
        prflx: u32::MAX,
        relay: u32::MAX,
    });

    assert_eq!(
        classifier.thresholds().total_required(),
        3 * u64::from(u32::MAX)
    );
    assert!(!classifier.is_sufficient(&CandidateStat::new(u32::MAX, u32::MAX, 0, u32::MAX - 1)));
    assert!(classifier.is_sufficient(&CandidateStat::new(u32::MAX, u32::MAX, 0, u32::MAX)));
}
