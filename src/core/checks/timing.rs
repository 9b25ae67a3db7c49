//! Timing-continuity check.
//!
//! Within a file, consecutive phonemes (by start time) should meet exactly.
//! A positive gap beyond the tolerance means unannotated time; a negative
//! gap means overlapping intervals. Gaps at silence boundaries are flagged
//! too — they are expected noise in the output, not suppressed.

use crate::config::CheckConfig;
use crate::core::anomaly::Anomaly;
use crate::core::checks::group_in_order;
use crate::core::measurement::PhonemeMeasurement;

pub fn check_timing_continuity(phonemes: &[PhonemeMeasurement], config: &CheckConfig) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for (file, mut rows) in group_in_order(phonemes, |p| p.file.as_str()) {
        rows.sort_by(|a, b| {
            a.start_time
                .partial_cmp(&b.start_time)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for pair in rows.windows(2) {
            let current = pair[0];
            let next = pair[1];
            let gap = next.start_time - current.end_time;

            if gap > config.gap_tolerance {
                anomalies.push(Anomaly::TimingGap {
                    file: file.to_string(),
                    after_phoneme: current.phoneme.clone(),
                    before_phoneme: next.phoneme.clone(),
                    gap_ms: gap * 1000.0,
                    time: current.end_time,
                });
            } else if gap < -config.gap_tolerance {
                anomalies.push(Anomaly::TimingOverlap {
                    file: file.to_string(),
                    first_phoneme: current.phoneme.clone(),
                    second_phoneme: next.phoneme.clone(),
                    overlap_ms: gap.abs() * 1000.0,
                    time: current.end_time,
                });
            }
        }
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::anomaly::AnomalyCategory;

    fn phoneme(file: &str, label: &str, start: f64, end: f64) -> PhonemeMeasurement {
        PhonemeMeasurement::new(file, label, start, end)
    }

    #[test]
    fn test_adjacent_within_tolerance_not_flagged() {
        let config = CheckConfig::default();
        // 1ms gap exactly: tolerated as adjacency.
        let rows = vec![
            phoneme("a", "HH", 0.0, 0.100),
            phoneme("a", "AH0", 0.101, 0.200),
        ];
        assert!(check_timing_continuity(&rows, &config).is_empty());
    }

    #[test]
    fn test_gap_flagged_with_magnitude() {
        let config = CheckConfig::default();
        let rows = vec![
            phoneme("a", "HH", 0.0, 0.100),
            phoneme("a", "AH0", 0.120, 0.200),
        ];
        let out = check_timing_continuity(&rows, &config);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Anomaly::TimingGap { gap_ms, after_phoneme, .. } => {
                assert!((gap_ms - 20.0).abs() < 1e-9);
                assert_eq!(after_phoneme, "HH");
            }
            other => panic!("expected gap, got {other:?}"),
        }
    }

    #[test]
    fn test_overlap_flagged_with_magnitude() {
        let config = CheckConfig::default();
        let rows = vec![
            phoneme("a", "HH", 0.0, 0.105),
            phoneme("a", "AH0", 0.100, 0.200),
        ];
        let out = check_timing_continuity(&rows, &config);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Anomaly::TimingOverlap { overlap_ms, .. } => {
                assert!((overlap_ms - 5.0).abs() < 1e-9);
            }
            other => panic!("expected overlap, got {other:?}"),
        }
    }

    #[test]
    fn test_pairs_do_not_cross_file_boundaries() {
        let config = CheckConfig::default();
        // Large "gap" between the end of file a and the start of file b.
        let rows = vec![
            phoneme("a", "HH", 0.0, 0.100),
            phoneme("b", "AH0", 5.0, 5.100),
        ];
        assert!(check_timing_continuity(&rows, &config).is_empty());
    }

    #[test]
    fn test_sorted_by_start_within_file() {
        let config = CheckConfig::default();
        // Out-of-order input; after sorting the sequence is contiguous.
        let rows = vec![
            phoneme("a", "AH0", 0.100, 0.200),
            phoneme("a", "HH", 0.0, 0.100),
        ];
        assert!(check_timing_continuity(&rows, &config).is_empty());
    }

    #[test]
    fn test_trichotomy_every_pair_classified_once() {
        let config = CheckConfig::default();
        let rows = vec![
            phoneme("a", "P1", 0.0, 0.100),
            phoneme("a", "P2", 0.100, 0.200),  // adjacent
            phoneme("a", "P3", 0.250, 0.300),  // gap
            phoneme("a", "P4", 0.290, 0.400),  // overlap
        ];
        let out = check_timing_continuity(&rows, &config);
        // Three consecutive pairs, exactly two flagged.
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].category(), AnomalyCategory::TimingGap);
        assert_eq!(out[1].category(), AnomalyCategory::TimingOverlap);
    }
}
