//! Statistical-outlier check.
//!
//! Durations are compared within their own symbol's corpus-wide
//! distribution: all instances of "AE1" form one group, all instances of
//! "T" another. Groups below the sample floor are skipped. The mean and
//! population standard deviation include the candidate itself.

use crate::config::CheckConfig;
use crate::core::anomaly::Anomaly;
use crate::core::checks::group_in_order;
use crate::core::measurement::PhonemeMeasurement;
use crate::core::stats;

pub fn check_statistical_outliers(
    phonemes: &[PhonemeMeasurement],
    config: &CheckConfig,
) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for (_, rows) in group_in_order(phonemes, |p| p.phoneme.as_str()) {
        if rows.len() < config.outlier_min_samples {
            continue;
        }

        let durations: Vec<f64> = rows.iter().map(|p| p.duration).collect();
        let mean = stats::mean(&durations);
        let std = stats::population_std(&durations);

        for p in rows {
            // Zero variance means every instance is identical; z is 0 by
            // definition rather than a division by zero.
            let z = if std > 0.0 {
                (p.duration - mean).abs() / std
            } else {
                0.0
            };

            if z > config.outlier_z_threshold {
                anomalies.push(Anomaly::StatisticalOutlier {
                    file: p.file.clone(),
                    phoneme: p.phoneme.clone(),
                    duration: p.duration,
                    mean_duration: mean,
                    z_score: z,
                    time: p.start_time,
                });
            }
        }
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phoneme(label: &str, duration: f64) -> PhonemeMeasurement {
        PhonemeMeasurement::new("rec", label, 0.0, duration)
    }

    /// Many identical durations plus one extreme value: the extreme one is
    /// an outlier even though it drags the mean toward itself.
    fn skewed_group(label: &str, n_normal: usize, extreme: f64) -> Vec<PhonemeMeasurement> {
        let mut rows: Vec<PhonemeMeasurement> =
            (0..n_normal).map(|_| phoneme(label, 0.050)).collect();
        rows.push(phoneme(label, extreme));
        rows
    }

    #[test]
    fn test_extreme_duration_flagged() {
        let rows = skewed_group("AE1", 30, 1.0);
        let out = check_statistical_outliers(&rows, &CheckConfig::default());
        assert_eq!(out.len(), 1);
        match &out[0] {
            Anomaly::StatisticalOutlier { z_score, duration, .. } => {
                assert!(*z_score > 3.0);
                assert_eq!(*duration, 1.0);
            }
            other => panic!("expected outlier, got {other:?}"),
        }
    }

    #[test]
    fn test_group_of_two_never_flagged() {
        // Sample floor: a symbol occurring twice produces no outliers, no
        // matter how different the two durations are.
        let rows = vec![phoneme("ZH", 0.010), phoneme("ZH", 2.0)];
        assert!(check_statistical_outliers(&rows, &CheckConfig::default()).is_empty());
    }

    #[test]
    fn test_zero_variance_group_never_flagged() {
        let rows = vec![phoneme("K", 0.05); 10];
        assert!(check_statistical_outliers(&rows, &CheckConfig::default()).is_empty());
    }

    #[test]
    fn test_outliers_are_symbol_local() {
        // An extreme "B" cannot create or remove outliers among "A"s.
        let mut rows = skewed_group("A", 30, 1.0);
        let baseline = check_statistical_outliers(&rows, &CheckConfig::default());

        rows.extend([phoneme("B", 0.05), phoneme("B", 0.05), phoneme("B", 0.05), phoneme("B", 3.0)]);
        let combined = check_statistical_outliers(&rows, &CheckConfig::default());

        let a_flags: Vec<_> = combined
            .iter()
            .filter(|a| matches!(a, Anomaly::StatisticalOutlier { phoneme, .. } if phoneme == "A"))
            .cloned()
            .collect();
        assert_eq!(a_flags, baseline);
    }
}
