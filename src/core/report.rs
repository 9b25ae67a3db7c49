//! Report aggregation.
//!
//! Two structured records come out of a corpus run: a [`CorpusSummary`]
//! describing the measurement tables themselves, and a [`QualityReport`]
//! aggregating the four checks into per-category counts, an error rate, and
//! a qualitative grade. Both refuse to aggregate an empty corpus — the
//! "no data" case is an explicit error, never a division by zero or a
//! silent empty report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::core::anomaly::{Anomaly, AnomalyCategory};
use crate::core::checks::CheckOutcome;
use crate::core::measurement::{PhonemeMeasurement, WordMeasurement};
use crate::core::stats;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no phoneme measurements to aggregate (empty corpus)")]
    EmptyCorpus,
}

/// Qualitative alignment grade derived from the error rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Grade {
    /// Boundaries are exclusive on the upper side: exactly 5.00% is Good,
    /// not Excellent.
    pub fn from_error_rate(rate_percent: f64) -> Self {
        if rate_percent < 5.0 {
            Grade::Excellent
        } else if rate_percent < 10.0 {
            Grade::Good
        } else if rate_percent < 20.0 {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Grade::Excellent => "EXCELLENT alignment quality",
            Grade::Good => "GOOD alignment quality",
            Grade::Fair => "FAIR alignment quality - some issues to review",
            Grade::Poor => "POOR alignment quality - significant issues found",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DurationAnomalyCounts {
    pub too_short_vowels: usize,
    pub too_long_vowels: usize,
    pub too_short_consonants: usize,
    pub too_long_consonants: usize,
}

impl DurationAnomalyCounts {
    pub fn total(&self) -> usize {
        self.too_short_vowels + self.too_long_vowels + self.too_short_consonants + self.too_long_consonants
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimingIssueCounts {
    pub gaps: usize,
    pub overlaps: usize,
}

/// Full anomaly lists, one per check, owned by the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyDetails {
    pub duration_anomalies: Vec<Anomaly>,
    pub timing_issues: Vec<Anomaly>,
    pub statistical_outliers: Vec<Anomaly>,
    pub consistency_issues: Vec<Anomaly>,
}

/// Aggregated quality-check report for one corpus run.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    pub timestamp: DateTime<Utc>,
    pub total_phonemes: usize,
    pub total_words: usize,
    pub duration_anomalies: DurationAnomalyCounts,
    pub timing_issues: TimingIssueCounts,
    pub statistical_outliers: usize,
    pub word_phoneme_mismatches: usize,
    pub total_issues: usize,
    pub error_rate_percent: f64,
    pub grade: Grade,
    pub details: AnomalyDetails,
}

impl QualityReport {
    pub fn compile(
        outcome: &CheckOutcome,
        total_phonemes: usize,
        total_words: usize,
    ) -> Result<Self, ReportError> {
        if total_phonemes == 0 {
            return Err(ReportError::EmptyCorpus);
        }

        let mut duration_counts = DurationAnomalyCounts::default();
        for anomaly in &outcome.duration {
            match anomaly.category() {
                AnomalyCategory::TooShortVowel => duration_counts.too_short_vowels += 1,
                AnomalyCategory::TooLongVowel => duration_counts.too_long_vowels += 1,
                AnomalyCategory::TooShortConsonant => duration_counts.too_short_consonants += 1,
                AnomalyCategory::TooLongConsonant => duration_counts.too_long_consonants += 1,
                _ => {}
            }
        }

        let timing_counts = TimingIssueCounts {
            gaps: outcome
                .timing
                .iter()
                .filter(|a| a.category() == AnomalyCategory::TimingGap)
                .count(),
            overlaps: outcome
                .timing
                .iter()
                .filter(|a| a.category() == AnomalyCategory::TimingOverlap)
                .count(),
        };

        let total_issues = outcome.total();
        let error_rate_percent = total_issues as f64 / total_phonemes as f64 * 100.0;

        Ok(QualityReport {
            timestamp: Utc::now(),
            total_phonemes,
            total_words,
            duration_anomalies: duration_counts,
            timing_issues: timing_counts,
            statistical_outliers: outcome.outliers.len(),
            word_phoneme_mismatches: outcome.consistency.len(),
            total_issues,
            error_rate_percent,
            grade: Grade::from_error_rate(error_rate_percent),
            details: AnomalyDetails {
                duration_anomalies: outcome.duration.clone(),
                timing_issues: outcome.timing.clone(),
                statistical_outliers: outcome.outliers.clone(),
                consistency_issues: outcome.consistency.clone(),
            },
        })
    }
}

/// Phoneme duration distribution over the corpus.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DurationSummary {
    pub mean_duration: f64,
    pub std_duration: f64,
    pub min_duration: f64,
    pub max_duration: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WordDurationSummary {
    pub mean_duration: f64,
    pub std_duration: f64,
}

/// First/second formant landscape over the vowels that have formant data.
#[derive(Debug, Clone, Serialize)]
pub struct VowelFormantSummary {
    pub f1_mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f2_mean: Option<f64>,
    pub f1_range: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f2_range: Option<[f64; 2]>,
}

/// Descriptive summary of the measurement tables.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusSummary {
    pub timestamp: DateTime<Utc>,
    pub total_files: usize,
    pub total_phonemes: usize,
    pub total_words: usize,
    pub vowels_analyzed: usize,
    pub phoneme_stats: DurationSummary,
    pub word_stats: WordDurationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vowel_formants: Option<VowelFormantSummary>,
}

impl CorpusSummary {
    pub fn from_tables(
        phonemes: &[PhonemeMeasurement],
        words: &[WordMeasurement],
        total_files: usize,
    ) -> Result<Self, ReportError> {
        if phonemes.is_empty() {
            return Err(ReportError::EmptyCorpus);
        }

        let phoneme_durations: Vec<f64> = phonemes.iter().map(|p| p.duration).collect();
        let word_durations: Vec<f64> = words.iter().map(|w| w.duration).collect();

        let vowels: Vec<&PhonemeMeasurement> = phonemes.iter().filter(|p| p.is_vowel).collect();

        let f1_means: Vec<f64> = vowels
            .iter()
            .filter_map(|p| p.formants.as_ref().map(|f| f.f1.mean))
            .collect();
        let f2_means: Vec<f64> = vowels
            .iter()
            .filter_map(|p| p.formants.as_ref().and_then(|f| f.f2).map(|t| t.mean))
            .collect();

        let vowel_formants = if f1_means.is_empty() {
            None
        } else {
            Some(VowelFormantSummary {
                f1_mean: stats::mean(&f1_means),
                f2_mean: (!f2_means.is_empty()).then(|| stats::mean(&f2_means)),
                f1_range: [
                    stats::min(&f1_means).unwrap_or(0.0),
                    stats::max(&f1_means).unwrap_or(0.0),
                ],
                f2_range: (!f2_means.is_empty()).then(|| {
                    [
                        stats::min(&f2_means).unwrap_or(0.0),
                        stats::max(&f2_means).unwrap_or(0.0),
                    ]
                }),
            })
        };

        Ok(CorpusSummary {
            timestamp: Utc::now(),
            total_files,
            total_phonemes: phonemes.len(),
            total_words: words.len(),
            vowels_analyzed: vowels.len(),
            phoneme_stats: DurationSummary {
                mean_duration: stats::mean(&phoneme_durations),
                std_duration: stats::population_std(&phoneme_durations),
                min_duration: stats::min(&phoneme_durations).unwrap_or(0.0),
                max_duration: stats::max(&phoneme_durations).unwrap_or(0.0),
            },
            word_stats: WordDurationSummary {
                mean_duration: stats::mean(&word_durations),
                std_duration: stats::population_std(&word_durations),
            },
            vowel_formants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_error_rate(4.999), Grade::Excellent);
        assert_eq!(Grade::from_error_rate(5.000), Grade::Good);
        assert_eq!(Grade::from_error_rate(9.999), Grade::Good);
        assert_eq!(Grade::from_error_rate(10.000), Grade::Fair);
        assert_eq!(Grade::from_error_rate(19.999), Grade::Fair);
        assert_eq!(Grade::from_error_rate(20.000), Grade::Poor);
        assert_eq!(Grade::from_error_rate(0.0), Grade::Excellent);
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let outcome = CheckOutcome {
            duration: vec![],
            timing: vec![],
            outliers: vec![],
            consistency: vec![],
        };
        assert!(matches!(
            QualityReport::compile(&outcome, 0, 0),
            Err(ReportError::EmptyCorpus)
        ));
        assert!(matches!(
            CorpusSummary::from_tables(&[], &[], 0),
            Err(ReportError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_counts_and_error_rate() {
        let outcome = CheckOutcome {
            duration: vec![
                Anomaly::TooShortVowel {
                    file: "a".into(),
                    phoneme: "AE1".into(),
                    duration: 0.01,
                    start: 0.0,
                    end: 0.01,
                },
                Anomaly::TooLongConsonant {
                    file: "a".into(),
                    phoneme: "S".into(),
                    duration: 0.3,
                    start: 1.0,
                    end: 1.3,
                },
            ],
            timing: vec![Anomaly::TimingGap {
                file: "a".into(),
                after_phoneme: "S".into(),
                before_phoneme: "T".into(),
                gap_ms: 5.0,
                time: 1.3,
            }],
            outliers: vec![],
            consistency: vec![],
        };

        let report = QualityReport::compile(&outcome, 100, 40).unwrap();
        assert_eq!(report.duration_anomalies.too_short_vowels, 1);
        assert_eq!(report.duration_anomalies.too_long_consonants, 1);
        assert_eq!(report.timing_issues.gaps, 1);
        assert_eq!(report.timing_issues.overlaps, 0);
        assert_eq!(report.total_issues, 3);
        assert!((report.error_rate_percent - 3.0).abs() < 1e-12);
        assert_eq!(report.grade, Grade::Excellent);
    }

    #[test]
    fn test_summary_without_formants_has_no_vowel_block() {
        let phonemes = vec![PhonemeMeasurement::new("a", "AE1", 0.0, 0.1)];
        let summary = CorpusSummary::from_tables(&phonemes, &[], 1).unwrap();
        assert_eq!(summary.vowels_analyzed, 1);
        assert!(summary.vowel_formants.is_none());
    }

    #[test]
    fn test_summary_formant_ranges() {
        use crate::core::measurement::{FormantStats, TrackStats};

        let mut a = PhonemeMeasurement::new("a", "AE1", 0.0, 0.1);
        a.formants = Some(FormantStats {
            f1: TrackStats { mean: 600.0, std: 10.0 },
            f2: Some(TrackStats { mean: 1700.0, std: 20.0 }),
            f3: None,
        });
        let mut b = PhonemeMeasurement::new("a", "IY1", 0.2, 0.3);
        b.formants = Some(FormantStats {
            f1: TrackStats { mean: 300.0, std: 5.0 },
            f2: Some(TrackStats { mean: 2300.0, std: 15.0 }),
            f3: None,
        });

        let summary = CorpusSummary::from_tables(&[a, b], &[], 1).unwrap();
        let vf = summary.vowel_formants.unwrap();
        assert!((vf.f1_mean - 450.0).abs() < 1e-9);
        assert_eq!(vf.f1_range, [300.0, 600.0]);
        assert_eq!(vf.f2_range.unwrap(), [1700.0, 2300.0]);
    }
}
