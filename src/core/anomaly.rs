//! Anomaly records produced by the quality checks.
//!
//! Each variant carries the originating file, the label(s) involved, the
//! timing, and the numeric evidence that triggered the flag, so a reviewer
//! can jump straight to the suspect segment in an annotation editor.

use serde::Serialize;

/// Anomaly categories, for counting and report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyCategory {
    TooShortVowel,
    TooLongVowel,
    TooShortConsonant,
    TooLongConsonant,
    TimingGap,
    TimingOverlap,
    StatisticalOutlier,
    WordPhonemeMismatch,
}

/// One flagged alignment problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    TooShortVowel {
        file: String,
        phoneme: String,
        duration: f64,
        start: f64,
        end: f64,
    },
    TooLongVowel {
        file: String,
        phoneme: String,
        duration: f64,
        start: f64,
        end: f64,
    },
    TooShortConsonant {
        file: String,
        phoneme: String,
        duration: f64,
        start: f64,
        end: f64,
    },
    TooLongConsonant {
        file: String,
        phoneme: String,
        duration: f64,
        start: f64,
        end: f64,
    },
    /// Unannotated time between two consecutive phonemes.
    TimingGap {
        file: String,
        after_phoneme: String,
        before_phoneme: String,
        gap_ms: f64,
        time: f64,
    },
    /// Two consecutive phonemes overlap in time.
    TimingOverlap {
        file: String,
        first_phoneme: String,
        second_phoneme: String,
        overlap_ms: f64,
        time: f64,
    },
    /// Duration far outside the distribution of its own symbol.
    StatisticalOutlier {
        file: String,
        phoneme: String,
        duration: f64,
        mean_duration: f64,
        z_score: f64,
        time: f64,
    },
    /// A word interval containing no phoneme intervals at all.
    MissingPhonemes {
        file: String,
        word: String,
        time: f64,
    },
    /// Word duration disagrees with the sum of its phoneme durations.
    DurationMismatch {
        file: String,
        word: String,
        word_duration: f64,
        phoneme_sum: f64,
        difference_ms: f64,
        time: f64,
    },
}

impl Anomaly {
    pub fn category(&self) -> AnomalyCategory {
        match self {
            Anomaly::TooShortVowel { .. } => AnomalyCategory::TooShortVowel,
            Anomaly::TooLongVowel { .. } => AnomalyCategory::TooLongVowel,
            Anomaly::TooShortConsonant { .. } => AnomalyCategory::TooShortConsonant,
            Anomaly::TooLongConsonant { .. } => AnomalyCategory::TooLongConsonant,
            Anomaly::TimingGap { .. } => AnomalyCategory::TimingGap,
            Anomaly::TimingOverlap { .. } => AnomalyCategory::TimingOverlap,
            Anomaly::StatisticalOutlier { .. } => AnomalyCategory::StatisticalOutlier,
            Anomaly::MissingPhonemes { .. } | Anomaly::DurationMismatch { .. } => {
                AnomalyCategory::WordPhonemeMismatch
            }
        }
    }

    pub fn file(&self) -> &str {
        match self {
            Anomaly::TooShortVowel { file, .. }
            | Anomaly::TooLongVowel { file, .. }
            | Anomaly::TooShortConsonant { file, .. }
            | Anomaly::TooLongConsonant { file, .. }
            | Anomaly::TimingGap { file, .. }
            | Anomaly::TimingOverlap { file, .. }
            | Anomaly::StatisticalOutlier { file, .. }
            | Anomaly::MissingPhonemes { file, .. }
            | Anomaly::DurationMismatch { file, .. } => file,
        }
    }

    /// One-line description for terminal output.
    pub fn describe(&self) -> String {
        match self {
            Anomaly::TooShortVowel { file, phoneme, duration, start, .. }
            | Anomaly::TooLongVowel { file, phoneme, duration, start, .. }
            | Anomaly::TooShortConsonant { file, phoneme, duration, start, .. }
            | Anomaly::TooLongConsonant { file, phoneme, duration, start, .. } => format!(
                "{file}: {phoneme} = {:.1}ms at {start:.2}s",
                duration * 1000.0
            ),
            Anomaly::TimingGap { file, after_phoneme, gap_ms, time, .. } => {
                format!("{file}: {gap_ms:.1}ms gap after '{after_phoneme}' at {time:.2}s")
            }
            Anomaly::TimingOverlap { file, first_phoneme, second_phoneme, overlap_ms, time } => format!(
                "{file}: {overlap_ms:.1}ms overlap between '{first_phoneme}' and '{second_phoneme}' at {time:.2}s"
            ),
            Anomaly::StatisticalOutlier { file, phoneme, duration, mean_duration, z_score, time } => format!(
                "{file}: {phoneme} = {:.1}ms (expected ~{:.1}ms, z={z_score:.2}) at {time:.2}s",
                duration * 1000.0,
                mean_duration * 1000.0
            ),
            Anomaly::MissingPhonemes { file, word, time } => {
                format!("{file}: '{word}' has no phonemes at {time:.2}s")
            }
            Anomaly::DurationMismatch { file, word, difference_ms, time, .. } => {
                format!("{file}: '{word}' duration mismatch: {difference_ms:.1}ms difference at {time:.2}s")
            }
        }
    }
}
