//! Word/phoneme consistency check.
//!
//! Every word interval should be tiled by phoneme intervals. Phonemes are
//! matched by containment in the word's window, widened by the tolerance on
//! both sides; a word with no phonemes at all, or whose duration disagrees
//! with the sum of its phonemes' durations beyond the allowance, is flagged.

use crate::config::CheckConfig;
use crate::core::anomaly::Anomaly;
use crate::core::measurement::{PhonemeMeasurement, WordMeasurement};

pub fn check_word_phoneme_consistency(
    phonemes: &[PhonemeMeasurement],
    words: &[WordMeasurement],
    config: &CheckConfig,
) -> Vec<Anomaly> {
    let tol = config.containment_tolerance;
    let mut anomalies = Vec::new();

    for word in words {
        let contained: Vec<&PhonemeMeasurement> = phonemes
            .iter()
            .filter(|p| {
                p.file == word.file
                    && p.start_time >= word.start_time - tol
                    && p.end_time <= word.end_time + tol
            })
            .collect();

        if contained.is_empty() {
            anomalies.push(Anomaly::MissingPhonemes {
                file: word.file.clone(),
                word: word.word.clone(),
                time: word.start_time,
            });
            continue;
        }

        let phoneme_sum: f64 = contained.iter().map(|p| p.duration).sum();
        let difference = (word.duration - phoneme_sum).abs();

        if difference > config.word_duration_tolerance {
            anomalies.push(Anomaly::DurationMismatch {
                file: word.file.clone(),
                word: word.word.clone(),
                word_duration: word.duration,
                phoneme_sum,
                difference_ms: difference * 1000.0,
                time: word.start_time,
            });
        }
    }

    anomalies
}
