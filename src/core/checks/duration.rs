//! Duration-threshold check.
//!
//! Vowels and consonants each have a fixed plausible duration range; any
//! phoneme outside its class's range is flagged. Non-vowel symbols, silence
//! markers included, take the consonant range unless the configuration
//! excludes silence labels explicitly.

use crate::config::CheckConfig;
use crate::core::anomaly::Anomaly;
use crate::core::measurement::PhonemeMeasurement;

pub fn check_durations(phonemes: &[PhonemeMeasurement], config: &CheckConfig) -> Vec<Anomaly> {
    let t = &config.thresholds;
    let mut anomalies = Vec::new();

    for p in phonemes {
        if config.exclude_silence && !p.is_vowel && config.is_silence(&p.phoneme) {
            continue;
        }

        let flagged = if p.is_vowel {
            if p.duration < t.vowel_min {
                Some(Anomaly::TooShortVowel {
                    file: p.file.clone(),
                    phoneme: p.phoneme.clone(),
                    duration: p.duration,
                    start: p.start_time,
                    end: p.end_time,
                })
            } else if p.duration > t.vowel_max {
                Some(Anomaly::TooLongVowel {
                    file: p.file.clone(),
                    phoneme: p.phoneme.clone(),
                    duration: p.duration,
                    start: p.start_time,
                    end: p.end_time,
                })
            } else {
                None
            }
        } else if p.duration < t.consonant_min {
            Some(Anomaly::TooShortConsonant {
                file: p.file.clone(),
                phoneme: p.phoneme.clone(),
                duration: p.duration,
                start: p.start_time,
                end: p.end_time,
            })
        } else if p.duration > t.consonant_max {
            Some(Anomaly::TooLongConsonant {
                file: p.file.clone(),
                phoneme: p.phoneme.clone(),
                duration: p.duration,
                start: p.start_time,
                end: p.end_time,
            })
        } else {
            None
        };

        anomalies.extend(flagged);
    }

    anomalies
}
