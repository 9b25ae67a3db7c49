//! Measurement records produced by the builder and consumed by the checks.
//!
//! A phoneme record extends its source interval with vowel classification and
//! three independent optional stat blocks. Absence of a block means the
//! sampler produced no valid samples for that measure; it is never encoded as
//! zeros.

use serde::Serialize;

/// ARPAbet vowel bases. A label is a vowel if its base (optionally followed
/// by a single stress marker 0/1/2) is in this set.
const VOWEL_BASES: [&str; 15] = [
    "AA", "AE", "AH", "AO", "AW", "AY", "EH", "ER", "EY", "IH", "IY", "OW", "OY", "UH", "UW",
];

/// Vowel-set membership, stress-marked variants included.
pub fn is_vowel(label: &str) -> bool {
    let base = match label.as_bytes().last().copied() {
        Some(b'0') | Some(b'1') | Some(b'2') => &label[..label.len() - 1],
        _ => label,
    };
    VOWEL_BASES.contains(&base)
}

/// Per-track formant summary. Std is a population std, 0.0 for a single
/// sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackStats {
    pub mean: f64,
    pub std: f64,
}

/// Formant summary over a window. Track 1 is always present (an empty first
/// track means no formant result at all); tracks 2 and 3 are individually
/// optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormantStats {
    pub f1: TrackStats,
    pub f2: Option<TrackStats>,
    pub f3: Option<TrackStats>,
}

/// Pitch (F0) summary over a window, voiced samples only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

/// Intensity summary over a window, in dB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// One phoneme interval with its acoustic measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhonemeMeasurement {
    pub file: String,
    pub phoneme: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub is_vowel: bool,
    pub formants: Option<FormantStats>,
    pub pitch: Option<PitchStats>,
    pub intensity: Option<IntensityStats>,
}

impl PhonemeMeasurement {
    pub fn new(file: impl Into<String>, phoneme: impl Into<String>, start: f64, end: f64) -> Self {
        let phoneme = phoneme.into();
        Self {
            file: file.into(),
            is_vowel: is_vowel(&phoneme),
            phoneme,
            start_time: start,
            end_time: end,
            duration: end - start,
            formants: None,
            pitch: None,
            intensity: None,
        }
    }
}

/// One word interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordMeasurement {
    pub file: String,
    pub word: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
}

impl WordMeasurement {
    pub fn new(file: impl Into<String>, word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            file: file.into(),
            word: word.into(),
            start_time: start,
            end_time: end,
            duration: end - start,
        }
    }
}
