//! Analysis configuration.
//!
//! Defaults reproduce the reference measurement protocol: 10ms sampling grid
//! for all three acoustic measures, 75–500 Hz voicing bounds, three formant
//! sample points, and the fixed duration-threshold policy of the quality
//! checks.

/// Acoustic sampling parameters for the feature sampler and the engine.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Grid step for pitch and intensity sampling, seconds.
    pub time_step: f64,
    /// Number of formant sample points per window (start/mid/end by default).
    pub formant_points: usize,
    /// Windows shorter than this yield no formant result, seconds.
    pub min_formant_window: f64,
    /// Ceiling of the formant search range, Hz.
    pub max_formant_hz: f64,
    /// Number of formant tracks the engine estimates.
    pub max_formants: usize,
    /// Analysis window length for formant estimation, seconds.
    pub formant_window_length: f64,
    /// Pre-emphasis onset frequency, Hz.
    pub pre_emphasis_from: f64,
    /// Voicing floor, Hz.
    pub pitch_floor: f64,
    /// Voicing ceiling, Hz.
    pub pitch_ceiling: f64,
    /// Minimum audible pitch for intensity analysis, Hz.
    pub intensity_min_pitch: f64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            time_step: 0.01,
            formant_points: 3,
            min_formant_window: 0.030,
            max_formant_hz: 5500.0,
            max_formants: 5,
            formant_window_length: 0.025,
            pre_emphasis_from: 50.0,
            pitch_floor: 75.0,
            pitch_ceiling: 500.0,
            intensity_min_pitch: 75.0,
        }
    }
}

/// Expected duration ranges per phoneme class, seconds.
#[derive(Debug, Clone)]
pub struct DurationThresholds {
    pub vowel_min: f64,
    pub vowel_max: f64,
    pub consonant_min: f64,
    pub consonant_max: f64,
}

impl Default for DurationThresholds {
    fn default() -> Self {
        Self {
            vowel_min: 0.030,
            vowel_max: 0.400,
            consonant_min: 0.020,
            consonant_max: 0.250,
        }
    }
}

/// Tolerances and thresholds for the four quality checks.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub thresholds: DurationThresholds,
    /// Adjacency tolerance for the timing-continuity check, seconds.
    pub gap_tolerance: f64,
    /// Z-score above which a duration is a statistical outlier.
    pub outlier_z_threshold: f64,
    /// Minimum occurrences of a symbol before outlier statistics apply.
    pub outlier_min_samples: usize,
    /// Containment tolerance for word/phoneme matching, seconds.
    pub containment_tolerance: f64,
    /// Allowed word-vs-phoneme-sum duration difference, seconds.
    pub word_duration_tolerance: f64,
    /// Labels treated as silence markers when `exclude_silence` is set.
    pub silence_labels: Vec<String>,
    /// When set, silence labels are exempt from the duration-threshold
    /// check. Off by default: the reference policy applies consonant
    /// thresholds to every non-vowel symbol.
    pub exclude_silence: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            thresholds: DurationThresholds::default(),
            gap_tolerance: 0.001,
            outlier_z_threshold: 3.0,
            outlier_min_samples: 3,
            containment_tolerance: 0.001,
            word_duration_tolerance: 0.010,
            silence_labels: vec!["sil".to_string(), "sp".to_string(), "spn".to_string()],
            exclude_silence: false,
        }
    }
}

impl CheckConfig {
    pub fn is_silence(&self, label: &str) -> bool {
        self.silence_labels.iter().any(|s| s == label)
    }
}

/// Top-level configuration for a corpus run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub sampler: SamplerConfig,
    pub checks: CheckConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_match_reference_protocol() {
        let t = DurationThresholds::default();
        assert_eq!(t.vowel_min, 0.030);
        assert_eq!(t.vowel_max, 0.400);
        assert_eq!(t.consonant_min, 0.020);
        assert_eq!(t.consonant_max, 0.250);
    }

    #[test]
    fn test_default_sampler_grid() {
        let s = SamplerConfig::default();
        assert_eq!(s.time_step, 0.01);
        assert_eq!(s.formant_points, 3);
        assert_eq!(s.pitch_floor, 75.0);
        assert_eq!(s.pitch_ceiling, 500.0);
    }
}
