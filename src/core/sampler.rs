//! Time-windowed acoustic feature sampling.
//!
//! The sampler turns point queries against an [`AcousticCurves`]
//! implementation into per-window summary statistics. It knows nothing about
//! audio: curve construction (and curve-level failure) is the engine's
//! business. Every sampler method returns `None` when the window yields no
//! valid samples — absence of a measure is an ordinary outcome, not an
//! error.

use crate::config::SamplerConfig;
use crate::core::measurement::{FormantStats, IntensityStats, PitchStats, TrackStats};
use crate::core::stats;

/// Point queries over one file's acoustic analysis curves.
///
/// All queries answer in seconds on the file's own timeline and return
/// `None` where the underlying track is undefined (unvoiced pitch frames,
/// out-of-range times, rejected formant frames).
pub trait AcousticCurves {
    /// Formant frequency in Hz for `track` (1-based) at time `t`.
    fn formant_at(&self, track: usize, t: f64) -> Option<f64>;
    /// Fundamental frequency in Hz at time `t`; `None` when unvoiced.
    fn pitch_at(&self, t: f64) -> Option<f64>;
    /// Intensity in dB at time `t`.
    fn intensity_at(&self, t: f64) -> Option<f64>;
}

/// Summary-statistics sampler over a fixed time grid.
#[derive(Debug, Clone)]
pub struct FeatureSampler {
    config: SamplerConfig,
}

impl FeatureSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Formant summary for `[start, end]`.
    ///
    /// Windows shorter than the configured minimum are too short for
    /// reliable formant estimates and yield `None`. Sampling happens at
    /// `formant_points` evenly spaced times, endpoints included. A track
    /// with no valid samples is omitted; an empty first track discards the
    /// whole result.
    pub fn formant_stats(&self, curves: &dyn AcousticCurves, start: f64, end: f64) -> Option<FormantStats> {
        if end - start < self.config.min_formant_window {
            return None;
        }

        let times = linspace(start, end, self.config.formant_points);
        let mut tracks: [Vec<f64>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for &t in &times {
            for (idx, samples) in tracks.iter_mut().enumerate() {
                if let Some(hz) = curves.formant_at(idx + 1, t) {
                    if hz.is_finite() {
                        samples.push(hz);
                    }
                }
            }
        }

        if tracks[0].is_empty() {
            return None;
        }

        let summarize = |samples: &[f64]| TrackStats {
            mean: stats::mean(samples),
            std: stats::population_std(samples),
        };

        Some(FormantStats {
            f1: summarize(&tracks[0]),
            f2: (!tracks[1].is_empty()).then(|| summarize(&tracks[1])),
            f3: (!tracks[2].is_empty()).then(|| summarize(&tracks[2])),
        })
    }

    /// Pitch summary for `[start, end)` on the configured grid. Unvoiced
    /// samples are discarded; a fully unvoiced window yields `None`.
    pub fn pitch_stats(&self, curves: &dyn AcousticCurves, start: f64, end: f64) -> Option<PitchStats> {
        let values: Vec<f64> = grid(start, end, self.config.time_step)
            .filter_map(|t| curves.pitch_at(t))
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() {
            return None;
        }

        let min = stats::min(&values)?;
        let max = stats::max(&values)?;
        Some(PitchStats {
            mean: stats::mean(&values),
            std: stats::population_std(&values),
            min,
            max,
            range: max - min,
        })
    }

    /// Intensity summary for `[start, end)` on the configured grid.
    pub fn intensity_stats(&self, curves: &dyn AcousticCurves, start: f64, end: f64) -> Option<IntensityStats> {
        let values: Vec<f64> = grid(start, end, self.config.time_step)
            .filter_map(|t| curves.intensity_at(t))
            .filter(|v| v.is_finite())
            .collect();
        if values.is_empty() {
            return None;
        }

        Some(IntensityStats {
            mean: stats::mean(&values),
            std: stats::population_std(&values),
            min: stats::min(&values)?,
            max: stats::max(&values)?,
        })
    }
}

/// `count` evenly spaced times over `[start, end]`, endpoints included.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        n => (0..n)
            .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// End-exclusive time grid: `start`, `start + step`, ... while `< end`.
fn grid(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    (0..)
        .map(move |i| start + i as f64 * step)
        .take_while(move |&t| t < end)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scripted curves: fixed formant values, pitch voiced only inside a
    /// sub-range, intensity constant.
    struct FakeCurves {
        voiced_from: f64,
        voiced_to: f64,
        f2_defined: bool,
    }

    impl AcousticCurves for FakeCurves {
        fn formant_at(&self, track: usize, _t: f64) -> Option<f64> {
            match track {
                1 => Some(500.0),
                2 if self.f2_defined => Some(1500.0),
                3 => Some(2500.0),
                _ => None,
            }
        }

        fn pitch_at(&self, t: f64) -> Option<f64> {
            (t >= self.voiced_from && t < self.voiced_to).then(|| 100.0 + t * 10.0)
        }

        fn intensity_at(&self, _t: f64) -> Option<f64> {
            Some(65.0)
        }
    }

    fn sampler() -> FeatureSampler {
        FeatureSampler::new(SamplerConfig::default())
    }

    fn curves() -> FakeCurves {
        FakeCurves {
            voiced_from: 0.0,
            voiced_to: 10.0,
            f2_defined: true,
        }
    }

    #[test]
    fn test_short_window_has_no_formants() {
        assert!(sampler().formant_stats(&curves(), 1.0, 1.025).is_none());
    }

    #[test]
    fn test_formant_tracks_individually_optional() {
        let c = FakeCurves { f2_defined: false, ..curves() };
        let stats = sampler().formant_stats(&c, 1.0, 1.1).unwrap();
        assert_eq!(stats.f1.mean, 500.0);
        assert_eq!(stats.f1.std, 0.0);
        assert!(stats.f2.is_none());
        assert_eq!(stats.f3.unwrap().mean, 2500.0);
    }

    #[test]
    fn test_unvoiced_window_has_no_pitch() {
        let c = FakeCurves { voiced_from: 5.0, voiced_to: 6.0, f2_defined: true };
        assert!(sampler().pitch_stats(&c, 1.0, 1.2).is_none());
    }

    #[test]
    fn test_pitch_range_is_max_minus_min() {
        // Grid 1.0, 1.01, ..., 1.09: pitch runs 110.0 .. 110.9.
        let stats = sampler().pitch_stats(&curves(), 1.0, 1.1).unwrap();
        assert!((stats.min - 110.0).abs() < 1e-9);
        assert!((stats.max - 110.9).abs() < 1e-9);
        assert!((stats.range - (stats.max - stats.min)).abs() < 1e-12);
    }

    #[test]
    fn test_grid_is_end_exclusive() {
        let times: Vec<f64> = grid(0.0, 0.03, 0.01).collect();
        assert_eq!(times.len(), 3);
        assert!((times[2] - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_intensity_constant_window() {
        let stats = sampler().intensity_stats(&curves(), 0.0, 0.05).unwrap();
        assert_eq!(stats.mean, 65.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.min, stats.max);
    }

    #[test]
    fn test_linspace_endpoints() {
        let times = linspace(1.0, 2.0, 3);
        assert_eq!(times, vec![1.0, 1.5, 2.0]);
    }
}
