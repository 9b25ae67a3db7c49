//! Autocorrelation pitch tracking.
//!
//! Frames on the configured grid, analysis window of three floor-frequency
//! periods (40ms at the default 75 Hz floor). Candidate lags span the
//! floor/ceiling voicing bounds; a frame is voiced when the best normalized
//! autocorrelation peak clears the voicing threshold. Parabolic
//! interpolation around the winning lag refines the frequency.

use super::{EngineError, FrameTrack, Signal};
use crate::config::SamplerConfig;

/// Minimum normalized autocorrelation for a frame to count as voiced.
const VOICING_THRESHOLD: f64 = 0.3;

pub fn pitch_track(signal: &Signal, config: &SamplerConfig) -> Result<FrameTrack, EngineError> {
    let sr = signal.sample_rate as f64;
    let window = ((3.0 / config.pitch_floor) * sr).round() as usize;
    let step = (config.time_step * sr).round().max(1.0) as usize;

    if signal.samples.len() < window {
        return Err(EngineError::Analysis {
            measure: "pitch",
            reason: format!(
                "signal of {} samples shorter than the {} sample analysis window",
                signal.samples.len(),
                window
            ),
        });
    }

    let min_lag = ((sr / config.pitch_ceiling).floor() as usize).max(2);
    let max_lag = ((sr / config.pitch_floor).ceil() as usize).min(window - 1);
    if min_lag >= max_lag {
        return Err(EngineError::Analysis {
            measure: "pitch",
            reason: format!(
                "voicing bounds {}-{} Hz leave no candidate lags at {} Hz sampling",
                config.pitch_floor, config.pitch_ceiling, signal.sample_rate
            ),
        });
    }

    let half = window / 2;
    let mut frames = Vec::new();
    let mut start = 0;
    while start + window <= signal.samples.len() {
        let frame = &signal.samples[start..start + window];
        frames.push(estimate_f0(frame, min_lag, max_lag, sr));
        start += step;
    }

    Ok(FrameTrack::new(half as f64 / sr, step as f64 / sr, frames))
}

fn estimate_f0(frame: &[f64], min_lag: usize, max_lag: usize, sr: f64) -> Option<f64> {
    let n = frame.len();
    let mean = frame.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = frame.iter().map(|s| s - mean).collect();

    let energy: f64 = centered.iter().map(|s| s * s).sum();
    if energy < 1e-10 {
        return None;
    }

    let corr = |lag: usize| -> f64 {
        centered[..n - lag]
            .iter()
            .zip(&centered[lag..])
            .map(|(a, b)| a * b)
            .sum::<f64>()
            / energy
    };

    let mut best_lag = 0;
    let mut best_value = VOICING_THRESHOLD;
    for lag in min_lag..=max_lag {
        let r = corr(lag);
        if r > best_value {
            best_value = r;
            best_lag = lag;
        }
    }
    if best_lag == 0 {
        return None;
    }

    // Parabolic refinement of the peak lag.
    let refined = if best_lag > min_lag && best_lag < max_lag {
        let before = corr(best_lag - 1);
        let after = corr(best_lag + 1);
        let denom = before - 2.0 * best_value + after;
        if denom.abs() > 1e-12 {
            best_lag as f64 + 0.5 * (before - after) / denom
        } else {
            best_lag as f64
        }
    } else {
        best_lag as f64
    };

    Some(sr / refined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, sr: u32, seconds: f64) -> Signal {
        let n = (sr as f64 * seconds) as usize;
        Signal {
            samples: (0..n)
                .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / sr as f64).sin())
                .collect(),
            sample_rate: sr,
        }
    }

    #[test]
    fn test_pure_tone_tracked() {
        // 200 Hz at 16 kHz: lag of exactly 80 samples.
        let signal = sine(200.0, 16000, 0.5);
        let track = pitch_track(&signal, &SamplerConfig::default()).unwrap();
        let f0 = track.value_at(0.25).unwrap();
        assert!((f0 - 200.0).abs() < 5.0, "got {f0}");
    }

    #[test]
    fn test_silence_is_unvoiced() {
        let signal = Signal {
            samples: vec![0.0; 16000],
            sample_rate: 16000,
        };
        let track = pitch_track(&signal, &SamplerConfig::default()).unwrap();
        assert_eq!(track.value_at(0.5), None);
    }

    #[test]
    fn test_short_signal_is_an_error() {
        let signal = Signal {
            samples: vec![0.0; 100],
            sample_rate: 16000,
        };
        assert!(pitch_track(&signal, &SamplerConfig::default()).is_err());
    }
}
