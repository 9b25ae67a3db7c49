//! RMS intensity tracking.
//!
//! Frames on the configured grid; the analysis window spans 3.2 periods of
//! the minimum audible pitch, the same relation the reference intensity
//! analysis uses. Values are dB SPL treating sample amplitude as Pascals
//! against the 20 µPa auditory reference.

use super::{EngineError, FrameTrack, Signal};
use crate::config::SamplerConfig;

const AUDITORY_REFERENCE_PA: f64 = 2e-5;

pub fn intensity_track(signal: &Signal, config: &SamplerConfig) -> Result<FrameTrack, EngineError> {
    let sr = signal.sample_rate as f64;
    let window = ((3.2 / config.intensity_min_pitch) * sr).round() as usize;
    let step = (config.time_step * sr).round().max(1.0) as usize;

    if signal.samples.len() < window {
        return Err(EngineError::Analysis {
            measure: "intensity",
            reason: format!(
                "signal of {} samples shorter than the {} sample analysis window",
                signal.samples.len(),
                window
            ),
        });
    }

    let half = window / 2;
    let mut frames = Vec::new();
    let mut start = 0;
    while start + window <= signal.samples.len() {
        let frame = &signal.samples[start..start + window];
        let mean_square = frame.iter().map(|s| s * s).sum::<f64>() / frame.len() as f64;
        frames.push(if mean_square > 0.0 {
            Some(10.0 * (mean_square / (AUDITORY_REFERENCE_PA * AUDITORY_REFERENCE_PA)).log10())
        } else {
            // Digital silence has no defined level.
            None
        });
        start += step;
    }

    Ok(FrameTrack::new(half as f64 / sr, step as f64 / sr, frames))
}
