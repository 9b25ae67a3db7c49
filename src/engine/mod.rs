//! Built-in acoustic analysis engine.
//!
//! Computes the three per-file analysis tracks the feature sampler queries:
//! an autocorrelation pitch track, an RMS intensity track, and a Burg-LPC
//! formant track. Everything is exposed through [`AcousticCurves`], so the
//! engine is a replaceable collaborator — `core` never sees WAV samples.
//!
//! The three measures are computed independently: one failing (short
//! signal, silent channel, unstable LPC) is logged and leaves that measure
//! undefined for every window of the file, without touching the other two.

mod formant;
mod intensity;
mod pitch;
mod wav;

pub use formant::formant_tracks;
pub use intensity::intensity_track;
pub use pitch::pitch_track;
pub use wav::{load_wav, Signal};

use log::warn;
use thiserror::Error;

use crate::config::SamplerConfig;
use crate::core::sampler::AcousticCurves;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read audio {path}: {source}")]
    Audio {
        path: String,
        #[source]
        source: hound::Error,
    },
    #[error("{measure} analysis failed: {reason}")]
    Analysis { measure: &'static str, reason: String },
}

/// A sampled analysis track: frame centers on a uniform grid, each frame
/// either a value or undefined.
#[derive(Debug, Clone)]
pub struct FrameTrack {
    start: f64,
    step: f64,
    frames: Vec<Option<f64>>,
}

impl FrameTrack {
    pub fn new(start: f64, step: f64, frames: Vec<Option<f64>>) -> Self {
        Self { start, step, frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Value at an arbitrary time: linear interpolation between the two
    /// bracketing frames when both are defined, the nearer frame when only
    /// one is, `None` outside the track or between two undefined frames.
    pub fn value_at(&self, t: f64) -> Option<f64> {
        if self.frames.is_empty() {
            return None;
        }
        let pos = (t - self.start) / self.step;
        if pos < -0.5 || pos > self.frames.len() as f64 - 0.5 {
            return None;
        }
        if pos <= 0.0 {
            return self.frames[0];
        }
        let last = self.frames.len() - 1;
        if pos >= last as f64 {
            return self.frames[last];
        }

        let i = pos.floor() as usize;
        let frac = pos - i as f64;
        match (self.frames[i], self.frames[i + 1]) {
            (Some(a), Some(b)) => Some(a + (b - a) * frac),
            (Some(a), None) if frac <= 0.5 => Some(a),
            (None, Some(b)) if frac > 0.5 => Some(b),
            _ => None,
        }
    }
}

/// All analysis tracks for one file.
pub struct DspCurves {
    formants: Option<[FrameTrack; 3]>,
    pitch: Option<FrameTrack>,
    intensity: Option<FrameTrack>,
}

impl DspCurves {
    /// Run the three analyses over a signal. `context` names the file in
    /// log output.
    pub fn analyze(signal: &Signal, config: &SamplerConfig, context: &str) -> Self {
        let formants = match formant_tracks(signal, config) {
            Ok(tracks) => Some(tracks),
            Err(e) => {
                warn!("{context}: {e}");
                None
            }
        };
        let pitch = match pitch_track(signal, config) {
            Ok(track) => Some(track),
            Err(e) => {
                warn!("{context}: {e}");
                None
            }
        };
        let intensity = match intensity_track(signal, config) {
            Ok(track) => Some(track),
            Err(e) => {
                warn!("{context}: {e}");
                None
            }
        };

        Self { formants, pitch, intensity }
    }
}

impl AcousticCurves for DspCurves {
    fn formant_at(&self, track: usize, t: f64) -> Option<f64> {
        match (&self.formants, track) {
            (Some(tracks), 1..=3) => tracks[track - 1].value_at(t),
            _ => None,
        }
    }

    fn pitch_at(&self, t: f64) -> Option<f64> {
        self.pitch.as_ref().and_then(|track| track.value_at(t))
    }

    fn intensity_at(&self, t: f64) -> Option<f64> {
        self.intensity.as_ref().and_then(|track| track.value_at(t))
    }
}
