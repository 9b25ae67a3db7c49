//! WAV loading.
//!
//! Corpus audio follows MFA conventions: one WAV per annotation file.
//! Multi-channel recordings are mixed down to mono before analysis.

use std::path::Path;

use super::EngineError;

/// A mono audio signal, samples normalized to [-1, 1].
#[derive(Debug, Clone)]
pub struct Signal {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

impl Signal {
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

pub fn load_wav(path: &Path) -> Result<Signal, EngineError> {
    let audio_err = |source| EngineError::Audio {
        path: path.display().to_string(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(audio_err)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()
            .map_err(audio_err)?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<_, _>>()
                .map_err(audio_err)?
        }
    };

    let samples: Vec<f64> = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    };

    Ok(Signal {
        samples,
        sample_rate: spec.sample_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let signal = Signal {
            samples: vec![0.0; 16000],
            sample_rate: 16000,
        };
        assert!((signal.duration() - 1.0).abs() < 1e-12);
    }
}
