//! Burg-LPC formant tracking.
//!
//! The classic pipeline: decimate to twice the formant ceiling, pre-emphasize
//! above the configured onset, window 25ms frames on the 10ms grid, fit an
//! autoregressive model with Burg's method, and read formant candidates off
//! the complex roots of the prediction polynomial. Candidates with excessive
//! bandwidth are rejected; the lowest three surviving frequencies become
//! F1–F3 for the frame.

use num_complex::Complex64;

use super::{EngineError, FrameTrack, Signal};
use crate::config::SamplerConfig;

/// Candidates wider than this are spectral tilt, not resonances.
const MAX_BANDWIDTH_HZ: f64 = 700.0;
/// Candidates below this are the pre-emphasis shelf.
const MIN_FREQUENCY_HZ: f64 = 90.0;

/// Compute the F1–F3 tracks for a signal.
pub fn formant_tracks(signal: &Signal, config: &SamplerConfig) -> Result<[FrameTrack; 3], EngineError> {
    let target_sr = 2.0 * config.max_formant_hz;
    let decimated = decimate(signal, target_sr);
    let sr = decimated.sample_rate as f64;

    let window = (config.formant_window_length * sr).round() as usize;
    let step = (config.time_step * sr).round().max(1.0) as usize;
    if decimated.samples.len() < window || window < 8 {
        return Err(EngineError::Analysis {
            measure: "formant",
            reason: format!(
                "signal of {} samples too short for a {} sample analysis window",
                decimated.samples.len(),
                window
            ),
        });
    }

    let emphasized = pre_emphasize(&decimated.samples, config.pre_emphasis_from, sr);
    let order = 2 * config.max_formants;
    let taper = hamming(window);

    let half = window / 2;
    let mut frames: Vec<[Option<f64>; 3]> = Vec::new();
    let mut start = 0;
    while start + window <= emphasized.len() {
        let mut frame: Vec<f64> = emphasized[start..start + window].to_vec();
        for (s, w) in frame.iter_mut().zip(&taper) {
            *s *= w;
        }
        frames.push(frame_formants(&frame, order, sr));
        start += step;
    }

    let track_start = half as f64 / sr;
    let step_sec = step as f64 / sr;
    Ok([0, 1, 2].map(|track| {
        FrameTrack::new(track_start, step_sec, frames.iter().map(|f| f[track]).collect())
    }))
}

/// Formant candidates for one windowed frame.
fn frame_formants(frame: &[f64], order: usize, sr: f64) -> [Option<f64>; 3] {
    let coeffs = match burg(frame, order) {
        Some(c) => c,
        None => return [None; 3],
    };

    // Roots of 1 + a1 z^-1 + ... + am z^-m, as a monic polynomial in z.
    let roots = polynomial_roots(&coeffs);

    let nyquist = sr / 2.0;
    let mut candidates: Vec<f64> = roots
        .iter()
        .filter(|r| r.im > 0.0)
        .filter_map(|r| {
            let freq = r.im.atan2(r.re) / (2.0 * std::f64::consts::PI) * sr;
            let bandwidth = -r.norm().max(1e-12).ln() / std::f64::consts::PI * sr;
            (freq > MIN_FREQUENCY_HZ && freq < nyquist - MIN_FREQUENCY_HZ && bandwidth < MAX_BANDWIDTH_HZ)
                .then_some(freq)
        })
        .collect();
    candidates.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut result = [None; 3];
    for (slot, freq) in result.iter_mut().zip(candidates) {
        *slot = Some(freq);
    }
    result
}

/// Burg's method: reflection-coefficient AR fit of the given order.
/// Returns the prediction coefficients a1..am, or None for a frame with no
/// energy or a numerically degenerate fit.
fn burg(frame: &[f64], order: usize) -> Option<Vec<f64>> {
    let n = frame.len();
    if n <= order {
        return None;
    }

    let mut f: Vec<f64> = frame.to_vec();
    let mut b: Vec<f64> = frame.to_vec();
    let mut a: Vec<f64> = Vec::with_capacity(order);
    let mut energy: f64 = frame.iter().map(|s| s * s).sum();
    if energy < 1e-14 {
        return None;
    }

    for m in 0..order {
        let mut num = 0.0;
        let mut den = 0.0;
        for i in m + 1..n {
            num += f[i] * b[i - 1];
            den += f[i] * f[i] + b[i - 1] * b[i - 1];
        }
        if den < 1e-14 {
            return None;
        }
        let k = -2.0 * num / den;

        // Update prediction coefficients: a' = a + k * reverse(a), then k.
        let prev = a.clone();
        for (j, coeff) in a.iter_mut().enumerate() {
            *coeff += k * prev[m - 1 - j];
        }
        a.push(k);

        for i in (m + 1..n).rev() {
            let fi = f[i];
            f[i] = fi + k * b[i - 1];
            b[i] = b[i - 1] + k * fi;
        }

        energy *= 1.0 - k * k;
        if energy < 1e-14 {
            break;
        }
    }

    while a.len() < order {
        a.push(0.0);
    }
    Some(a)
}

/// Durand–Kerner root finding for z^m + c0 z^(m-1) + ... + c(m-1).
fn polynomial_roots(coeffs: &[f64]) -> Vec<Complex64> {
    let m = coeffs.len();
    if m == 0 {
        return Vec::new();
    }

    let eval = |z: Complex64| -> Complex64 {
        let mut acc = Complex64::new(1.0, 0.0);
        for &c in coeffs {
            acc = acc * z + Complex64::new(c, 0.0);
        }
        acc
    };

    // Standard non-real, non-unit starting points.
    let seed = Complex64::new(0.4, 0.9);
    let mut roots: Vec<Complex64> = (0..m).map(|k| seed.powu(k as u32 + 1)).collect();

    for _ in 0..200 {
        let mut shift = 0.0f64;
        for i in 0..m {
            let mut den = Complex64::new(1.0, 0.0);
            for j in 0..m {
                if i != j {
                    den *= roots[i] - roots[j];
                }
            }
            if den.norm() < 1e-30 {
                continue;
            }
            let delta = eval(roots[i]) / den;
            roots[i] -= delta;
            shift = shift.max(delta.norm());
        }
        if shift < 1e-12 {
            break;
        }
    }

    roots
}

fn pre_emphasize(samples: &[f64], from_hz: f64, sr: f64) -> Vec<f64> {
    let alpha = (-2.0 * std::f64::consts::PI * from_hz / sr).exp();
    let mut out = Vec::with_capacity(samples.len());
    let mut prev = 0.0;
    for &s in samples {
        out.push(s - alpha * prev);
        prev = s;
    }
    out
}

fn hamming(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

/// Decimate to the target rate: moving-average anti-alias, then linear
/// resampling. A signal already at or below the target passes through.
fn decimate(signal: &Signal, target_sr: f64) -> Signal {
    let sr = signal.sample_rate as f64;
    if sr <= target_sr {
        return signal.clone();
    }

    let ratio = sr / target_sr;
    let smooth = ratio.round() as usize;
    let smoothed: Vec<f64> = if smooth > 1 {
        signal
            .samples
            .windows(smooth)
            .map(|w| w.iter().sum::<f64>() / smooth as f64)
            .collect()
    } else {
        signal.samples.clone()
    };

    let out_len = (smoothed.len() as f64 / ratio).floor() as usize;
    let samples: Vec<f64> = (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = pos.floor() as usize;
            let frac = pos - idx as f64;
            if idx + 1 < smoothed.len() {
                smoothed[idx] * (1.0 - frac) + smoothed[idx + 1] * frac
            } else {
                smoothed[idx]
            }
        })
        .collect();

    Signal {
        samples,
        sample_rate: target_sr.round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burg_recovers_single_resonance() {
        // A damped oscillation is an AR(2) process; Burg should place a
        // root pair near the oscillation frequency.
        let sr = 11000.0;
        let freq = 700.0;
        let decay: f64 = 0.995;
        let n = 275;
        let frame: Vec<f64> = (0..n)
            .map(|i| {
                decay.powi(i as i32) * (2.0 * std::f64::consts::PI * freq * i as f64 / sr).sin()
            })
            .collect();

        let formants = frame_formants(&frame, 2, sr);
        let f1 = formants[0].expect("resonance should be found");
        assert!((f1 - freq).abs() < 50.0, "got {f1}");
    }

    #[test]
    fn test_silent_frame_has_no_formants() {
        assert_eq!(frame_formants(&vec![0.0; 256], 10, 11000.0), [None; 3]);
    }

    #[test]
    fn test_polynomial_roots_quadratic() {
        // z^2 - 3z + 2 = (z - 1)(z - 2)
        let mut roots = polynomial_roots(&[-3.0, 2.0]);
        roots.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap());
        assert!((roots[0] - Complex64::new(1.0, 0.0)).norm() < 1e-6);
        assert!((roots[1] - Complex64::new(2.0, 0.0)).norm() < 1e-6);
    }

    #[test]
    fn test_decimate_halves_rate() {
        let signal = Signal {
            samples: (0..22000).map(|i| (i as f64 * 0.01).sin()).collect(),
            sample_rate: 22000,
        };
        let out = decimate(&signal, 11000.0);
        assert_eq!(out.sample_rate, 11000);
        assert!((out.samples.len() as i64 - 11000).unsigned_abs() < 16);
    }
}
