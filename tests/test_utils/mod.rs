#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aligncheckr::core::{PhonemeMeasurement, WordMeasurement};
use uuid::Uuid;

/// Per-test scratch directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    pub root: PathBuf,
}

impl ScratchDir {
    pub fn new(prefix: &str) -> Self {
        let root = std::env::temp_dir().join(format!("aligncheckr-{prefix}-{}", Uuid::new_v4()));
        fs::create_dir_all(&root).expect("create scratch dir");
        Self { root }
    }

    pub fn subdir(&self, name: &str) -> PathBuf {
        let dir = self.root.join(name);
        fs::create_dir_all(&dir).expect("create scratch subdir");
        dir
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

/// Write a mono 16-bit WAV containing a sine tone.
pub fn write_sine_wav(path: &Path, freq: f64, sample_rate: u32, seconds: f64) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    let n = (sample_rate as f64 * seconds) as usize;
    for i in 0..n {
        let t = i as f64 / sample_rate as f64;
        let sample = (2.0 * std::f64::consts::PI * freq * t).sin() * 0.6;
        writer
            .write_sample((sample * i16::MAX as f64) as i16)
            .expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

/// Build a long-format TextGrid with a words tier and a phones tier.
/// Intervals are `(label, start, end)`; blank labels mark silence.
pub fn textgrid_long(
    xmax: f64,
    words: &[(&str, f64, f64)],
    phones: &[(&str, f64, f64)],
) -> String {
    let mut out = String::new();
    out.push_str("File type = \"ooTextFile\"\n");
    out.push_str("Object class = \"TextGrid\"\n\n");
    out.push_str("xmin = 0\n");
    out.push_str(&format!("xmax = {xmax}\n"));
    out.push_str("tiers? <exists>\n");
    out.push_str("size = 2\n");
    out.push_str("item []:\n");
    for (index, (name, intervals)) in [("words", words), ("phones", phones)].iter().enumerate() {
        out.push_str(&format!("    item [{}]:\n", index + 1));
        out.push_str("        class = \"IntervalTier\"\n");
        out.push_str(&format!("        name = \"{name}\"\n"));
        out.push_str("        xmin = 0\n");
        out.push_str(&format!("        xmax = {xmax}\n"));
        out.push_str(&format!("        intervals: size = {}\n", intervals.len()));
        for (i, (label, start, end)) in intervals.iter().enumerate() {
            out.push_str(&format!("        intervals [{}]:\n", i + 1));
            out.push_str(&format!("            xmin = {start}\n"));
            out.push_str(&format!("            xmax = {end}\n"));
            out.push_str(&format!("            text = \"{label}\"\n"));
        }
    }
    out
}

/// Build a short-format TextGrid with a single phones tier.
pub fn textgrid_short_phones(xmax: f64, phones: &[(&str, f64, f64)]) -> String {
    let mut out = String::new();
    out.push_str("File type = \"ooTextFile\"\n");
    out.push_str("Object class = \"TextGrid\"\n\n");
    out.push_str("0\n");
    out.push_str(&format!("{xmax}\n"));
    out.push_str("<exists>\n");
    out.push_str("1\n");
    out.push_str("\"IntervalTier\"\n");
    out.push_str("\"phones\"\n");
    out.push_str("0\n");
    out.push_str(&format!("{xmax}\n"));
    out.push_str(&format!("{}\n", phones.len()));
    for (label, start, end) in phones {
        out.push_str(&format!("{start}\n{end}\n\"{label}\"\n"));
    }
    out
}

/// Bare phoneme table row for check-level tests.
pub fn phoneme_row(file: &str, label: &str, start: f64, end: f64) -> PhonemeMeasurement {
    PhonemeMeasurement::new(file, label, start, end)
}

pub fn word_row(file: &str, label: &str, start: f64, end: f64) -> WordMeasurement {
    WordMeasurement::new(file, label, start, end)
}
