//! Corpus measurement extraction.
//!
//! One `CorpusAnalyzer` owns the corpus paths and configuration. Per file it
//! loads audio and annotation, resolves the word/phone tiers, and produces
//! the measurement tables; across the corpus it concatenates per-file tables
//! in sorted basename order, so results are reproducible regardless of
//! directory iteration order or thread count. A file that fails to load is
//! skipped, logged, and recorded — never fatal to the batch.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::AnalysisConfig;
use crate::core::measurement::{PhonemeMeasurement, WordMeasurement};
use crate::core::sampler::{AcousticCurves, FeatureSampler};
use crate::core::textgrid::{resolve_tiers, TextGrid, TextGridError, TierError};
use crate::engine::{load_wav, DspCurves, EngineError};

/// Why one corpus item could not be measured.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Audio(#[from] EngineError),
    #[error(transparent)]
    Annotation(#[from] TextGridError),
    #[error(transparent)]
    Tier(#[from] TierError),
}

/// A corpus item that was skipped, with the reason, for the run record.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub basename: String,
    pub reason: String,
}

/// Measurement tables for one file.
#[derive(Debug, Clone)]
pub struct FileMeasurements {
    pub basename: String,
    pub phonemes: Vec<PhonemeMeasurement>,
    pub words: Vec<WordMeasurement>,
}

/// Concatenated tables for a corpus run.
#[derive(Debug, Clone, Default)]
pub struct CorpusMeasurements {
    pub phonemes: Vec<PhonemeMeasurement>,
    pub words: Vec<WordMeasurement>,
    pub files_analyzed: usize,
    pub skipped: Vec<SkippedFile>,
}

impl CorpusMeasurements {
    /// Merge per-file results, in the order given. Failures become skip
    /// records.
    pub fn collect(results: Vec<(String, Result<FileMeasurements, FileError>)>) -> Self {
        let mut corpus = CorpusMeasurements::default();
        for (basename, result) in results {
            match result {
                Ok(file) => {
                    corpus.files_analyzed += 1;
                    corpus.phonemes.extend(file.phonemes);
                    corpus.words.extend(file.words);
                }
                Err(e) => {
                    warn!("skipping {basename}: {e}");
                    corpus.skipped.push(SkippedFile {
                        basename,
                        reason: e.to_string(),
                    });
                }
            }
        }
        corpus
    }
}

pub struct CorpusAnalyzer {
    audio_dir: PathBuf,
    textgrid_dir: PathBuf,
    config: AnalysisConfig,
    sampler: FeatureSampler,
}

impl CorpusAnalyzer {
    pub fn new(audio_dir: impl Into<PathBuf>, textgrid_dir: impl Into<PathBuf>, config: AnalysisConfig) -> Self {
        let sampler = FeatureSampler::new(config.sampler.clone());
        Self {
            audio_dir: audio_dir.into(),
            textgrid_dir: textgrid_dir.into(),
            config,
            sampler,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Basenames of all `.TextGrid` files under the annotation directory,
    /// sorted for reproducible corpus order.
    pub fn discover(&self) -> Vec<String> {
        let mut basenames: Vec<String> = WalkDir::new(&self.textgrid_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(err) => {
                    warn!("discovery error under {}: {err}", self.textgrid_dir.display());
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.path()
                    .extension()
                    .map_or(false, |ext| ext.eq_ignore_ascii_case("textgrid"))
            })
            .filter_map(|e| e.path().file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        basenames.sort();
        basenames.dedup();
        basenames
    }

    fn audio_path(&self, basename: &str) -> PathBuf {
        self.audio_dir.join(format!("{basename}.wav"))
    }

    fn textgrid_path(&self, basename: &str) -> PathBuf {
        self.textgrid_dir.join(format!("{basename}.TextGrid"))
    }

    /// Measure one corpus item.
    pub fn analyze_file(&self, basename: &str) -> Result<FileMeasurements, FileError> {
        let signal = load_wav(&self.audio_path(basename))?;
        let grid = TextGrid::from_file(&self.textgrid_path(basename))?;
        let tiers = resolve_tiers(&grid)?;

        let curves = DspCurves::analyze(&signal, &self.config.sampler, basename);

        let words: Vec<WordMeasurement> = match tiers.word {
            Some(tier) => tier
                .labelled_intervals()
                .map(|iv| WordMeasurement::new(basename, iv.label.clone(), iv.start, iv.end))
                .collect(),
            None => {
                info!("{basename}: no word tier, skipping word extraction");
                Vec::new()
            }
        };

        let phonemes: Vec<PhonemeMeasurement> = match tiers.phone {
            Some(tier) => tier
                .labelled_intervals()
                .map(|iv| self.measure_phoneme(basename, &curves, &iv.label, iv.start, iv.end))
                .collect(),
            None => {
                info!("{basename}: no phone tier, skipping phoneme extraction");
                Vec::new()
            }
        };

        debug!(
            "{basename}: extracted {} words, {} phonemes",
            words.len(),
            phonemes.len()
        );

        Ok(FileMeasurements {
            basename: basename.to_string(),
            phonemes,
            words,
        })
    }

    /// One phoneme interval: vowel classification, then the acoustic
    /// measures. Formants are sampled only for vowels long enough to carry
    /// a stable resonance; pitch and intensity are sampled for every
    /// phoneme regardless of class.
    fn measure_phoneme(
        &self,
        basename: &str,
        curves: &dyn AcousticCurves,
        label: &str,
        start: f64,
        end: f64,
    ) -> PhonemeMeasurement {
        let mut p = PhonemeMeasurement::new(basename, label, start, end);

        if p.is_vowel && p.duration > self.config.sampler.min_formant_window {
            p.formants = self.sampler.formant_stats(curves, start, end);
        }
        p.pitch = self.sampler.pitch_stats(curves, start, end);
        p.intensity = self.sampler.intensity_stats(curves, start, end);

        p
    }

    /// Measure the whole corpus: discover, analyze each file in parallel,
    /// merge in sorted order.
    pub fn analyze_corpus(&self) -> CorpusMeasurements {
        let basenames = self.discover();
        info!("found {} annotation files", basenames.len());

        let results: Vec<(String, Result<FileMeasurements, FileError>)> = basenames
            .par_iter()
            .map(|basename| (basename.clone(), self.analyze_file(basename)))
            .collect();

        CorpusMeasurements::collect(results)
    }

    pub fn audio_dir(&self) -> &Path {
        &self.audio_dir
    }

    pub fn textgrid_dir(&self) -> &Path {
        &self.textgrid_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_records_failures_without_aborting() {
        let ok = FileMeasurements {
            basename: "a".into(),
            phonemes: vec![PhonemeMeasurement::new("a", "AH0", 0.0, 0.1)],
            words: vec![],
        };
        let results = vec![
            ("a".to_string(), Ok(ok)),
            (
                "b".to_string(),
                Err(FileError::Annotation(TextGridError::NotATextGrid("nope".into()))),
            ),
        ];

        let corpus = CorpusMeasurements::collect(results);
        assert_eq!(corpus.files_analyzed, 1);
        assert_eq!(corpus.phonemes.len(), 1);
        assert_eq!(corpus.skipped.len(), 1);
        assert_eq!(corpus.skipped[0].basename, "b");
    }
}
