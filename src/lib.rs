//! AlignCheckr - Measurement extraction and quality control for forced
//! alignments
//!
//! Takes a corpus of audio recordings with time-aligned TextGrid
//! annotations (as produced by a forced aligner such as MFA), extracts
//! per-phoneme and per-word acoustic measurements, and audits the alignment
//! for likely errors.
//!
//! ## Features
//!
//! - **Measurement tables**: per-phoneme duration, vowel formants (F1-F3),
//!   pitch (F0) statistics, and intensity; per-word durations
//! - **Four quality checks**: duration thresholds, timing continuity,
//!   per-symbol statistical outliers, word/phoneme consistency
//! - **Graded reports**: per-category counts, corpus error rate, and a
//!   qualitative grade with full anomaly detail lists
//! - **Batch processing**: parallel per-file extraction with deterministic
//!   corpus order; load failures skip the file, never the batch
//! - **Replaceable engine**: acoustic analysis sits behind the
//!   `AcousticCurves` trait; the built-in engine covers WAV corpora
//!
//! ## Module Structure
//!
//! - `core` - interval model, feature sampler, measurement builder, quality
//!   checks, and report aggregation
//! - `engine` - built-in acoustic analysis (pitch, intensity, formants)
//! - `config` - sampling parameters and check thresholds
//! - `output` - CSV measurement tables and JSON reports
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aligncheckr::config::AnalysisConfig;
//! use aligncheckr::core::{run_all_checks, CorpusAnalyzer, QualityReport};
//!
//! let analyzer = CorpusAnalyzer::new("corpus/wav", "corpus/aligned", AnalysisConfig::default());
//! let corpus = analyzer.analyze_corpus();
//!
//! let outcome = run_all_checks(&corpus.phonemes, &corpus.words, &analyzer.config().checks);
//! let report = QualityReport::compile(&outcome, corpus.phonemes.len(), corpus.words.len())?;
//!
//! println!("error rate: {:.2}%", report.error_rate_percent);
//! ```

// Core measurement and quality-control engine
pub mod core;

// Built-in acoustic analysis engine
pub mod engine;

// Configuration
pub mod config;

// Table and report persistence
pub mod output;

// Re-export commonly used types at crate root for convenience
pub use crate::config::{AnalysisConfig, CheckConfig, DurationThresholds, SamplerConfig};
pub use crate::core::{
    run_all_checks, Anomaly, AnomalyCategory, CheckOutcome, CorpusAnalyzer, CorpusMeasurements,
    CorpusSummary, FeatureSampler, FileError, FileMeasurements, Grade, PhonemeMeasurement,
    QualityReport, ReportError, SkippedFile, TextGrid, TierError, TierKind, WordMeasurement,
};
pub use crate::engine::{DspCurves, EngineError, Signal};
