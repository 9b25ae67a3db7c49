//! Core measurement and quality-control engine.

pub mod anomaly;
pub mod builder;
pub mod checks;
pub mod measurement;
pub mod report;
pub mod sampler;
pub mod stats;
pub mod textgrid;

pub use anomaly::{Anomaly, AnomalyCategory};
pub use builder::{CorpusAnalyzer, CorpusMeasurements, FileError, FileMeasurements, SkippedFile};
pub use checks::{run_all_checks, CheckOutcome};
pub use measurement::{
    is_vowel, FormantStats, IntensityStats, PhonemeMeasurement, PitchStats, TrackStats,
    WordMeasurement,
};
pub use report::{CorpusSummary, Grade, QualityReport, ReportError};
pub use sampler::{AcousticCurves, FeatureSampler};
pub use textgrid::{resolve_tiers, Interval, ResolvedTiers, TextGrid, TextGridError, Tier, TierError, TierKind};
