// src/main.rs
use anyhow::{bail, Context, Result};
use clap::Parser;
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;

use aligncheckr::config::AnalysisConfig;
use aligncheckr::core::{
    run_all_checks, Anomaly, CorpusAnalyzer, CorpusMeasurements, CorpusSummary, Grade,
    QualityReport,
};
use aligncheckr::output;

/// Detail records printed per category before eliding the rest.
const DISPLAY_CAP: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "aligncheckr")]
#[command(about = "Extract acoustic measurements and audit forced-alignment quality")]
struct Args {
    /// Directory containing WAV files
    #[arg(short, long)]
    audio: PathBuf,

    /// Directory containing TextGrid annotations
    #[arg(short, long)]
    textgrid: PathBuf,

    /// Output directory for tables and reports
    #[arg(short, long, default_value = "alignment_analysis")]
    output: PathBuf,

    /// Worker threads for file extraction (0 = one per core)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Exclude silence markers (sil/sp/spn) from the duration check
    #[arg(long)]
    exclude_silence: bool,

    /// Print the quality report as JSON
    #[arg(long)]
    json: bool,

    /// Print full anomaly lists instead of the first few per category
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.textgrid.is_dir() {
        bail!("annotation directory not found: {}", args.textgrid.display());
    }
    if !args.audio.is_dir() {
        bail!("audio directory not found: {}", args.audio.display());
    }
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()
            .context("configuring worker threads")?;
    }

    let mut config = AnalysisConfig::default();
    config.checks.exclude_silence = args.exclude_silence;

    let analyzer = CorpusAnalyzer::new(&args.audio, &args.textgrid, config);
    let basenames = analyzer.discover();
    if basenames.is_empty() {
        bail!("no TextGrid files found under {}", args.textgrid.display());
    }

    println!("Found {} annotation file(s)\n", basenames.len());

    let pb = ProgressBar::new(basenames.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let results: Vec<_> = basenames
        .par_iter()
        .progress_with(pb)
        .map(|basename| (basename.clone(), analyzer.analyze_file(basename)))
        .collect();
    let corpus = CorpusMeasurements::collect(results);

    for skipped in &corpus.skipped {
        println!(
            "{} {}: {}",
            "skipped".yellow(),
            skipped.basename.clone().cyan(),
            skipped.reason
        );
    }

    if corpus.phonemes.is_empty() {
        bail!("no data extracted - check that audio and annotation basenames match");
    }

    println!(
        "Extracted {} phonemes and {} words from {} file(s)\n",
        corpus.phonemes.len(),
        corpus.words.len(),
        corpus.files_analyzed
    );

    let phoneme_csv = args.output.join("phoneme_measurements.csv");
    let word_csv = args.output.join("word_measurements.csv");
    output::write_phoneme_table(&phoneme_csv, &corpus.phonemes)?;
    output::write_word_table(&word_csv, &corpus.words)?;

    let summary = CorpusSummary::from_tables(&corpus.phonemes, &corpus.words, corpus.files_analyzed)?;
    output::write_json(&args.output.join("analysis_summary.json"), &summary)?;

    let outcome = run_all_checks(&corpus.phonemes, &corpus.words, &analyzer.config().checks);
    let report = QualityReport::compile(&outcome, corpus.phonemes.len(), corpus.words.len())?;
    output::write_json(&args.output.join("quality_report.json"), &report)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&summary);
        print_report(&report, args.verbose);
    }

    println!("\nResults written to {}", args.output.display());
    Ok(())
}

fn print_summary(summary: &CorpusSummary) {
    println!("Corpus summary:");
    println!("  Files: {}", summary.total_files);
    println!("  Phonemes: {}", summary.total_phonemes);
    println!("  Words: {}", summary.total_words);
    println!("  Vowels analyzed: {}", summary.vowels_analyzed);
    println!(
        "  Mean phoneme duration: {:.4}s",
        summary.phoneme_stats.mean_duration
    );
    println!("  Mean word duration: {:.4}s", summary.word_stats.mean_duration);
    if let Some(vf) = &summary.vowel_formants {
        println!("  Vowel F1 mean: {:.1} Hz", vf.f1_mean);
        if let Some(f2) = vf.f2_mean {
            println!("  Vowel F2 mean: {:.1} Hz", f2);
        }
    }
    println!();
}

fn print_report(report: &QualityReport, verbose: bool) {
    println!("Quality report:");
    println!(
        "  Duration anomalies: {} (short vowels {}, long vowels {}, short consonants {}, long consonants {})",
        report.duration_anomalies.total(),
        report.duration_anomalies.too_short_vowels,
        report.duration_anomalies.too_long_vowels,
        report.duration_anomalies.too_short_consonants,
        report.duration_anomalies.too_long_consonants,
    );
    println!(
        "  Timing issues: {} gaps, {} overlaps (gaps at silence boundaries are expected)",
        report.timing_issues.gaps, report.timing_issues.overlaps
    );
    println!("  Statistical outliers: {}", report.statistical_outliers);
    println!("  Word-phoneme mismatches: {}", report.word_phoneme_mismatches);
    println!("  Total issues: {}", report.total_issues);
    println!("  Error rate: {:.2}%", report.error_rate_percent);

    let grade_line = report.grade.description().to_string();
    let colored = match report.grade {
        Grade::Excellent | Grade::Good => grade_line.green(),
        Grade::Fair => grade_line.yellow(),
        Grade::Poor => grade_line.red(),
    };
    println!("  {}", colored);

    print_details("Duration anomalies", &report.details.duration_anomalies, verbose);
    print_details("Timing issues", &report.details.timing_issues, verbose);
    print_details("Statistical outliers", &report.details.statistical_outliers, verbose);
    print_details("Word-phoneme mismatches", &report.details.consistency_issues, verbose);
}

fn print_details(title: &str, anomalies: &[Anomaly], verbose: bool) {
    if anomalies.is_empty() {
        return;
    }
    println!("\n  {title}:");
    let cap = if verbose { anomalies.len() } else { DISPLAY_CAP };
    for anomaly in anomalies.iter().take(cap) {
        println!("    - {}", anomaly.describe());
    }
    if anomalies.len() > cap {
        println!("    ... and {} more", anomalies.len() - cap);
    }
}
