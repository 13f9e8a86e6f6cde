// WHY: Analyse many files for the CLI - async reads, analysis on the blocking pool, ordered results
// The core pipeline stays synchronous; only this outer layer knows about files and the runtime

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};

use crate::config::ProcessorOptions;
use crate::language::{GradeLevel, Language};
use crate::processor::LanguageProcessor;

/// How a batch run behaves
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Abort on the first file that cannot be read instead of recording the failure
    pub fail_fast: bool,
    /// Files analysed at once
    pub concurrency: usize,
    pub show_progress: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            concurrency: num_cpus::get(),
            show_progress: false,
        }
    }
}

/// Per-file outcome; analysis fields are empty when the file failed
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileStats {
    pub path: String,
    pub chars_processed: u64,
    pub language: Option<Language>,
    pub grade_level: Option<GradeLevel>,
    pub quality_score: Option<f64>,
    pub is_valid: Option<bool>,
    pub processing_time_ms: u64,
    /// "success" or "failed"
    pub status: String,
    pub error: Option<String>,
}

impl FileStats {
    fn failed(path: &Path, error: &anyhow::Error, elapsed_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: 0,
            language: None,
            grade_level: None,
            quality_score: None,
            is_valid: None,
            processing_time_ms: elapsed_ms,
            status: "failed".to_string(),
            error: Some(format!("{error:#}")),
        }
    }
}

/// Whole-run report written by `--report-out`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// Seconds since the Unix epoch
    pub run_start: u64,
    pub total_processing_time_ms: u64,
    pub files_processed: u64,
    pub files_failed: u64,
    pub file_stats: Vec<FileStats>,
}

/// Expand CLI inputs into file paths, keeping input order and dropping duplicates
///
/// Inputs containing `*`, `?` or `[` are glob patterns (directories they match are skipped);
/// anything else is taken as a literal path and checked when read.
pub fn expand_inputs<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for input in inputs {
        let input = input.as_ref();
        if !input.contains(['*', '?', '[']) {
            if seen.insert(PathBuf::from(input)) {
                paths.push(PathBuf::from(input));
            }
            continue;
        }

        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in glob(input).with_context(|| format!("Invalid glob pattern: {input}"))? {
            match entry {
                Ok(path) if path.is_file() => matched.push(path),
                Ok(_) => {}
                // Unreadable directory entries are skipped, not fatal
                Err(e) => warn!("Skipping glob entry: {}", e),
            }
        }
        if matched.is_empty() {
            warn!("Pattern matched no files: {}", input);
        }
        matched.sort();
        for path in matched {
            if seen.insert(path.clone()) {
                paths.push(path);
            }
        }
    }

    debug!("Expanded {} inputs into {} files", inputs.len(), paths.len());
    Ok(paths)
}

/// Read a whole file as UTF-8
pub async fn read_text(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
}

/// Analyse every file with up to `config.concurrency` in flight; stats keep input order
pub async fn analyze_files(
    processor: Arc<LanguageProcessor>,
    paths: Vec<PathBuf>,
    options: ProcessorOptions,
    config: &BatchConfig,
) -> Result<BatchReport> {
    let run_start = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let start = Instant::now();
    info!("Starting analysis of {} files", paths.len());

    let progress = progress_bar(paths.len(), config.show_progress)?;
    let options = Arc::new(options);
    let fail_fast = config.fail_fast;

    let file_stats: Vec<FileStats> = stream::iter(paths)
        .map(|path| {
            let processor = Arc::clone(&processor);
            let options = Arc::clone(&options);
            let progress = progress.clone();
            async move {
                let file_start = Instant::now();
                let outcome = analyze_file(processor, &path, options).await;
                progress.inc(1);
                match outcome {
                    Ok(stats) => Ok(stats),
                    Err(e) if fail_fast => Err(e),
                    Err(e) => {
                        warn!("Failed to analyse {}: {:#}", path.display(), e);
                        let elapsed_ms = file_start.elapsed().as_millis() as u64;
                        Ok(FileStats::failed(&path, &e, elapsed_ms))
                    }
                }
            }
        })
        .buffered(config.concurrency.max(1))
        .try_collect()
        .await?;

    progress.finish_with_message("Analysis complete");

    let files_failed = file_stats.iter().filter(|s| s.error.is_some()).count() as u64;
    let report = BatchReport {
        run_start,
        total_processing_time_ms: start.elapsed().as_millis() as u64,
        files_processed: file_stats.len() as u64 - files_failed,
        files_failed,
        file_stats,
    };

    info!(
        "Analysed {} files ({} failed) in {}ms",
        report.files_processed, report.files_failed, report.total_processing_time_ms
    );
    Ok(report)
}

async fn analyze_file(
    processor: Arc<LanguageProcessor>,
    path: &Path,
    options: Arc<ProcessorOptions>,
) -> Result<FileStats> {
    let start = Instant::now();
    let text = read_text(path).await?;
    let chars_processed = text.chars().count() as u64;

    let summary = tokio::task::spawn_blocking(move || {
        processor.process_with_options(&text, &options).summary
    })
    .await
    .with_context(|| format!("Analysis task failed for {}", path.display()))?;

    Ok(FileStats {
        path: path.display().to_string(),
        chars_processed,
        language: Some(summary.language),
        grade_level: Some(summary.grade_level),
        quality_score: Some(summary.quality_score),
        is_valid: Some(summary.is_valid),
        processing_time_ms: start.elapsed().as_millis() as u64,
        status: "success".to_string(),
        error: None,
    })
}

fn progress_bar(len: usize, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("█▓▒░  "),
    );
    Ok(bar)
}

/// Write a serialisable value as pretty JSON
pub async fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    let file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
