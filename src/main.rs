use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

use lectura::batch::{self, BatchConfig};
use lectura::{Language, LanguageProcessor, ProcessorOptions};

#[derive(Parser, Debug)]
#[command(name = "lectura")]
#[command(about = "Readability, pronunciation and quality analysis for K-5 English and Spanish text")]
#[command(version)]
struct Args {
    /// Text files or glob patterns to analyse
    inputs: Vec<String>,

    /// Analyse as this language instead of detecting it (en, es, es-PR; other codes use the
    /// language-neutral formulas)
    #[arg(long, value_parser = parse_language)]
    language: Option<Language>,

    /// JSON file with processor options; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip pronunciation guides
    #[arg(long)]
    no_pronunciation: bool,

    /// Number of key vocabulary words to report
    #[arg(long)]
    max_vocabulary: Option<usize>,

    /// Files analysed concurrently
    #[arg(long, default_value_t = num_cpus::get())]
    concurrency: usize,

    /// Suppress console progress bars
    #[arg(long)]
    no_progress: bool,

    /// Abort on first unreadable file
    #[arg(long)]
    fail_fast: bool,

    /// Batch report output file path
    #[arg(long, default_value = "lectura_report.json")]
    report_out: PathBuf,

    /// Read a single text from stdin and print its full report as JSON
    #[arg(long)]
    stdin: bool,
}

/// Unknown codes degrade to `Language::Other` instead of rejecting the run
fn parse_language(code: &str) -> Result<Language, String> {
    Ok(Language::from_code(code))
}

impl Args {
    fn processor_options(&self) -> Result<ProcessorOptions> {
        let mut options = match &self.config {
            Some(path) => ProcessorOptions::from_json_file(path)?,
            None => ProcessorOptions::default(),
        };
        if self.language.is_some() {
            options.language = self.language;
        }
        if self.no_pronunciation {
            options.pronunciation_guides = false;
        }
        if let Some(max) = self.max_vocabulary {
            options.max_vocabulary = max;
        }
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logs on stderr keep stdout free for reports
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();
    info!(?args, "Parsed CLI arguments");

    let options = args.processor_options()?;
    let processor = Arc::new(LanguageProcessor::new()?);

    if args.stdin {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read stdin")?;
        let report = processor.process_with_options(&text, &options);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.inputs.is_empty() {
        bail!("No input files given (pass paths or glob patterns, or use --stdin)");
    }

    let paths = batch::expand_inputs(&args.inputs)?;
    if paths.is_empty() {
        bail!("No files matched the given inputs");
    }

    let config = BatchConfig {
        fail_fast: args.fail_fast,
        concurrency: args.concurrency,
        show_progress: !args.no_progress,
    };
    let report = batch::analyze_files(processor, paths, options, &config).await?;
    batch::write_json(&report, &args.report_out).await?;

    println!("lectura v{} - analysis complete", env!("CARGO_PKG_VERSION"));
    for stats in &report.file_stats {
        match (&stats.error, stats.language, stats.grade_level, stats.quality_score) {
            (None, Some(language), Some(grade), Some(quality)) => println!(
                "  {}: {} grade {} quality {:.2}{}",
                stats.path,
                language,
                grade,
                quality,
                if stats.is_valid == Some(true) { "" } else { " (needs revision)" }
            ),
            (Some(error), ..) => println!("  {}: failed: {}", stats.path, error),
            _ => println!("  {}: {}", stats.path, stats.status),
        }
    }
    println!(
        "Analysed {} files, {} failed; report written to {}",
        report.files_processed,
        report.files_failed,
        args.report_out.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_flag_accepts_unknown_codes() {
        let args = Args::try_parse_from(["lectura", "--language", "fr", "story.txt"]).unwrap();
        assert_eq!(args.language, Some(Language::Other));
        assert_eq!(args.processor_options().unwrap().language, Some(Language::Other));

        let args = Args::try_parse_from(["lectura", "--language", "es-PR", "story.txt"]).unwrap();
        assert_eq!(args.language, Some(Language::PuertoRicanSpanish));
    }
}
