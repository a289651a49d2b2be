//! BatchResize CLI - Batch Image Conversion and Resizing
//!
//! Command-line front end for the batch pipeline: flag parsing, validation,
//! progress display, and the final summary live here; the processing core
//! stays presentation-free.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use batchresize::{init, pipeline, OutputFormat, ProcessingConfig};

/// BatchResize - Batch Image Conversion and Resizing
#[derive(Parser)]
#[command(
    name = "batchresize",
    version,
    about = "Batch image format conversion and resize tool",
    long_about = "Supports batch conversion of JPG/PNG/BMP/TIFF (and HEIC with the heif \
                  feature) into JPG or PNG, resizing each image to fit within a maximum \
                  resolution while maintaining its aspect ratio."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start batch processing images
    Process {
        /// Input directory path
        #[arg(short, long, value_name = "PATH", default_value = ".")]
        input: PathBuf,

        /// Output directory path
        #[arg(short, long, value_name = "PATH", default_value = "./output")]
        output: PathBuf,

        /// Output format used when the batch requires conversion
        #[arg(short, long, value_enum, default_value = "jpg")]
        format: CliOutputFormat,

        /// Maximum width in pixels
        #[arg(short = 'W', long, value_name = "PIXELS", default_value_t = 1920)]
        width: u32,

        /// Maximum height in pixels
        #[arg(short = 'H', long, value_name = "PIXELS", default_value_t = 1920)]
        height: u32,

        /// Output quality (1-100)
        #[arg(short, long, value_name = "QUALITY", default_value_t = 85)]
        quality: u8,

        /// Recursively process subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Number of concurrent workers
        #[arg(short, long, value_name = "COUNT", default_value_t = 4)]
        workers: usize,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,

        /// Quiet mode (errors only, no progress bar)
        #[arg(short = 'Q', long, conflicts_with = "verbose")]
        quiet: bool,
    },
}

/// CLI-facing output format values
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliOutputFormat {
    Jpg,
    Png,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Jpg => OutputFormat::Jpeg,
            CliOutputFormat::Png => OutputFormat::Png,
        }
    }
}

/// Machine-readable run summary for `--json`
#[derive(Debug, Serialize)]
struct JsonSummary {
    processed: usize,
    succeeded: usize,
    failed: usize,
    duration_secs: f64,
    failures: Vec<JsonFailure>,
}

#[derive(Debug, Serialize)]
struct JsonFailure {
    input: PathBuf,
    error: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let Commands::Process {
        input,
        output,
        format,
        width,
        height,
        quality,
        recursive,
        workers,
        json,
        verbose,
        quiet,
    } = cli.command;

    let log_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", log_level);
    }
    init();

    let config = ProcessingConfig {
        output_format: format.into(),
        max_width: width,
        max_height: height,
        quality,
        output_dir: output,
        workers,
    };

    if let Err(e) = config.validate() {
        eprintln!("{}: {}", style("Input validation failed").red().bold(), e);
        process::exit(1);
    }

    let progress = if quiet || json {
        None
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}, {eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let report = match pipeline::run(&input, recursive, config, progress.clone()).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}: {}", style("Error").red().bold(), e);
            process::exit(1);
        }
    };

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if json {
        print_json_summary(&report);
    } else {
        print_summary(&report, quiet);
    }

    // Per-file failures are reported, not fatal
    process::exit(0);
}

fn print_summary(report: &batchresize::BatchReport, quiet: bool) {
    if quiet {
        return;
    }

    println!();
    println!("{}", style("Processing Summary:").bold());
    println!(
        "  {}: {}",
        style("Processed").green(),
        report.success_count()
    );
    if report.failure_count() > 0 {
        println!("  {}: {}", style("Failed").red(), report.failure_count());
        for failure in &report.failed {
            println!("    {}: {}", failure.input_path.display(), failure.error);
        }
    }
    println!(
        "  {}: {:.2}s",
        style("Duration").blue(),
        report.duration.as_secs_f64()
    );

    if report.total() > 0 {
        println!("{}", style("All images processed!").bold());
    }
}

fn print_json_summary(report: &batchresize::BatchReport) {
    let summary = JsonSummary {
        processed: report.total(),
        succeeded: report.success_count(),
        failed: report.failure_count(),
        duration_secs: report.duration.as_secs_f64(),
        failures: report
            .failed
            .iter()
            .map(|f| JsonFailure {
                input: f.input_path.clone(),
                error: f.error.to_string(),
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(body) => println!("{body}"),
        Err(e) => eprintln!("{}: failed to encode summary: {}", style("Error").red(), e),
    }
}
