//! Core per-file processing: decode, resize, encode
//!
//! Each worker owns exactly one task and its decoded pixel buffer; nothing
//! here is shared mutably across tasks.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::ProcessingConfig;
use crate::error::{BatchError, Result};

pub mod codec;
pub mod resize;

pub use codec::EncodeFormat;
pub use resize::compute_target_size;

/// How the batch treats output formats
///
/// The choice is global: one mode covers every file in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Re-encode every file into the configured output format
    Convert,
    /// Resize only; each output mirrors its input's container format
    Preserve,
}

/// One unit of work: a single input file plus the shared configuration
#[derive(Debug, Clone)]
pub struct ImageTask {
    pub input_path: PathBuf,
    pub config: Arc<ProcessingConfig>,
}

impl ImageTask {
    pub fn new(input_path: PathBuf, config: Arc<ProcessingConfig>) -> Self {
        Self { input_path, config }
    }
}

/// Outcome of one successfully processed task
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub original_size: (u32, u32),
    pub output_size: (u32, u32),
    pub elapsed: Duration,
}

/// Processing engine executing the decode -> resize -> encode pipeline
#[derive(Debug, Default)]
pub struct ProcessingEngine;

impl ProcessingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Process a single file according to the batch mode
    ///
    /// Decode, resampling, and encode are blocking codec calls, so the whole
    /// per-file pipeline runs on the blocking thread pool.
    pub async fn process(&self, task: ImageTask, mode: BatchMode) -> Result<ProcessingResult> {
        let start = Instant::now();
        let input_path = task.input_path.clone();

        let result = tokio::task::spawn_blocking(move || process_blocking(&task, mode))
            .await
            .map_err(|e| BatchError::pool(format!("task join error: {e}")))??;

        let elapsed = start.elapsed();
        debug!(
            "Processed {:?} -> {:?} in {:.2}s",
            input_path,
            result.output_path,
            elapsed.as_secs_f64()
        );

        Ok(ProcessingResult { elapsed, ..result })
    }
}

fn process_blocking(task: &ImageTask, mode: BatchMode) -> Result<ProcessingResult> {
    let config = &task.config;
    let input_path = task.input_path.as_path();

    let image = codec::decode(input_path)?;
    let (width, height) = (image.width(), image.height());

    let (target_width, target_height) =
        compute_target_size(width, height, config.max_width, config.max_height)?;

    let image = if (target_width, target_height) == (width, height) {
        image
    } else {
        debug!(
            "Resizing {:?}: {}x{} -> {}x{}",
            input_path, width, height, target_width, target_height
        );
        image.resize_exact(
            target_width,
            target_height,
            image::imageops::FilterType::Lanczos3,
        )
    };

    let (output_path, format) = match mode {
        BatchMode::Convert => (
            conversion_output_path(input_path, &config.output_dir, config.output_format),
            EncodeFormat::from(config.output_format),
        ),
        BatchMode::Preserve => (
            preserving_output_path(input_path, &config.output_dir),
            EncodeFormat::from_extension(input_path),
        ),
    };

    codec::encode(&image, &output_path, format, config.quality)?;

    Ok(ProcessingResult {
        input_path: input_path.to_path_buf(),
        output_path,
        original_size: (width, height),
        output_size: (target_width, target_height),
        elapsed: Duration::ZERO,
    })
}

/// Output path in conversion mode: stem plus the target format's extension
pub fn conversion_output_path(
    input_path: &Path,
    output_dir: &Path,
    format: crate::config::OutputFormat,
) -> PathBuf {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    output_dir.join(format!("{stem}.{}", format.extension()))
}

/// Output path in preserving mode: filename carried over verbatim
pub fn preserving_output_path(input_path: &Path, output_dir: &Path) -> PathBuf {
    match input_path.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.to_path_buf(),
    }
}
