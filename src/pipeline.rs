//! Pipeline orchestration: discovery, mode selection, dispatch
//!
//! Wires the classifier, the worker pool, and the processing engine together
//! for one batch run and returns the aggregate report.

use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::config::ProcessingConfig;
use crate::discovery::{self, FileSet};
use crate::error::Result;
use crate::parallel::{BatchReport, WorkerPool};
use crate::processing::{BatchMode, ImageTask, ProcessingEngine};

/// Decide the batch mode from the classified file set
///
/// Any HEIC/HEIF file forces the whole batch through conversion mode so that
/// output naming stays uniform across a mixed set. With no HEIC files every
/// file keeps its original container format and only gets resized.
pub fn select_mode(files: &FileSet) -> BatchMode {
    if files.heic_like.is_empty() {
        BatchMode::Preserve
    } else {
        BatchMode::Convert
    }
}

/// Run a full batch: discover, classify, and process every image file
///
/// Fatal errors (invalid configuration, missing input directory) abort before
/// any task is dispatched. Per-file failures are collected in the report and
/// never stop sibling tasks. An optional progress bar is advanced once per
/// finished task.
pub async fn run<P: AsRef<Path>>(
    input_dir: P,
    recursive: bool,
    config: ProcessingConfig,
    progress: Option<ProgressBar>,
) -> Result<BatchReport> {
    config.validate()?;

    if config.workers > num_cpus::get() * 2 {
        warn!(
            "Worker count {} is well above the {} logical CPUs",
            config.workers,
            num_cpus::get()
        );
    }

    let files = discovery::discover(input_dir.as_ref(), recursive)?;
    if files.is_empty() {
        info!("No image files found");
        return Ok(BatchReport::default());
    }

    let file_set = discovery::classify(files);
    let mode = select_mode(&file_set);

    info!(
        "Found {} image files ({} HEIC, {} regular)",
        file_set.len(),
        file_set.heic_like.len(),
        file_set.regular.len()
    );
    match mode {
        BatchMode::Convert => {
            info!("HEIC files present, converting the whole batch to the configured format");
        }
        BatchMode::Preserve => {
            info!("No HEIC files, resizing in place and keeping original formats");
        }
    }

    // One idempotent creation before any worker writes into the directory
    tokio::fs::create_dir_all(&config.output_dir).await?;

    if let Some(pb) = &progress {
        pb.set_length(file_set.len() as u64);
    }

    let pool = WorkerPool::new(config.workers)?;
    let config = Arc::new(config);
    let tasks: Vec<ImageTask> = file_set
        .all()
        .into_iter()
        .map(|path| ImageTask::new(path, Arc::clone(&config)))
        .collect();

    let engine = Arc::new(ProcessingEngine::new());
    let report = pool
        .run(tasks, move |task| {
            let engine = Arc::clone(&engine);
            let progress = progress.clone();
            async move {
                let input_path = task.input_path.clone();
                let result = engine.process(task, mode).await;

                match &result {
                    Ok(done) => info!(
                        "Processing completed: {:?} -> {:?}",
                        input_path.file_name().unwrap_or_default(),
                        done.output_path
                    ),
                    Err(error) => warn!("Processing failed {:?}: {error}", input_path),
                }

                if let Some(pb) = &progress {
                    pb.inc(1);
                }

                result
            }
        })
        .await;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mode_selection_mixed_batch() {
        let mut paths: Vec<PathBuf> = (0..9).map(|i| PathBuf::from(format!("p{i}.jpg"))).collect();
        paths.push(PathBuf::from("one.heic"));

        let set = discovery::classify(paths);
        assert_eq!(select_mode(&set), BatchMode::Convert);
    }

    #[test]
    fn test_mode_selection_no_heic() {
        let set = discovery::classify(vec![
            PathBuf::from("a.jpg"),
            PathBuf::from("b.png"),
            PathBuf::from("c.tiff"),
        ]);
        assert_eq!(select_mode(&set), BatchMode::Preserve);
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_discovery() {
        let config = ProcessingConfig {
            workers: 0,
            ..ProcessingConfig::default()
        };

        // Bad config must win over the equally-bad input path
        let result = run("/no/such/dir", false, config, None).await;
        assert!(matches!(
            result,
            Err(crate::error::BatchError::Config { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_input_dir_is_fatal() {
        let result = run("/no/such/dir", false, ProcessingConfig::default(), None).await;
        assert!(matches!(
            result,
            Err(crate::error::BatchError::InputDirNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_input_dir_yields_empty_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let report = run(dir.path(), false, ProcessingConfig::default(), None)
            .await
            .unwrap();
        assert_eq!(report.total(), 0);
    }
}
