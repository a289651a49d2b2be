//! Bounded worker pool for batch task execution
//!
//! At most `workers` tasks are in flight at any instant, enforced by a
//! semaphore. A permit is held for the full duration of a task's work and
//! released by RAII drop, so release is unconditional even when the task
//! fails. `run` joins every spawned task before returning, which gives the
//! end-of-batch barrier: no task outlives the call.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::error::{BatchError, Result};
use crate::processing::{ImageTask, ProcessingResult};

/// Fixed-size worker pool executing image tasks with bounded concurrency
#[derive(Debug)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    capacity: usize,
}

/// A single task that reached the `Failed` terminal state
#[derive(Debug)]
pub struct TaskFailure {
    pub input_path: PathBuf,
    pub error: BatchError,
}

/// Aggregate outcome of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<ProcessingResult>,
    pub failed: Vec<TaskFailure>,
    pub duration: Duration,
}

impl BatchReport {
    /// Number of tasks that reached the `Succeeded` terminal state
    pub fn success_count(&self) -> usize {
        self.succeeded.len()
    }

    /// Number of tasks that reached the `Failed` terminal state
    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// Total number of tasks executed
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

impl WorkerPool {
    /// Create a pool with the given concurrency bound
    ///
    /// A zero worker count is rejected; the pool imposes no upper bound of
    /// its own.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(BatchError::config("worker count must be positive, got: 0"));
        }

        debug!("Initializing worker pool with {} slots", workers);

        Ok(Self {
            permits: Arc::new(Semaphore::new(workers)),
            capacity: workers,
        })
    }

    /// Concurrency bound of this pool
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Execute all tasks, at most `capacity` concurrently, and wait for every
    /// one to finish
    ///
    /// Per-task failures are collected into the report instead of aborting
    /// the batch; there are no retries. A panicking task surfaces as a
    /// `Failed` entry rather than poisoning the pool.
    pub async fn run<F, Fut>(&self, tasks: Vec<ImageTask>, task_fn: F) -> BatchReport
    where
        F: Fn(ImageTask) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ProcessingResult>> + Send + 'static,
    {
        let started = Instant::now();
        let total = tasks.len();
        let task_fn = Arc::new(task_fn);

        info!("Dispatching {} tasks across {} workers", total, self.capacity);

        let mut handles = Vec::with_capacity(total);
        for task in tasks {
            let permits = Arc::clone(&self.permits);
            let task_fn = Arc::clone(&task_fn);
            let input_path = task.input_path.clone();

            let handle = tokio::spawn(async move {
                // Slot acquisition blocks until the pool has capacity. The
                // permit drops when this future ends, success or failure.
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return Err(BatchError::pool("worker pool semaphore closed")),
                };

                task_fn(task).await
            });

            handles.push((input_path, handle));
        }

        // End-of-batch barrier: every spawned task is joined here
        let (inputs, handles): (Vec<_>, Vec<_>) = handles.into_iter().unzip();
        let joined = futures::future::join_all(handles).await;

        let mut report = BatchReport::default();
        for (input_path, outcome) in inputs.into_iter().zip(joined) {
            match outcome {
                Ok(Ok(result)) => report.succeeded.push(result),
                Ok(Err(error)) => report.failed.push(TaskFailure { input_path, error }),
                Err(join_error) => report.failed.push(TaskFailure {
                    input_path,
                    error: BatchError::pool(format!("task panicked: {join_error}")),
                }),
            }
        }

        report.duration = started.elapsed();
        info!(
            "Batch finished: {} succeeded, {} failed in {:.2}s",
            report.success_count(),
            report.failure_count(),
            report.duration.as_secs_f64()
        );

        report
    }
}
