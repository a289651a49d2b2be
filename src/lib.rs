//! BatchResize - Batch Image Conversion and Resizing
//!
//! A command-line tool and library for batch-converting and resizing image
//! files. It walks a directory tree, classifies files by format, computes
//! aspect-ratio-preserving target sizes, and writes outputs under a target
//! directory with bounded parallelism.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use batchresize::{pipeline, ProcessingConfig};
//!
//! #[tokio::main]
//! async fn main() -> batchresize::Result<()> {
//!     let config = ProcessingConfig::default();
//!     let report = pipeline::run("./photos", false, config, None).await?;
//!
//!     println!("{} succeeded, {} failed", report.success_count(), report.failure_count());
//!     Ok(())
//! }
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod parallel;
pub mod pipeline;
pub mod processing;

// Re-export commonly used types
pub use config::{OutputFormat, ProcessingConfig};
pub use error::{BatchError, Result};
pub use parallel::{BatchReport, WorkerPool};
pub use processing::{BatchMode, ImageTask, ProcessingEngine, ProcessingResult};

use tracing::info;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging for the library with default settings
///
/// Sets a global tracing subscriber driven by `RUST_LOG`. Safe to call more
/// than once; only the first call installs a subscriber.
pub fn init() {
    if tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .finish(),
    )
    .is_ok()
    {
        info!("BatchResize v{} initialized", VERSION);
    }
}
