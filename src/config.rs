//! Processing configuration for BatchResize
//!
//! The configuration is an immutable value constructed once, validated before
//! any work starts, and shared by reference (`Arc`) with every worker. There
//! is no process-wide mutable state.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{BatchError, Result};

/// Default maximum width in pixels
pub const DEFAULT_MAX_WIDTH: u32 = 1920;
/// Default maximum height in pixels
pub const DEFAULT_MAX_HEIGHT: u32 = 1920;
/// Default JPEG quality
pub const DEFAULT_QUALITY: u8 = 85;
/// Default worker count
pub const DEFAULT_WORKERS: usize = 4;

/// Output format for conversion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Get the file extension used for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Immutable configuration for one batch run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingConfig {
    /// Target format when the batch runs in conversion mode
    pub output_format: OutputFormat,

    /// Maximum output width in pixels
    pub max_width: u32,

    /// Maximum output height in pixels
    pub max_height: u32,

    /// Encoding quality (1-100, applied to lossy formats)
    pub quality: u8,

    /// Directory where output files are written
    pub output_dir: PathBuf,

    /// Number of files processed concurrently
    pub workers: usize,
}

impl ProcessingConfig {
    /// Validate the configuration, failing fast before any work starts
    pub fn validate(&self) -> Result<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(BatchError::config(format!(
                "quality must be between 1 and 100, got: {}",
                self.quality
            )));
        }

        if self.max_width == 0 || self.max_height == 0 {
            return Err(BatchError::config(format!(
                "maximum dimensions must be positive, got: {}x{}",
                self.max_width, self.max_height
            )));
        }

        if self.workers == 0 {
            return Err(BatchError::config("worker count must be positive, got: 0"));
        }

        Ok(())
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::Jpeg,
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
            output_dir: PathBuf::from("./output"),
            workers: DEFAULT_WORKERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ProcessingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quality, 85);
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_quality_bounds() {
        let mut config = ProcessingConfig::default();

        config.quality = 0;
        assert!(config.validate().is_err());

        config.quality = 101;
        assert!(config.validate().is_err());

        config.quality = 1;
        assert!(config.validate().is_ok());

        config.quality = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dimension_bounds() {
        let mut config = ProcessingConfig::default();

        config.max_width = 0;
        assert!(config.validate().is_err());

        config.max_width = 1920;
        config.max_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worker_bounds() {
        let mut config = ProcessingConfig::default();
        config.workers = 0;
        assert!(config.validate().is_err());

        config.workers = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.extension(), "png");
    }
}
