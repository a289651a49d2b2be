//! File discovery and classification
//!
//! Walks the input directory, filters by known image extensions, and
//! partitions the result into files that require format conversion
//! (HEIC/HEIF) and files whose format can be preserved.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{BatchError, Result};

/// File extensions accepted as input (matched case-insensitively)
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "tiff", "tif", "heic", "heif",
];

/// Extensions that always require re-encoding into a common format
const CONVERSION_EXTENSIONS: &[&str] = &["heic", "heif"];

/// The discovered file listing, partitioned by classification
///
/// The two sequences are disjoint and immutable once built. Ordering follows
/// file system visitation order and carries no significance.
#[derive(Debug, Default)]
pub struct FileSet {
    /// HEIC/HEIF files that must be re-encoded to be widely readable
    pub heic_like: Vec<PathBuf>,
    /// All other supported image files
    pub regular: Vec<PathBuf>,
}

impl FileSet {
    /// Total number of discovered files
    pub fn len(&self) -> usize {
        self.heic_like.len() + self.regular.len()
    }

    /// True when no image files were discovered
    pub fn is_empty(&self) -> bool {
        self.heic_like.is_empty() && self.regular.is_empty()
    }

    /// All files in the set, both classes
    pub fn all(&self) -> Vec<PathBuf> {
        self.heic_like
            .iter()
            .chain(self.regular.iter())
            .cloned()
            .collect()
    }
}

/// Discover supported image files under `root`
///
/// When `recursive` is false only `root` itself is scanned; subdirectories
/// are skipped entirely and skipping them is not an error. Fails with
/// [`BatchError::InputDirNotFound`] when `root` is missing.
pub fn discover<P: AsRef<Path>>(root: P, recursive: bool) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();

    if !root.is_dir() {
        return Err(BatchError::InputDirNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut walker = WalkDir::new(root);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::Other, format!("directory walk failed: {e}"))
        })?;

        if entry.file_type().is_file() && has_supported_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!("Discovered {} image files under {:?}", files.len(), root);
    Ok(files)
}

/// Partition discovered paths into HEIC-like and regular files
pub fn classify(paths: Vec<PathBuf>) -> FileSet {
    let mut set = FileSet::default();

    for path in paths {
        if matches_extension(&path, CONVERSION_EXTENSIONS) {
            set.heic_like.push(path);
        } else {
            set.regular.push(path);
        }
    }

    set
}

/// Check whether a path has one of the supported image extensions
pub fn has_supported_extension(path: &Path) -> bool {
    matches_extension(path, SUPPORTED_EXTENSIONS)
}

fn matches_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}
