// thumbfit/src/core/mod.rs
pub mod processor;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_IMAGE_DIR: &str = "./images";
pub const DEFAULT_MAX_DIMENSION: u32 = 600;
const MAX_BOX_DIMENSION: u32 = 100_000;

/// Largest width/height an output image may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl BoundingBox {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self { max_width, max_height }
    }

    pub fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIMENSION, DEFAULT_MAX_DIMENSION)
    }
}

/// What a batch does when one file fails to decode or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Propagate the first failure and stop the run.
    #[default]
    Abort,
    /// Log the failure, record it in the stats and move on.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    #[default]
    Sequential,
    /// Rayon workers; `0` means the global pool.
    Threads(usize),
}

#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub bounds: BoundingBox,
    pub error_policy: ErrorPolicy,
    pub parallelism: Parallelism,
    pub atomic_writes: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            output_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            bounds: BoundingBox::default(),
            error_policy: ErrorPolicy::Abort,
            parallelism: Parallelism::Sequential,
            atomic_writes: true,
        }
    }
}

impl ThumbnailConfig {
    /// Config that rewrites `dir` in place with the default box.
    pub fn in_place<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            input_dir: dir.clone(),
            output_dir: dir,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let BoundingBox { max_width, max_height } = self.bounds;

        if max_width == 0 || max_height == 0 {
            return Err(ThumbnailError::InvalidParameter(format!(
                "Bounding box dimensions must be positive, got {}x{}",
                max_width, max_height
            )));
        }

        if max_width > MAX_BOX_DIMENSION || max_height > MAX_BOX_DIMENSION {
            return Err(ThumbnailError::InvalidParameter(
                "Bounding box too large (max 100,000 pixels)".to_string(),
            ));
        }

        if self.input_dir.as_os_str().is_empty() || self.output_dir.as_os_str().is_empty() {
            return Err(ThumbnailError::InvalidParameter(
                "Input and output directories must be set".to_string(),
            ));
        }

        Ok(())
    }
}

/// Result of processing one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub output_path: PathBuf,
    pub original_dimensions: (u32, u32),
    pub final_dimensions: (u32, u32),
    pub size_before: u64,
    pub size_after: u64,
}

impl FileOutcome {
    pub fn was_resized(&self) -> bool {
        self.original_dimensions != self.final_dimensions
    }
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed: Vec<FileOutcome>,
    /// Only populated under [`ErrorPolicy::Skip`].
    pub errors: Vec<(PathBuf, String)>,
    pub ignored_count: usize,
}

impl ProcessingStats {
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    pub fn resized_count(&self) -> usize {
        self.processed.iter().filter(|o| o.was_resized()).count()
    }

    pub fn total_size_before(&self) -> u64 {
        self.processed.iter().map(|o| o.size_before).sum()
    }

    pub fn total_size_after(&self) -> u64 {
        self.processed.iter().map(|o| o.size_after).sum()
    }
}

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Directory listing error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Failed to replace output file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),
}

pub type Result<T> = std::result::Result<T, ThumbnailError>;
