mod cli;
mod core;
mod processors;
mod utils;

pub use cli::Cli;
pub use crate::core::processor::ImageProcessor;
pub use crate::core::{
    BoundingBox, ErrorPolicy, FileOutcome, Parallelism, ProcessingStats, Result,
    ThumbnailConfig, ThumbnailError, DEFAULT_IMAGE_DIR, DEFAULT_MAX_DIMENSION,
};
pub use processors::{
    fit_within, BatchProcessor, Encoder, Loader, Resizer, COMPLETION_MESSAGE, JPEG_QUALITY,
};
pub use utils::{
    calculate_aspect_ratio, format_file_size, is_supported_format, recognized_format,
    same_location,
};

