// thumbfit/src/core/processor.rs
use super::{BoundingBox, FileOutcome, Result, ThumbnailError};
use crate::processors::{Encoder, Loader, Resizer};
use crate::utils::{format_file_size, recognized_format, same_location};
use image::GenericImageView;
use std::path::Path;

/// Decode, shrink and re-encode a single image.
pub struct ImageProcessor {
    loader: Loader,
    resizer: Resizer,
    encoder: Encoder,
}

impl ImageProcessor {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            loader: Loader::new(),
            resizer: Resizer::new(bounds),
            encoder: Encoder::new(),
        }
    }

    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.encoder = self.encoder.with_atomic_writes(atomic);
        self
    }

    /// Shrink `input_path` into `output_path`, which may be the same file.
    ///
    /// The decoded buffer lives only for the duration of this call. An image
    /// that already fits is not re-encoded: in place it is left byte-for-byte
    /// as is, otherwise its bytes are copied to `output_path`.
    pub fn process<P: AsRef<Path>>(&self, input_path: P, output_path: P) -> Result<FileOutcome> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let format = output_path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(recognized_format)
            .ok_or_else(|| {
                ThumbnailError::UnsupportedFormat(format!(
                    "No recognized image suffix: {}",
                    output_path.display()
                ))
            })?;

        let size_before = std::fs::metadata(input_path)?.len();
        let image = self.loader.load(input_path)?;
        let original_dimensions = image.dimensions();

        let (final_dimensions, size_after) = match self.resizer.thumbnail(&image) {
            Some(resized) => {
                drop(image);
                let written = self.encoder.save(&resized, output_path, format)?;
                (resized.dimensions(), written)
            }
            None => {
                if !same_location(input_path, output_path) {
                    std::fs::copy(input_path, output_path)?;
                }
                (original_dimensions, size_before)
            }
        };

        log::debug!(
            "{}: {}x{} -> {}x{}, {} -> {}",
            output_path.display(),
            original_dimensions.0,
            original_dimensions.1,
            final_dimensions.0,
            final_dimensions.1,
            format_file_size(size_before),
            format_file_size(size_after)
        );

        Ok(FileOutcome {
            output_path: output_path.to_path_buf(),
            original_dimensions,
            final_dimensions,
            size_before,
            size_after,
        })
    }
}
