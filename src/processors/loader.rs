// thumbfit/src/processors/loader.rs
use crate::core::{Result, ThumbnailError};
use image::{DynamicImage, GenericImageView, ImageReader};
use std::path::Path;

#[derive(Clone, Default)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    /// Decode the image at `path`. The format is sniffed from the content,
    /// so a PNG saved as `.jpg` still loads.
    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                ThumbnailError::ProcessingError(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let (width, height) = image.dimensions();
        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(ThumbnailError::InvalidParameter(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}
