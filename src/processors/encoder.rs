// thumbfit/src/processors/encoder.rs
use crate::core::{Result, ThumbnailError};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const JPEG_QUALITY: u8 = 75;

/// Encodes an image in the format its file name implies and writes it out.
pub struct Encoder {
    atomic: bool,
}

impl Encoder {
    pub fn new() -> Self {
        Self { atomic: true }
    }

    /// When atomic, bytes go to a temp file next to the target and are
    /// renamed over it, so a crash never leaves a truncated image behind.
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn save(&self, image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<u64> {
        log::debug!(
            "Saving image to {} as {:?} (atomic: {})",
            path.display(),
            format,
            self.atomic
        );

        let bytes = self.encode_to_bytes(image, format)?;

        if self.atomic {
            self.write_atomic(path, &bytes)?;
        } else {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(&bytes)?;
            writer.flush()?;
        }

        Ok(bytes.len() as u64)
    }

    pub fn encode_to_bytes(&self, image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Jpeg => {
                // baseline JPEG: 8-bit gray or RGB, no alpha
                let image = match image {
                    DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
                    other => Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
                };
                let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
                image.write_with_encoder(encoder)?;
            }
            ImageFormat::Png => {
                image.write_to(&mut buffer, ImageFormat::Png)?;
            }
            other => {
                return Err(ThumbnailError::UnsupportedFormat(format!("{:?}", other)));
            }
        }

        Ok(buffer.into_inner())
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        // A symlinked output is replaced at the file it points to, not the link.
        let target = match fs::symlink_metadata(path) {
            Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path)?,
            _ => path.to_path_buf(),
        };

        let dir = match target.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(bytes)?;

        // Temp files are created 0600; keep the mode of the file being replaced.
        if let Ok(existing) = fs::metadata(&target) {
            temp.as_file().set_permissions(existing.permissions())?;
        }

        temp.as_file().sync_all()?;
        temp.persist(&target)?;

        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
