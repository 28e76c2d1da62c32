// thumbfit/src/processors/resizer.rs
use crate::core::BoundingBox;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Downscale-only resizer that keeps the aspect ratio.
pub struct Resizer {
    bounds: BoundingBox,
    filter: FilterType,
}

impl Resizer {
    pub fn new(bounds: BoundingBox) -> Self {
        Self {
            bounds,
            filter: FilterType::Lanczos3,
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Returns `None` when the image already fits and should be left alone.
    pub fn thumbnail(&self, image: &DynamicImage) -> Option<DynamicImage> {
        let (orig_width, orig_height) = image.dimensions();
        let (width, height) = self.fit_within(orig_width, orig_height);

        if width == orig_width && height == orig_height {
            log::debug!("Image {}x{} already fits, skipping resize", width, height);
            return None;
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{} ({:?})",
            orig_width,
            orig_height,
            width,
            height,
            self.filter
        );

        Some(image.resize_exact(width, height, self.filter))
    }

    /// Target dimensions for a `width`x`height` image inside the box.
    pub fn fit_within(&self, width: u32, height: u32) -> (u32, u32) {
        fit_within(width, height, self.bounds)
    }
}

/// Scale `(width, height)` by `min(max_w / w, max_h / h)` when it overflows
/// `bounds`. The binding side lands exactly on its limit; the other side is
/// rounded to the nearest pixel and never drops below 1.
pub fn fit_within(width: u32, height: u32, bounds: BoundingBox) -> (u32, u32) {
    if width == 0 || height == 0 || bounds.contains(width, height) {
        return (width, height);
    }

    let (w, h) = (width as u64, height as u64);
    let (max_w, max_h) = (bounds.max_width as u64, bounds.max_height as u64);

    // max_w / w <= max_h / h, cross-multiplied
    if max_w * h <= max_h * w {
        let new_h = (h * max_w + w / 2) / w;
        (bounds.max_width, new_h.max(1) as u32)
    } else {
        let new_w = (w * max_h + h / 2) / h;
        (new_w.max(1) as u32, bounds.max_height)
    }
}
