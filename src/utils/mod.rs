// thumbfit/src/utils/mod.rs
use image::ImageFormat;
use std::path::Path;

const RECOGNIZED_SUFFIXES: [(&str, ImageFormat); 3] = [
    (".png", ImageFormat::Png),
    (".jpeg", ImageFormat::Jpeg),
    (".jpg", ImageFormat::Jpeg),
];

/// Encode format implied by a file name, if it ends in a recognized suffix.
///
/// Matching is a case-insensitive suffix test on the whole name, so `.png`
/// on its own counts just like `photo.PNG`.
pub fn recognized_format(file_name: &str) -> Option<ImageFormat> {
    let lower = file_name.to_lowercase();
    RECOGNIZED_SUFFIXES
        .iter()
        .find(|(suffix, _)| lower.ends_with(suffix))
        .map(|(_, format)| *format)
}

pub fn is_supported_format(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(recognized_format)
        .is_some()
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

pub fn calculate_aspect_ratio(width: u32, height: u32) -> f64 {
    if height == 0 {
        0.0
    } else {
        width as f64 / height as f64
    }
}

/// Whether `a` and `b` name the same file, resolving the parent directories
/// so `./images/x.jpg` and `images/x.jpg` compare equal.
pub fn same_location(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }

    if a.file_name() != b.file_name() {
        return false;
    }

    let parent = |p: &Path| {
        let dir = match p.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        dir.canonicalize().ok()
    };

    match (parent(a), parent(b)) {
        (Some(pa), Some(pb)) => pa == pb,
        _ => false,
    }
}
