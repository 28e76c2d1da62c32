// thumbfit/src/cli.rs
use crate::core::{
    BoundingBox, ErrorPolicy, Parallelism, ThumbnailConfig, DEFAULT_IMAGE_DIR,
    DEFAULT_MAX_DIMENSION,
};
use clap::Parser;
use std::path::PathBuf;

/// Shrink every PNG/JPEG in a directory to fit a bounding box, overwriting
/// the originals.
#[derive(Parser, Debug)]
#[command(name = "thumbfit", version, about)]
pub struct Cli {
    /// Directory to read images from
    #[arg(short, long, default_value = DEFAULT_IMAGE_DIR)]
    pub input: PathBuf,

    /// Directory to write into (defaults to the input directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum output width in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_DIMENSION)]
    pub max_width: u32,

    /// Maximum output height in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_DIMENSION)]
    pub max_height: u32,

    /// Keep going when an image fails to decode or save
    #[arg(long)]
    pub skip_errors: bool,

    /// Process files in parallel (0 = one worker per core)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Truncate and write output files directly instead of replacing them
    #[arg(long)]
    pub no_atomic: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_config(self) -> ThumbnailConfig {
        let output_dir = self.output.unwrap_or_else(|| self.input.clone());

        ThumbnailConfig {
            input_dir: self.input,
            output_dir,
            bounds: BoundingBox::new(self.max_width, self.max_height),
            error_policy: if self.skip_errors {
                ErrorPolicy::Skip
            } else {
                ErrorPolicy::Abort
            },
            parallelism: self
                .threads
                .map_or(Parallelism::Sequential, Parallelism::Threads),
            atomic_writes: !self.no_atomic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_match_the_defaults() {
        let cli = Cli::try_parse_from(["thumbfit"]).unwrap();
        assert!(!cli.verbose);

        let config = cli.into_config();
        assert_eq!(config.input_dir, PathBuf::from("./images"));
        assert_eq!(config.output_dir, config.input_dir);
        assert_eq!(config.bounds, BoundingBox::new(600, 600));
        assert_eq!(config.error_policy, ErrorPolicy::Abort);
        assert_eq!(config.parallelism, Parallelism::Sequential);
        assert!(config.atomic_writes);
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = Cli::try_parse_from([
            "thumbfit",
            "--input",
            "photos",
            "-o",
            "thumbs",
            "--max-width",
            "320",
            "--max-height",
            "240",
            "--skip-errors",
            "-j",
            "4",
            "--no-atomic",
        ])
        .unwrap();

        let config = cli.into_config();
        assert_eq!(config.input_dir, PathBuf::from("photos"));
        assert_eq!(config.output_dir, PathBuf::from("thumbs"));
        assert_eq!(config.bounds, BoundingBox::new(320, 240));
        assert_eq!(config.error_policy, ErrorPolicy::Skip);
        assert_eq!(config.parallelism, Parallelism::Threads(4));
        assert!(!config.atomic_writes);
    }

    #[test]
    fn non_numeric_width_is_a_parse_error() {
        assert!(Cli::try_parse_from(["thumbfit", "--max-width", "wide"]).is_err());
    }
}
