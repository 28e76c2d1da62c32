use crate::core::processor::ImageProcessor;
use crate::core::{
    ErrorPolicy, FileOutcome, Parallelism, ProcessingStats, Result, ThumbnailConfig,
    ThumbnailError,
};
use crate::utils::{format_file_size, is_supported_format};
use rayon::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use walkdir::WalkDir;

pub const COMPLETION_MESSAGE: &str = "All images have been resized.";

/// Shrinks every recognized image directly inside the input directory.
pub struct BatchProcessor {
    config: ThumbnailConfig,
    thread_pool: Option<rayon::ThreadPool>,
}

impl BatchProcessor {
    pub fn new(config: ThumbnailConfig) -> Result<Self> {
        config.validate()?;

        let mut processor = Self {
            config,
            thread_pool: None,
        };

        if let Parallelism::Threads(threads) = processor.config.parallelism {
            if threads > 0 {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        ThumbnailError::ProcessingError(format!(
                            "Failed to create thread pool: {}",
                            e
                        ))
                    })?;
                processor.thread_pool = Some(pool);
            }
        }

        Ok(processor)
    }

    /// Run the batch, writing one `Resized and saved: <path>` line to `out`
    /// per processed image and a completion line at the end.
    pub fn process_directory<W: Write + Send>(&self, out: &mut W) -> Result<ProcessingStats> {
        let input_dir = self.config.input_dir.as_path();
        let output_dir = self.config.output_dir.as_path();

        self.validate_paths(input_dir, output_dir)?;
        std::fs::create_dir_all(output_dir)?;

        let (image_paths, ignored_count) = self.collect_image_paths(input_dir)?;

        if image_paths.is_empty() {
            log::warn!("No image files found in {}", input_dir.display());
        } else {
            log::info!(
                "Processing {} images from {} (box {}x{})",
                image_paths.len(),
                input_dir.display(),
                self.config.bounds.max_width,
                self.config.bounds.max_height
            );
        }

        let processor = ImageProcessor::new(self.config.bounds)
            .with_atomic_writes(self.config.atomic_writes);

        let mut stats = ProcessingStats {
            ignored_count,
            ..Default::default()
        };

        match self.config.parallelism {
            Parallelism::Sequential => {
                for input_path in &image_paths {
                    let result = self.process_single_image_in_batch(&processor, input_path);
                    self.record(input_path, result, &mut stats, out)?;
                }
            }
            Parallelism::Threads(_) => {
                stats = self.process_parallel(&processor, &image_paths, stats, out)?;
            }
        }

        writeln!(out, "{}", COMPLETION_MESSAGE)?;
        out.flush()?;

        log::debug!(
            "Resized {} of {} images ({} -> {}), {} failed, {} entries ignored",
            stats.resized_count(),
            stats.processed_count(),
            format_file_size(stats.total_size_before()),
            format_file_size(stats.total_size_after()),
            stats.errors.len(),
            stats.ignored_count
        );

        Ok(stats)
    }

    fn process_parallel<W: Write + Send>(
        &self,
        processor: &ImageProcessor,
        image_paths: &[PathBuf],
        stats: ProcessingStats,
        out: &mut W,
    ) -> Result<ProcessingStats> {
        // Lines and stats are updated together so output never interleaves.
        let state = Mutex::new((out, stats));

        let run = || {
            image_paths.par_iter().try_for_each(|input_path| {
                let result = self.process_single_image_in_batch(processor, input_path);
                let mut guard = state.lock().map_err(|_| {
                    ThumbnailError::ProcessingError("Batch state lock poisoned".to_string())
                })?;
                let (out, stats) = &mut *guard;
                self.record(input_path, result, stats, &mut **out)
            })
        };

        match &self.thread_pool {
            Some(pool) => pool.install(run)?,
            None => run()?,
        }

        let (_, stats) = state.into_inner().map_err(|_| {
            ThumbnailError::ProcessingError("Batch state lock poisoned".to_string())
        })?;
        Ok(stats)
    }

    fn process_single_image_in_batch(
        &self,
        processor: &ImageProcessor,
        input_path: &Path,
    ) -> Result<FileOutcome> {
        let file_name = input_path.file_name().ok_or_else(|| {
            ThumbnailError::InvalidParameter(format!("Invalid file name: {}", input_path.display()))
        })?;

        let output_path = self.config.output_dir.join(file_name);
        processor.process(input_path, output_path.as_path())
    }

    fn record<W: Write>(
        &self,
        input_path: &Path,
        result: Result<FileOutcome>,
        stats: &mut ProcessingStats,
        out: &mut W,
    ) -> Result<()> {
        match result {
            Ok(outcome) => {
                writeln!(out, "Resized and saved: {}", outcome.output_path.display())?;
                stats.processed.push(outcome);
            }
            Err(e) => match self.config.error_policy {
                ErrorPolicy::Abort => return Err(e),
                ErrorPolicy::Skip => {
                    log::error!("Skipping {}: {}", input_path.display(), e);
                    stats.errors.push((input_path.to_path_buf(), e.to_string()));
                }
            },
        }

        Ok(())
    }

    /// Regular files directly inside `input_dir` with a recognized suffix,
    /// in listing order, plus the number of entries passed over.
    fn collect_image_paths(&self, input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
        let mut paths = Vec::new();
        let mut ignored = 0;

        for entry in WalkDir::new(input_dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());

            if is_file && is_supported_format(entry.path()) {
                paths.push(entry.into_path());
            } else {
                log::debug!("Ignoring {}", entry.path().display());
                ignored += 1;
            }
        }

        Ok((paths, ignored))
    }

    pub fn validate_paths(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.exists() {
            return Err(ThumbnailError::InvalidParameter(format!(
                "Input directory does not exist: {}",
                input_dir.display()
            )));
        }

        if !input_dir.is_dir() {
            return Err(ThumbnailError::InvalidParameter(format!(
                "Input path is not a directory: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ThumbnailError::InvalidParameter(format!(
                "Output path exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        Ok(())
    }
}
