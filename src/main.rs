use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use thumbfit::{BatchProcessor, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    let config = cli.into_config();
    let input_dir = config.input_dir.clone();

    let processor = BatchProcessor::new(config)?;
    let mut stdout = std::io::stdout();
    let stats = processor
        .process_directory(&mut stdout)
        .with_context(|| format!("Failed to resize images in {}", input_dir.display()))?;

    if !stats.errors.is_empty() {
        log::warn!("{} image(s) could not be processed", stats.errors.len());
    }

    Ok(())
}
