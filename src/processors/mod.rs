// thumbfit/src/processors/mod.rs
mod batch;
mod encoder;
mod loader;
mod resizer;

pub use batch::{BatchProcessor, COMPLETION_MESSAGE};
pub use encoder::{Encoder, JPEG_QUALITY};
pub use loader::Loader;
pub use resizer::{fit_within, Resizer};

