//! JPEG to WebP tree converter
//!
//! Walks a directory tree and re-encodes every JPEG it finds as a lossy WebP
//! sibling, applying EXIF orientation so the output is upright.

pub mod cli;
pub mod conversion;
pub mod discovery;
pub mod error;

// Re-export commonly used types
pub use conversion::{
    BatchConverter, BatchStatistics, ConversionResult, ConverterConfig, FileOutcome,
    ImageConverter,
};
pub use error::{ConversionError, ConversionErrorKind};

/// Convert every candidate under `config.root_dir`, printing one line per file
pub fn convert_tree(config: ConverterConfig) -> ConversionResult<BatchStatistics> {
    BatchConverter::new(config)?.run()
}
