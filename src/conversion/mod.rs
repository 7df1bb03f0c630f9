//! JPEG to WebP conversion module
//!
//! This module contains the per-image engine, the tree-wide batch driver,
//! configuration, and statistics.

pub mod batch;
pub mod config;
pub mod engine;
pub mod stats;

pub use batch::{BatchConverter, FileOutcome};
pub use config::ConverterConfig;
pub use engine::{ConvertedImage, ImageConverter};
pub use stats::BatchStatistics;

pub use crate::error::ConversionResult;
