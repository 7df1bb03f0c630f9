//! Configuration options for JPEG to WebP conversion

use std::path::{Path, PathBuf};

use crate::discovery::filter::matches_extension;
use crate::error::{ConversionError, ConversionResult};

/// Scan root used when none is given, relative to the working directory
pub const DEFAULT_ROOT_DIR: &str = "src/assets/Portfolio";
/// Suffix identifying convertible inputs
pub const DEFAULT_SOURCE_EXT: &str = ".jpg";
/// Suffix of produced outputs
pub const DEFAULT_TARGET_EXT: &str = ".webp";
/// Lossy WebP quality
pub const DEFAULT_QUALITY: u8 = 80;

/// Converter configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct ConverterConfig {
    /// Directory tree to scan
    pub root_dir: PathBuf,
    /// Case-insensitive file-name suffix of inputs, with leading dot
    pub source_ext: String,
    /// File-name suffix of outputs, with leading dot
    pub target_ext: String,
    /// Encoder quality (0-100)
    pub quality: u8,
    /// Apply EXIF orientation before encoding
    pub auto_orient: bool,
    /// Leave existing destinations alone instead of overwriting them
    pub skip_existing: bool,
    /// Maximum number of conversions in flight (1 = sequential walk order)
    pub jobs: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(DEFAULT_ROOT_DIR),
            source_ext: DEFAULT_SOURCE_EXT.to_string(),
            target_ext: DEFAULT_TARGET_EXT.to_string(),
            quality: DEFAULT_QUALITY,
            auto_orient: true,
            skip_existing: false,
            jobs: 1,
        }
    }
}

impl ConverterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration scanning `root` with every other option defaulted
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        Self {
            root_dir: root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Set the source extension (`jpg` and `.jpg` are equivalent)
    pub fn with_source_ext(mut self, ext: &str) -> Self {
        self.source_ext = normalize_extension(ext);
        self
    }

    /// Set the target extension (`webp` and `.webp` are equivalent)
    pub fn with_target_ext(mut self, ext: &str) -> Self {
        self.target_ext = normalize_extension(ext);
        self
    }

    /// Set encoder quality
    pub fn with_quality(mut self, quality: u8) -> ConversionResult<Self> {
        if quality > 100 {
            return Err(ConversionError::configuration(
                "Quality must be between 0 and 100",
            ));
        }
        self.quality = quality;
        Ok(self)
    }

    /// Enable/disable orientation correction
    pub fn with_auto_orient(mut self, enabled: bool) -> Self {
        self.auto_orient = enabled;
        self
    }

    /// Enable/disable skipping of existing destinations
    pub fn with_skip_existing(mut self, enabled: bool) -> Self {
        self.skip_existing = enabled;
        self
    }

    /// Set the number of concurrent conversions
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    /// Whether conversions run on a worker pool instead of inline with the walk
    pub fn is_parallel(&self) -> bool {
        self.jobs > 1
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> ConversionResult<()> {
        if self.quality > 100 {
            return Err(ConversionError::configuration(
                "Quality must be between 0 and 100",
            ));
        }

        for (name, ext) in [("Source", &self.source_ext), ("Target", &self.target_ext)] {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(ConversionError::configuration(format!(
                    "{} extension must be a non-empty suffix like '.jpg', got '{}'",
                    name, ext
                )));
            }
            if ext.contains(['/', '\\']) {
                return Err(ConversionError::configuration(format!(
                    "{} extension must not contain path separators: '{}'",
                    name, ext
                )));
            }
        }

        // A destination name ending in the source suffix would be a candidate itself.
        if matches_extension(&self.target_ext, &self.source_ext) {
            return Err(ConversionError::configuration(format!(
                "Source and target extensions must differ, target '{}' ends with '{}'",
                self.target_ext, self.source_ext
            )));
        }

        if self.jobs == 0 {
            return Err(ConversionError::configuration("Jobs must be at least 1"));
        }

        Ok(())
    }
}

/// Add the leading dot to an extension when missing
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}
