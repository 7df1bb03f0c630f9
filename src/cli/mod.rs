//! Command-line interface module

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::config::{
    ConverterConfig, DEFAULT_QUALITY, DEFAULT_ROOT_DIR, DEFAULT_SOURCE_EXT, DEFAULT_TARGET_EXT,
};
use crate::conversion::ConversionResult;
use crate::error::ConversionError;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "webpconv")]
#[command(about = "Convert every JPEG under a directory tree to WebP, next to the original")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Directory tree to scan
    #[arg(default_value = DEFAULT_ROOT_DIR)]
    pub root: PathBuf,

    /// WebP quality (0-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub quality: u8,

    /// File-name suffix of images to convert, matched case-insensitively
    #[arg(long, default_value = DEFAULT_SOURCE_EXT)]
    pub source_ext: String,

    /// File-name suffix of produced images
    #[arg(long, default_value = DEFAULT_TARGET_EXT)]
    pub target_ext: String,

    /// Do not apply EXIF orientation before encoding
    #[arg(long)]
    pub no_auto_orient: bool,

    /// Leave existing destination files untouched
    #[arg(long)]
    pub skip_existing: bool,

    /// Number of images converted concurrently (1 keeps walk order)
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Write conversion statistics as JSON to this file
    #[arg(long)]
    pub stats_json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub converter_config: ConverterConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let converter_config = Self::create_converter_config(&args)?;

        Ok(Self {
            args,
            converter_config,
        })
    }

    /// Create converter configuration from CLI arguments
    fn create_converter_config(args: &Args) -> ConversionResult<ConverterConfig> {
        let config = ConverterConfig::for_root(&args.root)
            .with_source_ext(&args.source_ext)
            .with_target_ext(&args.target_ext)
            .with_quality(args.quality)?
            .with_auto_orient(!args.no_auto_orient)
            .with_skip_existing(args.skip_existing)
            .with_jobs(args.jobs);

        config.validate()?;
        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Get input tree description
    pub fn root_description(&self) -> String {
        format!("'{}'", self.converter_config.root_dir.display())
    }
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    }

    /// Show a message (if not in quiet mode)
    pub fn show_info(message: &str, quiet: bool) {
        if !quiet {
            println!("{}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("{}", message);
    }
}

/// Handle a top-level failure with a user-friendly message
pub fn handle_error(error: &ConversionError) {
    CliUtils::show_error(&format!("Error during conversion: {}", error.user_message()));

    if let ConversionError::Conversion { kind, .. } = error {
        match kind {
            crate::error::ConversionErrorKind::RootNotFound { .. } => {
                eprintln!("\nTip: pass the directory to scan as the first argument");
            }
            crate::error::ConversionErrorKind::Configuration { .. } => {
                eprintln!("\nTry 'webpconv --help' for usage information.");
            }
            _ => {}
        }
    }
}
