//! Error types and handling infrastructure for JPEG to WebP conversion

use anyhow::Error;
use std::path::{Path, PathBuf};

/// Core error types for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Decode error: {message}")]
    Decode { message: String, path: PathBuf },

    #[error("Encode error: {message}")]
    Encode { message: String, path: PathBuf },

    #[error("Image too large for WebP: {width}x{height} (limit: {limit}x{limit})")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("Root directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("Directory walk failed: {message}")]
    Walk {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl ConversionErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn decode(message: String, path: &Path) -> Self {
        Self::Decode {
            message,
            path: path.to_path_buf(),
        }
    }

    pub fn encode(message: String, path: &Path) -> Self {
        Self::Encode {
            message,
            path: path.to_path_buf(),
        }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    /// Path the error refers to, when there is one
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io { path, .. } | Self::Walk { path, .. } => path.as_deref(),
            Self::Decode { path, .. } | Self::Encode { path, .. } => Some(path),
            Self::RootNotFound { path } => Some(path),
            Self::TooLarge { .. } | Self::Configuration { .. } => None,
        }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::conversion(ConversionErrorKind::configuration(message.into()))
    }

    pub fn other(error: Error) -> Self {
        Self::Other(error)
    }

    /// Whether this error means the run as a whole cannot proceed
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Conversion {
                kind: ConversionErrorKind::RootNotFound { .. }
                    | ConversionErrorKind::Walk { .. }
                    | ConversionErrorKind::Configuration { .. },
                ..
            }
        )
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Conversion { kind, source } => match kind {
                ConversionErrorKind::RootNotFound { path } => {
                    format!("Root directory does not exist: {}", path.display())
                }
                ConversionErrorKind::TooLarge {
                    width,
                    height,
                    limit,
                } => format!(
                    "Image is {}x{} pixels, WebP supports at most {}x{}",
                    width, height, limit, limit
                ),
                _ => match source {
                    Some(source) => format!("{}: {}", kind, source),
                    None => kind.to_string(),
                },
            },
            Self::Other(err) => format!("Unexpected error: {}", err),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
