//! Statistics tracking for a conversion run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::batch::FileOutcome;

/// Tally of one run over a directory tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStatistics {
    /// Files successfully re-encoded
    pub converted: usize,
    /// Files left alone because their destination already existed
    pub skipped: usize,
    /// Files whose conversion failed
    pub failed: usize,
    /// Total size of converted sources in bytes
    pub input_size_bytes: u64,
    /// Total size of written destinations in bytes
    pub output_size_bytes: u64,
    /// Wall-clock time of the run in milliseconds
    pub processing_time_ms: u64,
    /// Sources that failed, in the order they were reported
    pub failures: Vec<FailedFile>,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

/// A source that could not be converted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedFile {
    pub source: PathBuf,
    pub error: String,
}

impl Default for BatchStatistics {
    fn default() -> Self {
        Self {
            converted: 0,
            skipped: 0,
            failed: 0,
            input_size_bytes: 0,
            output_size_bytes: 0,
            processing_time_ms: 0,
            failures: Vec::new(),
            collected_at: chrono::Utc::now(),
        }
    }
}

impl BatchStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one file outcome
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Converted {
                input_bytes,
                output_bytes,
                ..
            } => {
                self.converted += 1;
                self.input_size_bytes += input_bytes;
                self.output_size_bytes += output_bytes;
            }
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { source, error } => {
                self.failed += 1;
                self.failures.push(FailedFile {
                    source: source.clone(),
                    error: error.clone(),
                });
            }
        }
    }

    /// Stamp the run duration
    pub fn finish(&mut self, elapsed: Duration) {
        self.processing_time_ms = elapsed.as_millis() as u64;
        self.collected_at = chrono::Utc::now();
    }

    /// Number of candidates seen
    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Size reduction of converted files in percent (negative if they grew)
    pub fn size_reduction_percent(&self) -> f32 {
        if self.input_size_bytes == 0 {
            return 0.0;
        }
        ((self.input_size_bytes as f64 - self.output_size_bytes as f64)
            / self.input_size_bytes as f64
            * 100.0) as f32
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "Processed {} files in {:.1}s - {} converted, {} skipped, {} failed, {:.1}% smaller",
            self.total(),
            self.processing_time_ms as f32 / 1000.0,
            self.converted,
            self.skipped,
            self.failed,
            self.size_reduction_percent()
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
