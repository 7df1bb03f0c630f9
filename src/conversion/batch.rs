use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::cli::path_mapping::destination_for;
use crate::conversion::engine::ImageConverter;
use crate::conversion::stats::BatchStatistics;
use crate::conversion::{ConversionResult, ConverterConfig};
use crate::discovery::{check_root, find_candidates, walk_candidates};
use crate::error::ConversionError;

/// What happened to one conversion candidate
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Converted {
        source: PathBuf,
        destination: PathBuf,
        input_bytes: u64,
        output_bytes: u64,
    },
    Skipped {
        source: PathBuf,
        destination: PathBuf,
    },
    Failed {
        source: PathBuf,
        error: String,
    },
}

impl FileOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Console line for this outcome
    pub fn message(&self) -> String {
        match self {
            Self::Converted {
                source,
                destination,
                ..
            } => format!("Converted: {} -> {}", source.display(), destination.display()),
            Self::Skipped {
                source,
                destination,
            } => format!(
                "Skipped: {} ({} already exists)",
                source.display(),
                destination.display()
            ),
            Self::Failed { source, error } => {
                format!("Error converting {}: {}", source.display(), error)
            }
        }
    }
}

/// Print an outcome the way the CLI reports it. Failures always go to
/// stderr; everything else is suppressed in quiet mode.
pub fn report_outcome(outcome: &FileOutcome, quiet: bool) {
    if outcome.is_error() {
        eprintln!("{}", outcome.message());
    } else if !quiet {
        println!("{}", outcome.message());
    }
}

/// Walks a tree and converts every candidate in it
#[derive(Debug, Clone)]
pub struct BatchConverter {
    config: ConverterConfig,
    engine: ImageConverter,
    quiet: bool,
}

impl BatchConverter {
    /// Validate `config` and build a converter for it
    pub fn new(config: ConverterConfig) -> ConversionResult<Self> {
        config.validate()?;
        let engine = ImageConverter::new(&config);
        Ok(Self {
            config,
            engine,
            quiet: false,
        })
    }

    /// Suppress success lines printed by [`BatchConverter::run`]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Convert the whole tree, printing one line per file.
    ///
    /// Per-file failures are reported and counted; only a failure to walk
    /// the tree itself is returned as an error.
    pub fn run(&self) -> ConversionResult<BatchStatistics> {
        let quiet = self.quiet;
        self.run_with(|outcome| report_outcome(outcome, quiet))
    }

    /// Convert the whole tree, handing every outcome to `report` as soon as
    /// it is known.
    ///
    /// With `jobs == 1` files are converted one at a time in walk order. With
    /// more jobs the tree is listed first and converted on a bounded pool, so
    /// `report` may be called from several threads in any order.
    pub fn run_with<F>(&self, report: F) -> ConversionResult<BatchStatistics>
    where
        F: Fn(&FileOutcome) + Sync,
    {
        if self.config.is_parallel() {
            let candidates = self.discover()?;
            return self.convert_all(&candidates, report);
        }

        let root = &self.config.root_dir;
        check_root(root)?;
        info!(root = %root.display(), "scanning");

        let start = Instant::now();
        let mut stats = BatchStatistics::new();
        for candidate in walk_candidates(root, &self.config.source_ext) {
            let outcome = self.convert_one(&candidate?);
            report(&outcome);
            stats.record(&outcome);
        }
        stats.finish(start.elapsed());
        info!("{}", stats.summary());
        Ok(stats)
    }

    /// List every candidate under the configured root
    pub fn discover(&self) -> ConversionResult<Vec<PathBuf>> {
        let root = &self.config.root_dir;
        info!(root = %root.display(), "scanning");
        let candidates = find_candidates(root, &self.config.source_ext)?;
        debug!(count = candidates.len(), "found candidates");
        Ok(candidates)
    }

    /// Convert an already discovered list of candidates on a pool of
    /// `jobs` threads.
    pub fn convert_all<F>(
        &self,
        candidates: &[PathBuf],
        report: F,
    ) -> ConversionResult<BatchStatistics>
    where
        F: Fn(&FileOutcome) + Sync,
    {
        let start = Instant::now();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| ConversionError::other(e.into()))?;

        let outcomes: Vec<FileOutcome> = pool.install(|| {
            candidates
                .par_iter()
                .map(|source| {
                    let outcome = self.convert_one(source);
                    report(&outcome);
                    outcome
                })
                .collect()
        });

        let mut stats = BatchStatistics::new();
        for outcome in &outcomes {
            stats.record(outcome);
        }
        stats.finish(start.elapsed());
        info!(jobs = self.config.jobs, "{}", stats.summary());
        Ok(stats)
    }

    /// Convert a single source next to itself. Never fails: errors are
    /// captured in the returned outcome.
    pub fn convert_one(&self, source: &Path) -> FileOutcome {
        let Some(destination) =
            destination_for(source, &self.config.source_ext, &self.config.target_ext)
        else {
            return FileOutcome::Failed {
                source: source.to_path_buf(),
                error: format!("file name does not end with {}", self.config.source_ext),
            };
        };

        if self.config.skip_existing && destination.exists() {
            debug!(destination = %destination.display(), "destination exists, skipping");
            return FileOutcome::Skipped {
                source: source.to_path_buf(),
                destination,
            };
        }

        match self.engine.convert(source, &destination) {
            Ok(converted) => FileOutcome::Converted {
                source: source.to_path_buf(),
                destination,
                input_bytes: converted.input_bytes,
                output_bytes: converted.output_bytes,
            },
            Err(e) => {
                debug!(source = %source.display(), error = %e, "conversion failed");
                FileOutcome::Failed {
                    source: source.to_path_buf(),
                    error: e.user_message(),
                }
            }
        }
    }
}
