use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use webpconv::cli::{handle_error, Args, CliConfig, CliUtils};
use webpconv::conversion::batch::report_outcome;
use webpconv::{BatchConverter, BatchStatistics, ConversionError};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let cli = match CliConfig::from_args(args) {
        Ok(cli) => cli,
        Err(e) => {
            handle_error(&e);
            return ExitCode::FAILURE;
        }
    };

    CliUtils::show_info("Starting conversion to WebP...", cli.is_quiet());
    debug!(root = %cli.root_description(), "configuration accepted");

    match run(&cli) {
        Ok(stats) => {
            CliUtils::show_info("Conversion completed!", cli.is_quiet());
            if cli.want_stats() {
                output_statistics(&stats, cli.is_quiet());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<ConversionError>() {
                Some(conversion_error) => handle_error(conversion_error),
                None => CliUtils::show_error(&format!("Error during conversion: {:#}", e)),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: &CliConfig) -> Result<BatchStatistics> {
    let converter = BatchConverter::new(cli.converter_config.clone())?.with_quiet(cli.is_quiet());

    let stats = if cli.converter_config.is_parallel() {
        run_pool(&converter, cli.is_quiet())?
    } else {
        converter.run()?
    };

    if let Some(path) = &cli.args.stats_json {
        let json = stats.to_json().context("Failed to serialize statistics")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write statistics to {}", path.display()))?;
    }

    Ok(stats)
}

/// Convert on the worker pool with a progress bar when attached to a terminal
fn run_pool(converter: &BatchConverter, quiet: bool) -> Result<BatchStatistics> {
    let candidates = converter.discover()?;
    let pb = if quiet {
        indicatif::ProgressBar::hidden()
    } else {
        CliUtils::create_progress_bar(candidates.len() as u64)
    };

    let stats = converter.convert_all(&candidates, |outcome| {
        if pb.is_hidden() {
            report_outcome(outcome, quiet);
        } else {
            pb.println(outcome.message());
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    Ok(stats)
}

fn output_statistics(stats: &BatchStatistics, quiet: bool) {
    if quiet {
        return;
    }

    println!("\nConversion Statistics:");
    println!("Files converted: {}", stats.converted);
    println!("Files skipped: {}", stats.skipped);
    println!("Files failed: {}", stats.failed);
    println!(
        "Input size: {}",
        CliUtils::format_file_size(stats.input_size_bytes)
    );
    println!(
        "Output size: {}",
        CliUtils::format_file_size(stats.output_size_bytes)
    );
    println!("Size reduction: {:.1}%", stats.size_reduction_percent());
    println!(
        "Processing time: {}",
        CliUtils::format_duration(Duration::from_millis(stats.processing_time_ms))
    );

    if stats.has_failures() {
        println!("\nFailed files:");
        for failure in &stats.failures {
            println!("  {}: {}", failure.source.display(), failure.error);
        }
    }
}
