use chrono::Local;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::analyzers::{AccessibilityAnalyzer, ChargerAnalyzer, SupportAnalyzer};
use crate::cli::args::{Cli, Commands, DatasetArgs};
use crate::error::Result;
use crate::processors::{DatasetLoader, DistrictAccessibilityScorer, LoadedDatasets};
use crate::settings::Settings;
use crate::utils::filename::{
    generate_default_report_filename, generate_default_scores_filename,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::{MarkdownReport, OutputFormat, ScoreWriter};

/// Install the global tracing subscriber; `RUST_LOG` overrides the level
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn load_datasets(
    settings: &Settings,
    datasets: &DatasetArgs,
    progress: &ProgressReporter,
) -> Result<LoadedDatasets> {
    println!("Charger data: {}", datasets.chargers.display());
    match &datasets.support {
        Some(path) => println!("Support center data: {}", path.display()),
        None => println!("Support center data: not provided"),
    }

    DatasetLoader::new(settings)?
        .with_mmap(datasets.mmap)
        .load(&datasets.chargers, datasets.support.as_deref(), Some(progress))
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(cli.config.as_deref())?;
    info!(
        region = %settings.region,
        districts = settings.districts.len(),
        "Loaded settings"
    );

    match cli.command {
        Commands::Score {
            datasets,
            output_file,
            report,
            no_report,
            parallel,
            max_workers,
            top_n,
        } => {
            println!("Scoring {} accessibility...", settings.region);

            let progress = ProgressReporter::new_spinner("Loading datasets...", false);
            let loaded = load_datasets(&settings, &datasets, &progress)?;

            progress.set_message("Scoring districts...");
            let scorer = DistrictAccessibilityScorer::from_settings(&settings);
            let scores = if parallel {
                scorer.score_parallel(&loaded.chargers, loaded.support_centers(), max_workers)?
            } else {
                scorer.score(&loaded.chargers, loaded.support_centers())
            };
            progress.finish_with_message(&format!("Scored {} districts", scores.len()));

            let patterns = AccessibilityAnalyzer::from_settings(&settings)
                .with_top_n(top_n)
                .analyze(&scores);
            println!("\n{}", patterns.summary());

            if !loaded.report.is_clean() {
                println!("{}", loaded.report.summary());
            }

            let output_file = output_file.unwrap_or_else(generate_default_scores_filename);
            ScoreWriter::new()
                .with_output_format(OutputFormat::from_path(&output_file))
                .write_scores(&scores, &output_file)?;
            println!("Score table written to {}", output_file.display());

            if !no_report {
                let charger_stats = ChargerAnalyzer::new().analyze(&loaded.chargers);
                let support_stats = loaded
                    .support_centers
                    .as_deref()
                    .map(|centers| SupportAnalyzer::new().analyze(centers));

                let report_file = report.unwrap_or_else(generate_default_report_filename);
                MarkdownReport {
                    region: &settings.region,
                    generated: Local::now().date_naive(),
                    scores: &scores,
                    patterns: &patterns,
                    chargers: &charger_stats,
                    support: support_stats.as_ref(),
                }
                .write_to(&report_file)?;
                println!("Report written to {}", report_file.display());
            }

            println!("Scoring complete!");
        }

        Commands::Summary { datasets } => {
            println!("Summarizing {} datasets...", settings.region);

            let progress = ProgressReporter::new_spinner("Loading datasets...", false);
            let loaded = load_datasets(&settings, &datasets, &progress)?;
            progress.finish_with_message("Datasets loaded");

            let charger_stats = ChargerAnalyzer::new().analyze(&loaded.chargers);
            println!("\n{}", charger_stats.summary());

            if let Some(centers) = loaded.support_centers.as_deref() {
                let support_stats = SupportAnalyzer::new().analyze(centers);
                println!("{}", support_stats.summary());
            }
        }

        Commands::Validate { datasets } => {
            println!("Validating {} datasets...", settings.region);

            let progress = ProgressReporter::new_spinner("Loading datasets...", false);
            let loaded = load_datasets(&settings, &datasets, &progress)?;
            progress.finish_with_message("Validation complete");

            println!("\n{}", loaded.report.summary());

            if loaded.report.is_clean() {
                println!("✅ All values parsed without defaults");
            } else {
                println!(
                    "⚠️  {} values were missing or malformed and took their defaults",
                    loaded.report.total_coercions()
                );
            }
        }

        Commands::Info { file, top_n } => {
            println!("Reading score table: {}", file.display());

            let scores = ScoreWriter::new()
                .with_output_format(OutputFormat::from_path(&file))
                .read_scores(&file)?;

            let patterns = AccessibilityAnalyzer::from_settings(&settings)
                .with_top_n(top_n)
                .analyze(&scores);
            println!("\n{}", patterns.summary());
        }
    }

    Ok(())
}
