use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::DEFAULT_TOP_N;

#[derive(Parser)]
#[command(name = "accessibility-processor")]
#[command(about = "District-level wheelchair accessibility scoring for public charger data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Settings file (TOML, JSON or YAML)")]
    pub config: Option<PathBuf>,
}

/// Input datasets shared by every data command
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    #[arg(long, help = "Wheelchair fast-charger standard data CSV")]
    pub chargers: PathBuf,

    #[arg(long, help = "Transport-support center standard data CSV")]
    pub support: Option<PathBuf>,

    #[arg(long, default_value = "false", help = "Memory-map input files")]
    pub mmap: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every district and write the score table and report
    Score {
        #[command(flatten)]
        datasets: DatasetArgs,

        #[arg(
            short,
            long,
            help = "Score table path, .csv or .json [default: output/accessibility-scores-{YYMMDD}.csv]"
        )]
        output_file: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Markdown report path [default: output/accessibility-report-{YYMMDD}.md]"
        )]
        report: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Skip the Markdown report")]
        no_report: bool,

        #[arg(long, default_value = "false", help = "Score districts in parallel")]
        parallel: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, default_value_t = DEFAULT_TOP_N, help = "Districts listed as charger leaders")]
        top_n: usize,
    },

    /// Print descriptive statistics for both datasets
    Summary {
        #[command(flatten)]
        datasets: DatasetArgs,
    },

    /// Report missing and malformed values without scoring
    Validate {
        #[command(flatten)]
        datasets: DatasetArgs,
    },

    /// Display a previously written score table
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, default_value_t = DEFAULT_TOP_N, help = "Districts listed as charger leaders")]
        top_n: usize,
    },
}
