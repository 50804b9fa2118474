use accessibility_processor::cli::{run, Cli};
use accessibility_processor::error::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
