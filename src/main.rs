use anyhow::{Context, Result};
use clap::Parser;
use cleaning_robot::{CleaningInterpreter, run_files};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cleaning-robot", version, about = "Simulate a cleaning robot run")]
struct Cli {
    /// JSON file with the map, start pose, battery and commands.
    input: PathBuf,
    /// Where to write the final state as JSON.
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let report = run_files(&CleaningInterpreter::default(), &cli.input, &cli.output)
        .with_context(|| format!("cleaning run for {} failed", cli.input.display()))?;

    log::info!(
        "Wrote {} ({:?}, {} commands executed)",
        cli.output.display(),
        report.status,
        report.executed
    );
    Ok(())
}
