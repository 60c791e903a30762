mod commands;
mod io;
mod manifest;
mod pipeline;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::RunCommand;

/// Geopipe CLI - batch address resolution pipeline stage
#[derive(Debug, Parser)]
#[command(
    name = "geopipe",
    version,
    about = "Batch address resolution pipeline stage"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the pipeline over an input directory
    Run(RunCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Run(cmd) => cmd.execute()?,
    };

    std::process::exit(exit_code);
}
