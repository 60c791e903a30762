use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::Level;

use crate::pipeline;

const INPUT_ENV: &str = "GEOPIPE_INPUT";
const OUTPUT_ENV: &str = "GEOPIPE_OUTPUT";

/// Run the address resolution pipeline over an input directory
#[derive(Debug, Parser)]
pub struct RunCommand {
    /// Input directory containing config.csv and the data file
    #[arg(long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output directory for address.csv
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Override the provider base URL (for testing against a local service)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunCommand {
    pub fn execute(&self) -> Result<i32> {
        init_logging(self.verbose);

        let input = resolve_dir(self.input.clone(), INPUT_ENV, "input")?;
        let output = resolve_dir(self.output.clone(), OUTPUT_ENV, "output")?;

        let base_url = self.base_url.as_deref();
        let factory =
            |config: &geopipe_core::ResolverConfig| geopipe_nominatim::provider_for(config, base_url);
        pipeline::run(&input, &output, &factory)?;

        Ok(0)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    // try_init so tests invoking execute() twice do not panic
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

fn resolve_dir(flag: Option<PathBuf>, env_var: &str, role: &str) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    match std::env::var_os(env_var) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => bail!("no {role} directory given (pass --{role} or set {env_var})"),
    }
}
