//! Run orchestration: manifest -> configuration -> dataset -> engine -> output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use geopipe_core::{resolve, resolve_config, CoreError, GeocodeProvider, ResolverConfig};
use tracing::info;

use crate::io::{load_dataset, write_dataset};
use crate::manifest::load_manifest;

pub const OUTPUT_FILE: &str = "address.csv";

/// Builds the provider once the configuration names it. Injected so tests can
/// substitute a scripted provider for the whole run.
pub type ProviderFactory<'a> = &'a dyn Fn(&ResolverConfig) -> Result<Box<dyn GeocodeProvider>>;

/// Runs one pipeline invocation and returns the path of the written output.
///
/// Any failure aborts the run before the output file is created, so no
/// partial artifact is ever persisted.
pub fn run(input_dir: &Path, output_dir: &Path, factory: ProviderFactory<'_>) -> Result<PathBuf> {
    let manifest = load_manifest(input_dir)?;
    // Core failures surface as one classified CoreError so callers can tell
    // them apart from I/O problems around the engine.
    let (direction, config) = resolve_config(&manifest.entries).map_err(CoreError::from)?;

    let data_path = input_dir.join(&manifest.data_file);
    let data = load_dataset(&data_path)?;
    info!(
        rows = data.height(),
        ?direction,
        data = %data_path.display(),
        "loaded dataset"
    );

    let provider = factory(&config)?;
    let mut resolved =
        resolve(data, direction, &config, provider.as_ref()).map_err(CoreError::from)?;

    fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create output directory '{}'", output_dir.display())
    })?;
    let output_path = output_dir.join(OUTPUT_FILE);
    write_dataset(&mut resolved, &output_path)?;
    info!(output = %output_path.display(), "pipeline run complete");

    Ok(output_path)
}
