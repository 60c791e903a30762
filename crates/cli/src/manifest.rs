//! `config.csv` manifest parsing.
//!
//! Each non-empty line is a key with an optional value. The `data` entry names
//! the dataset file and is consumed here; every other entry is handed to the
//! core configuration resolver untouched.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use geopipe_core::ConfigEntry;

pub const MANIFEST_FILE: &str = "config.csv";
const DATA_KEY: &str = "data";

#[derive(Debug)]
pub struct Manifest {
    /// Dataset file name, relative to the input directory.
    pub data_file: String,
    /// Remaining entries, in manifest order.
    pub entries: Vec<ConfigEntry>,
}

pub fn load_manifest(input_dir: &Path) -> Result<Manifest> {
    let path = input_dir.join(MANIFEST_FILE);
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read manifest '{}'", path.display()))?;
    parse_manifest(&raw)
}

pub fn parse_manifest(raw: &str) -> Result<Manifest> {
    // Rows are ragged (one or two fields) and values may be quoted, so this
    // goes through the csv reader rather than the rectangular polars one.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut data_file = None;
    let mut entries = Vec::new();

    for record in reader.records() {
        let record = record.context("malformed manifest line")?;
        let key = match record.get(0).map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => continue,
        };
        let value = record
            .get(1)
            .map(str::trim)
            .filter(|value| !value.is_empty());

        if key.eq_ignore_ascii_case(DATA_KEY) {
            match value {
                Some(file) => data_file = Some(file.to_string()),
                None => bail!("manifest entry '{DATA_KEY}' requires a file name"),
            }
        } else {
            entries.push(match value {
                Some(value) => ConfigEntry::pair(key, value),
                None => ConfigEntry::flag(key),
            });
        }
    }

    let data_file =
        data_file.context("manifest does not name a data file (missing 'data' entry)")?;
    Ok(Manifest { data_file, entries })
}
