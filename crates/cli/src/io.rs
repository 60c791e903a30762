//! CSV dataset load/save.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    LazyCsvReader::new(path)
        .finish()
        .and_then(LazyFrame::collect)
        .with_context(|| format!("failed to load dataset '{}'", path.display()))
}

pub fn write_dataset(frame: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(frame)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn round_trips_a_frame_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "address,latitude\nBerlin,52.52\n").unwrap();

        let mut frame = load_dataset(&path).unwrap();
        assert_eq!(frame.height(), 1);

        let out = dir.path().join("out.csv");
        write_dataset(&mut frame, &out).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("address,latitude"));
        assert!(written.contains("Berlin"));
    }

    #[test]
    fn load_reports_the_missing_path() {
        let err = load_dataset(Path::new("/nonexistent/input.csv")).unwrap_err();
        assert!(err.to_string().contains("input.csv"));
    }
}
