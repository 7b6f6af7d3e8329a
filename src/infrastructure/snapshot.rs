//! Two-column CSV snapshots of indicator values (`indicator,value`)

use crate::domain::indicators::{IndicatorValues, ValueSource};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SnapshotRow {
    indicator: String,
    value: f64,
}

pub fn read_snapshot<R: Read>(reader: R) -> Result<Vec<(String, f64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize::<SnapshotRow>().enumerate() {
        // +2: header line and 1-based numbering
        let row = record.with_context(|| format!("Invalid snapshot row at line {}", i + 2))?;
        rows.push((row.indicator, row.value));
    }
    Ok(rows)
}

/// Apply a snapshot file as manual values. Unknown indicators are an error.
pub fn apply_snapshot_file(values: &mut IndicatorValues, path: &Path) -> Result<usize> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open snapshot {}", path.display()))?;
    let rows = read_snapshot(file)?;
    for (name, value) in &rows {
        values
            .set(name, *value, ValueSource::Manual)
            .with_context(|| format!("Snapshot {} is not usable", path.display()))?;
    }
    info!("Applied {} values from {}", rows.len(), path.display());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_snapshot() {
        let csv = "indicator,value\nVIX, 31.2\nXAU BGNL,1950.5\n";
        let rows = read_snapshot(csv.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![("VIX".to_string(), 31.2), ("XAU BGNL".to_string(), 1950.5)]
        );
    }

    #[test]
    fn test_bad_value_names_the_line() {
        let csv = "indicator,value\nVIX,31.2\nDXY,abc\n";
        let err = read_snapshot(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_unknown_indicator_is_rejected() {
        let dir = std::env::temp_dir().join(format!("cassandra_snapshot_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("snapshot.csv");
        std::fs::write(&path, "indicator,value\nVIX,25\nNOPE,1\n").unwrap();

        let mut values = IndicatorValues::with_defaults(&["VIX"]);
        let err = apply_snapshot_file(&mut values, &path).unwrap_err();
        assert!(format!("{:#}", err).contains("NOPE"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
