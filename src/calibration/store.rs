use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::table::{CalibrationRow, CalibrationSource, Subfolder, TableId, TableKind};
use crate::cost::CostMetric;

/// Columns every table must carry. `second arg` may be absent.
const REQUIRED_COLUMNS: [&str; 8] = [
    "first arg",
    "Full width",
    "Full depth",
    "CNOT count",
    "1-qubit Clifford count",
    "M count",
    "T count",
    "T depth",
];

/// Errors from reading calibration tables.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("calibration table has no header row")]
    MissingHeader,

    #[error("calibration table has no {0:?} column")]
    MissingColumn(&'static str),

    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<CalibrationError>,
    },
}

/// Reads the comma-separated output of a resource-estimation run.
///
/// Columns are matched by header name, so extra columns and any column order
/// are accepted. Whitespace around fields is trimmed and quoted fields may
/// contain commas.
pub fn read_calibration_csv<R: io::Read>(
    input: R,
) -> Result<Vec<CalibrationRow>, CalibrationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?;
    if headers.is_empty() {
        return Err(CalibrationError::MissingHeader);
    }
    if let Some(missing) = REQUIRED_COLUMNS
        .into_iter()
        .find(|name| !headers.iter().any(|h| h == *name))
    {
        return Err(CalibrationError::MissingColumn(missing));
    }

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn parse_calibration_csv(text: &str) -> Result<Vec<CalibrationRow>, CalibrationError> {
    read_calibration_csv(text.as_bytes())
}

/// In-memory calibration tables, loaded once and shared read-only.
#[derive(Clone, Debug, Default)]
pub struct CalibrationStore {
    tables: HashMap<TableId, Vec<CalibrationRow>>,
}

impl CalibrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: TableId, rows: Vec<CalibrationRow>) {
        self.tables.insert(table, rows);
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Loads every table under `<root>/<kind>/<subfolder>/`.
    ///
    /// File stems ending in `-all-gates` are AllGates tables, the rest TGates.
    /// Controlled-operation tables are skipped. Missing directories are not an
    /// error; lookups against them fall through to the closed-form estimates.
    pub fn load_dir(root: impl AsRef<Path>, subfolder: Subfolder) -> Result<Self, CalibrationError> {
        let mut store = Self::new();
        for kind in TableKind::ALL {
            let dir = root.as_ref().join(kind.dir_name()).join(subfolder.dir_name());
            if !dir.is_dir() {
                debug!(dir = %dir.display(), "calibration directory not found");
                continue;
            }
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if stem.ends_with("-controlled") {
                    continue;
                }
                let (name, metric) = match stem.strip_suffix(CostMetric::AllGates.file_suffix()) {
                    Some(name) => (name, CostMetric::AllGates),
                    None => (stem, CostMetric::TGates),
                };
                let table = TableId::new(kind, name, metric);
                let rows = File::open(&path)
                    .map_err(CalibrationError::from)
                    .and_then(read_calibration_csv)
                    .map_err(|source| CalibrationError::InFile {
                        path: path.clone(),
                        source: Box::new(source),
                    })?;
                debug!(%table, rows = rows.len(), "loaded calibration table");
                store.insert(table, rows);
            }
        }
        Ok(store)
    }
}

impl CalibrationSource for CalibrationStore {
    fn rows(&self, table: &TableId) -> &[CalibrationRow] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Operation, CNOT count, 1-qubit Clifford count, T count, R count, M count, T depth, Initial width, Extra width, Full depth, Full width, first arg, second arg
Quantum.Chaskey.ChaskeyAttackEstimate, 1200, 300, 560, 0, 40, 22, 110, 30, 480, 140, 8, 48

Quantum.Chaskey.ChaskeyAttackEstimate, 1300, 310, 600, 0, 44, 24, 112, 31, 500, 143, 8, 50
";

    #[test]
    fn test_parse_sample_table() {
        let rows = parse_calibration_csv(SAMPLE).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].first_arg, "8");
        assert_eq!(rows[0].second_arg, "48");
        assert_eq!(rows[0].cnot_count, 1200);
        assert_eq!(rows[0].full_width, 140);
        assert_eq!(rows[1].second_arg, "50");
        assert_eq!(rows[1].t_depth, 24);
        assert_eq!(rows[1].full_depth, 500);
    }

    #[test]
    fn test_parse_quoted_operation_name() {
        let text = "\
Operation, CNOT count, 1-qubit Clifford count, T count, M count, T depth, Full depth, Full width, first arg, second arg
\"Quantum.Rank(4, 22)\", 1000, 500, 700, 12, 30, 256, 150, 4, 22
";
        let rows = parse_calibration_csv(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].first_arg, "4");
        assert_eq!(rows[0].second_arg, "22");
        assert_eq!(rows[0].cnot_count, 1000);
        assert_eq!(rows[0].clifford_count, 500);
        assert_eq!(rows[0].measure_count, 12);
        assert_eq!(rows[0].full_width, 150);
    }

    #[test]
    fn test_parse_without_second_arg() {
        let text = "first arg, Full width, Full depth, CNOT count, 1-qubit Clifford count, M count, T count, T depth\n\
                    64, 300, 1024, 10, 10, 0, 40, 8\n";
        let rows = parse_calibration_csv(text).unwrap();
        assert_eq!(rows[0].first_arg, "64");
        assert_eq!(rows[0].second_arg, "");
        assert_eq!(rows[0].t_count, 40);
    }

    #[test]
    fn test_parse_missing_column() {
        let err = parse_calibration_csv("first arg, second arg, Full width\n1, 2, 3\n").unwrap_err();
        assert!(matches!(err, CalibrationError::MissingColumn("Full depth")));
    }

    #[test]
    fn test_parse_bad_number() {
        let text = SAMPLE.replace("1300", "13x0");
        match parse_calibration_csv(&text).unwrap_err() {
            CalibrationError::Csv(err) => {
                assert!(matches!(err.kind(), csv::ErrorKind::Deserialize { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_short_row() {
        let text = format!("{SAMPLE}Quantum.Chaskey, 1, 2\n");
        match parse_calibration_csv(&text).unwrap_err() {
            CalibrationError::Csv(err) => {
                assert!(matches!(err.kind(), csv::ErrorKind::UnequalLengths { len: 3, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(
            parse_calibration_csv(""),
            Err(CalibrationError::MissingHeader)
        ));
    }

    #[test]
    fn test_store_lookup_uses_inserted_rows() {
        let mut store = CalibrationStore::new();
        let table = TableId::cipher("Chaskey", CostMetric::TGates);
        store.insert(table.clone(), parse_calibration_csv(SAMPLE).unwrap());
        assert_eq!(store.table_count(), 1);
        assert_eq!(store.rows(&table).len(), 2);
        assert!(store.rows(&TableId::rank(CostMetric::TGates)).is_empty());

        let cost = store.lookup(&table, "8", Some("50"), 6.0, true).unwrap();
        assert_eq!(cost.gates, 600f64.log2());
    }
}
