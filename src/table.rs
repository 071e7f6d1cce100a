use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::Record;

/// Records unioned into rows and columns.
#[derive(Debug)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Columns are the union of record keys in first-seen order; rows keep
    /// input order. Fails on an empty input rather than producing a file
    /// with no header.
    pub fn from_records(rows: Vec<Record>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut columns: Vec<String> = Vec::new();
        for record in &rows {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }

        Ok(Table { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell values for one row, aligned with [`Table::columns`]. Missing
    /// fields are empty strings.
    pub fn row(&self, idx: usize) -> Option<Vec<&str>> {
        let record = self.rows.get(idx)?;
        Some(
            self.columns
                .iter()
                .map(|c| record.get(c).unwrap_or(""))
                .collect(),
        )
    }

    /// Serialize as comma-delimited UTF-8 with a header row and no index
    /// column.
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.columns)?;
        for idx in 0..self.rows.len() {
            if let Some(cells) = self.row(idx) {
                wtr.write_record(&cells)?;
            }
        }
        wtr.into_inner().map_err(|e| Error::Io(e.into_error()))
    }

    /// Serialize fully in memory, then write `path` in one call, replacing
    /// any existing file.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let bytes = self.to_csv()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

// ── Tests ──
