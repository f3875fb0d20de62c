//! CSV ingestion.
//!
//! Strategy: read the header, map every required column to its position
//! (order is free, extra columns are ignored), then parse each row into a
//! typed [`PatientRecord`]. The first bad cell aborts the load with an error
//! naming its row and column. Missing values are never imputed.

use std::io::Read;
use std::path::Path;

use hs_core::{Error, Result};

use crate::schema::REQUIRED_COLUMNS;
use crate::table::{PatientRecord, PatientTable};

/// Cell spellings treated as a missing value.
const MISSING_MARKERS: [&str; 5] = ["", "na", "nan", "?", "null"];

/// Load the patient table from a comma-delimited file with a header row.
pub fn read_csv(path: &Path) -> Result<PatientTable> {
    tracing::info!(path = %path.display(), "loading patient table");
    let file = std::fs::File::open(path)?;
    let table = read_csv_from_reader(file)?;
    tracing::info!(rows = table.len(), "patient table loaded");
    Ok(table)
}

/// Load the patient table from any reader (header row required).
pub fn read_csv_from_reader<R: Read>(reader: R) -> Result<PatientTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let index = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result?;
        records.push(index.parse_row(row, &record)?);
    }

    if records.is_empty() {
        return Err(Error::Validation("input contains no data rows".into()));
    }
    tracing::debug!(rows = records.len(), columns = headers.len(), "parsed CSV rows");
    Ok(PatientTable::new(records))
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    positions: [usize; REQUIRED_COLUMNS.len()],
}

impl ColumnIndex {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
            positions[slot] = headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == *name)
                .ok_or_else(|| {
                    Error::Schema(format!(
                        "missing required column '{}' (found: {})",
                        name,
                        headers.join(", ")
                    ))
                })?;
        }
        Ok(Self { positions })
    }

    fn cell<'r>(&self, row: usize, record: &'r csv::StringRecord, slot: usize) -> Result<&'r str> {
        let column = REQUIRED_COLUMNS[slot];
        let raw = record.get(self.positions[slot]).ok_or_else(|| Error::Parse {
            row,
            column: column.to_string(),
            message: "row is shorter than the header".into(),
        })?;
        if MISSING_MARKERS.iter().any(|m| raw.eq_ignore_ascii_case(m)) {
            return Err(Error::Parse {
                row,
                column: column.to_string(),
                message: "missing value".into(),
            });
        }
        Ok(raw)
    }

    fn number(&self, row: usize, record: &csv::StringRecord, slot: usize) -> Result<f64> {
        let raw = self.cell(row, record, slot)?;
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(Error::Parse {
                row,
                column: REQUIRED_COLUMNS[slot].to_string(),
                message: format!("expected a finite number, got '{}'", raw),
            }),
        }
    }

    fn label(&self, row: usize, record: &csv::StringRecord, slot: usize) -> Result<String> {
        Ok(self.cell(row, record, slot)?.to_string())
    }

    fn flag(&self, row: usize, record: &csv::StringRecord, slot: usize) -> Result<bool> {
        let raw = self.cell(row, record, slot)?;
        if raw.eq_ignore_ascii_case("true") {
            return Ok(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Ok(false);
        }
        match raw.parse::<f64>() {
            Ok(v) if v == 1.0 => Ok(true),
            Ok(v) if v == 0.0 => Ok(false),
            _ => Err(Error::Parse {
                row,
                column: REQUIRED_COLUMNS[slot].to_string(),
                message: format!("expected 0/1 or true/false, got '{}'", raw),
            }),
        }
    }

    fn parse_row(&self, row: usize, record: &csv::StringRecord) -> Result<PatientRecord> {
        // Slots follow REQUIRED_COLUMNS order.
        Ok(PatientRecord {
            age: self.number(row, record, 0)?,
            sex: self.label(row, record, 1)?,
            trestbps: self.number(row, record, 2)?,
            chol: self.number(row, record, 3)?,
            cp: self.label(row, record, 4)?,
            exang: self.flag(row, record, 5)?,
            fbs: self.flag(row, record, 6)?,
            thalach: self.number(row, record, 7)?,
            heart_disease: self.label(row, record, 8)?,
        })
    }
}
