//! Error types for heartstat

use thiserror::Error;

/// heartstat error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input header does not carry a required column
    #[error("Schema error: {0}")]
    Schema(String),

    /// A cell could not be parsed into its column type
    #[error("Parse error at row {row}, column '{column}': {message}")]
    Parse {
        /// 1-based data row (header excluded).
        row: usize,
        /// Column name as it appears in the header.
        column: String,
        /// What went wrong.
        message: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_row_and_column() {
        let e = Error::Parse { row: 7, column: "chol".into(), message: "missing value".into() };
        let msg = e.to_string();
        assert!(msg.contains("row 7"));
        assert!(msg.contains("'chol'"));
        assert!(msg.contains("missing value"));
    }

    #[test]
    fn io_error_converts() {
        fn open() -> Result<Vec<u8>> {
            Ok(std::fs::read("/definitely/not/a/real/path.csv")?)
        }
        assert!(matches!(open(), Err(Error::Io(_))));
    }

    #[test]
    fn csv_error_converts() {
        fn first_record() -> Result<csv::StringRecord> {
            let mut rdr = csv::ReaderBuilder::new().from_reader("a,b\n1,2,3\n".as_bytes());
            Ok(rdr.records().next().expect("one record")?)
        }
        assert!(matches!(first_record(), Err(Error::Csv(_))));
    }
}
