//! # hs-data
//!
//! Loading and slicing of the heart-disease patient table.
//!
//! - [`loader`]: CSV → [`PatientTable`] (fail-fast on schema or cell errors)
//! - [`segment`]: subgroups of a numeric column and contingency tables
//! - [`describe`]: descriptive summaries (mean, median, quartiles)

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Descriptive statistics.
pub mod describe;
/// CSV ingestion.
pub mod loader;
/// Column identifiers.
pub mod schema;
/// Subgroups and contingency tables.
pub mod segment;
/// In-memory patient table.
pub mod table;

pub use describe::{Summary, describe};
pub use loader::{read_csv, read_csv_from_reader};
pub use schema::{CategoricalColumn, NumericColumn};
pub use segment::{ContingencyTable, crosstab, segment};
pub use table::{PatientRecord, PatientTable};
