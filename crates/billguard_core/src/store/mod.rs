//! Flat-file bill storage.
//!
//! # Responsibility
//! - Load the full bill sequence from a CSV file into memory.
//! - Rewrite the full sequence after every mutation.
//!
//! # Invariants
//! - A missing file is a fresh empty store, never an error.
//! - Write paths validate bills before touching the file.
//! - Malformed persisted rows are rejected instead of skipped.

use crate::model::bill::BillValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod bill_store;
mod csv_file;

pub use bill_store::{BillStore, LoadedStore};
pub use csv_file::CSV_HEADERS;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by store load/persist paths.
#[derive(Debug)]
pub enum StoreError {
    Validation(BillValidationError),
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "bill file I/O failed: {err}"),
            Self::Csv(err) => write!(f, "bill file CSV error: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted bill data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<BillValidationError> for StoreError {
    fn from(value: BillValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for StoreError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
