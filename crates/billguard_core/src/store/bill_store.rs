//! In-memory bill sequence backed by one CSV file.
//!
//! # Responsibility
//! - Own the ordered bill list for a session.
//! - Persist the whole list after each append/delete.
//!
//! # Invariants
//! - Insertion order is preserved; deletion never reorders survivors.
//! - In-memory state matches the file after every successful mutation.

use super::csv_file::{read_bills, write_bills};
use super::StoreResult;
use crate::model::bill::Bill;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Result of [`BillStore::load`].
///
/// A missing file is a normal first-run condition and gets its own variant.
#[derive(Debug)]
pub enum LoadedStore {
    /// Bills were read from an existing file.
    Existing(BillStore),
    /// No file existed; the store starts empty and the file is created on
    /// the first mutation.
    Fresh(BillStore),
}

impl LoadedStore {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }

    pub fn into_store(self) -> BillStore {
        match self {
            Self::Existing(store) | Self::Fresh(store) => store,
        }
    }
}

/// Ordered bill collection for the single user.
#[derive(Debug, Clone)]
pub struct BillStore {
    path: PathBuf,
    bills: Vec<Bill>,
}

impl BillStore {
    /// Loads the full bill sequence from `path`.
    ///
    /// # Errors
    /// - Returns `StoreError::Io` when the file exists but cannot be read.
    /// - Returns `StoreError::Csv` / `StoreError::InvalidData` for malformed rows.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<LoadedStore> {
        let path = path.into();
        match read_bills(&path) {
            Ok(Some(bills)) => {
                info!(
                    "event=store_load module=store status=ok source=file rows={}",
                    bills.len()
                );
                Ok(LoadedStore::Existing(Self { path, bills }))
            }
            Ok(None) => {
                info!("event=store_load module=store status=ok source=fresh rows=0");
                Ok(LoadedStore::Fresh(Self {
                    path,
                    bills: Vec::new(),
                }))
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error path={} error={}",
                    path.display(),
                    err
                );
                Err(err)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All bills in insertion order.
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Distinct bill names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for bill in &self.bills {
            if !names.contains(&bill.name.as_str()) {
                names.push(bill.name.as_str());
            }
        }
        names
    }

    /// Appends one bill and rewrites the file.
    ///
    /// The name is stored trimmed, matching what a reload produces.
    ///
    /// # Errors
    /// - Returns `StoreError::Validation` before any mutation when the bill
    ///   is invalid.
    /// - Returns a persistence error after rolling the in-memory append back.
    pub fn append(&mut self, mut bill: Bill) -> StoreResult<()> {
        bill.validate()?;
        bill.name = bill.name.trim().to_string();

        self.bills.push(bill);
        if let Err(err) = write_bills(&self.path, &self.bills) {
            self.bills.pop();
            return Err(err);
        }
        info!(
            "event=bill_append module=store status=ok rows={}",
            self.bills.len()
        );
        Ok(())
    }

    /// Removes every bill whose name equals `name` and rewrites the file.
    ///
    /// Returns the number of removed bills. Matching is exact.
    pub fn delete(&mut self, name: &str) -> StoreResult<usize> {
        let previous = self.bills.clone();
        self.bills.retain(|bill| bill.name != name);
        let removed = previous.len() - self.bills.len();

        if let Err(err) = write_bills(&self.path, &self.bills) {
            self.bills = previous;
            return Err(err);
        }
        if removed == 0 {
            warn!("event=bill_delete module=store status=ok removed=0");
        } else {
            info!(
                "event=bill_delete module=store status=ok removed={} rows={}",
                removed,
                self.bills.len()
            );
        }
        Ok(removed)
    }
}
