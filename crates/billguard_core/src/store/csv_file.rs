//! CSV encoding and file replacement for the bill sequence.
//!
//! # Invariants
//! - The header row is always written, even for an empty store.
//! - The target file is replaced by rename, so readers see either the old
//!   or the new sequence.

use super::{StoreError, StoreResult};
use crate::model::bill::{Bill, BillCategory};
use chrono::NaiveDate;
use log::{error, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

/// Column names of the persisted file, in order.
pub const CSV_HEADERS: [&str; 4] = ["Bill Name", "Amount", "Due Date", "Category"];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, Deserialize)]
struct BillRow {
    #[serde(rename = "Bill Name")]
    name: String,
    #[serde(rename = "Amount", with = "rust_decimal::serde::str")]
    amount: Decimal,
    #[serde(rename = "Due Date")]
    due_date: String,
    // Older files have no Category column at all.
    #[serde(rename = "Category", default)]
    category: Option<String>,
}

impl From<&Bill> for BillRow {
    fn from(bill: &Bill) -> Self {
        Self {
            name: bill.name.clone(),
            amount: bill.amount,
            due_date: bill.due_date.format(DATE_FORMAT).to_string(),
            category: bill.category.map(|category| category.label().to_string()),
        }
    }
}

impl BillRow {
    fn into_bill(self, line: usize) -> StoreResult<Bill> {
        let due_date = parse_due_date(&self.due_date).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "line {line}: invalid due date `{}` in column `Due Date`",
                self.due_date
            ))
        })?;

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<BillCategory>().map_err(|err| {
                StoreError::InvalidData(format!("line {line}: {err}"))
            })?),
        };

        let bill = Bill {
            name: self.name,
            amount: self.amount,
            due_date,
            category,
        };
        bill.validate()
            .map_err(|err| StoreError::InvalidData(format!("line {line}: {err}")))?;
        Ok(bill)
    }
}

// Accepts a trailing time component, which some spreadsheet exports add.
fn parse_due_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date_part = trimmed.split([' ', 'T']).next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// Reads all bills from `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub(crate) fn read_bills(path: &Path) -> StoreResult<Option<Vec<Bill>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut bills = Vec::new();
    for (index, row) in reader.deserialize::<BillRow>().enumerate() {
        // Line 1 is the header.
        bills.push(row?.into_bill(index + 2)?);
    }
    Ok(Some(bills))
}

/// Replaces `path` with the full encoded bill sequence.
///
/// # Side effects
/// - Creates the parent directory when missing.
/// - Emits `store_persist` logging events with row count and duration.
pub(crate) fn write_bills(path: &Path, bills: &[Bill]) -> StoreResult<()> {
    let started_at = Instant::now();
    match replace_file(path, bills) {
        Ok(()) => {
            info!(
                "event=store_persist module=store status=ok rows={} duration_ms={}",
                bills.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=store_persist module=store status=error rows={} duration_ms={} error={}",
                bills.len(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn replace_file(path: &Path, bills: &[Bill]) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // Dropped (and removed) on every early return below.
    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file_mut());
        writer.write_record(CSV_HEADERS)?;
        for bill in bills {
            writer.serialize(BillRow::from(bill))?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| StoreError::Io(err.error))?;
    Ok(())
}
