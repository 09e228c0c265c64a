//! Bill domain model.
//!
//! # Responsibility
//! - Define the record persisted by the store and rendered by the dashboard.
//! - Provide the category label set offered by the add-bill form.
//!
//! # Invariants
//! - `name` is stored trimmed and is never empty.
//! - `amount` is `>= 0`.
//! - `due_date` is a local calendar date with no time component.
//! - Names are not unique; callers must not rely on name identity.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Optional label attached to a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillCategory {
    Utility,
    #[serde(rename = "EMI")]
    Emi,
    Subscription,
    Other,
}

impl BillCategory {
    /// All labels in form order.
    pub const ALL: [BillCategory; 4] = [
        BillCategory::Utility,
        BillCategory::Emi,
        BillCategory::Subscription,
        BillCategory::Other,
    ];

    /// Display and storage label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utility => "Utility",
            Self::Emi => "EMI",
            Self::Subscription => "Subscription",
            Self::Other => "Other",
        }
    }
}

impl Display for BillCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BillCategory {
    type Err = BillValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| BillValidationError::UnknownCategory(trimmed.to_string()))
    }
}

/// Validation failures for bill records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillValidationError {
    EmptyName,
    NegativeAmount(Decimal),
    UnknownCategory(String),
    DueDateInPast { due: NaiveDate, today: NaiveDate },
}

impl Display for BillValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "bill name cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "bill amount must be >= 0, got {amount}")
            }
            Self::UnknownCategory(value) => write!(
                f,
                "unknown category `{value}`; expected Utility|EMI|Subscription|Other"
            ),
            Self::DueDateInPast { due, today } => write!(
                f,
                "due date {} is before today ({})",
                due.format("%Y-%m-%d"),
                today.format("%Y-%m-%d")
            ),
        }
    }
}

impl Error for BillValidationError {}

/// A single financial obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: Option<BillCategory>,
}

impl Bill {
    /// Creates a validated bill without a category.
    ///
    /// The name is trimmed before validation.
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        due_date: NaiveDate,
    ) -> Result<Self, BillValidationError> {
        let bill = Self {
            name: name.into().trim().to_string(),
            amount,
            due_date,
            category: None,
        };
        bill.validate()?;
        Ok(bill)
    }

    /// Sets the category label.
    pub fn with_category(mut self, category: BillCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Checks field invariants.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is empty or whitespace-only.
    /// - `NegativeAmount` when `amount < 0`.
    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.name.trim().is_empty() {
            return Err(BillValidationError::EmptyName);
        }
        if self.amount < Decimal::ZERO {
            return Err(BillValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }

    /// Entry-time check used by the add-bill form.
    ///
    /// Stored bills may become overdue later, so `validate` does not apply it.
    pub fn ensure_due_from(&self, today: NaiveDate) -> Result<(), BillValidationError> {
        if self.due_date < today {
            return Err(BillValidationError::DueDateInPast {
                due: self.due_date,
                today,
            });
        }
        Ok(())
    }

    /// One-line human summary used in notices and CLI output.
    pub fn summary(&self) -> String {
        let category = self
            .category
            .map(BillCategory::label)
            .unwrap_or("Uncategorized");
        format!(
            "{} | amount {} | due {} | {}",
            self.name,
            self.amount.round_dp(2),
            self.due_date.format("%Y-%m-%d"),
            category
        )
    }
}
