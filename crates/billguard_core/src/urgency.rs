//! Due-date urgency classification.
//!
//! # Responsibility
//! - Compute whole days until a bill is due against a reference date.
//! - Map day counts onto urgency tiers and build the dashboard view.
//!
//! # Invariants
//! - Classification is a pure function of `days_left`; nothing is stored.
//! - Boundary values (3 and 7) belong to the more urgent tier.
//! - Dashboard rows are sorted by `days_left` ascending; ties keep store order.

use crate::model::bill::Bill;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Largest `days_left` still classified as critical.
pub const CRITICAL_MAX_DAYS: i64 = 3;
/// Largest `days_left` still classified as warning.
pub const WARNING_MAX_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UrgencyTier {
    /// Due within 3 days, or overdue.
    Critical,
    /// Due in 4 to 7 days.
    Warning,
    /// Due in more than 7 days.
    Normal,
}

impl UrgencyTier {
    pub fn from_days_left(days_left: i64) -> Self {
        if days_left <= CRITICAL_MAX_DAYS {
            Self::Critical
        } else if days_left <= WARNING_MAX_DAYS {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Normal => "normal",
        }
    }
}

impl Display for UrgencyTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole calendar days from `today` until `due`. Negative when overdue.
pub fn days_left(due: NaiveDate, today: NaiveDate) -> i64 {
    (due - today).num_days()
}

pub fn classify(due: NaiveDate, today: NaiveDate) -> UrgencyTier {
    UrgencyTier::from_days_left(days_left(due, today))
}

/// One bill with its derived urgency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillStatus {
    pub bill: Bill,
    pub days_left: i64,
    pub tier: UrgencyTier,
}

impl BillStatus {
    pub fn evaluate(bill: &Bill, today: NaiveDate) -> Self {
        let days_left = days_left(bill.due_date, today);
        Self {
            bill: bill.clone(),
            days_left,
            tier: UrgencyTier::from_days_left(days_left),
        }
    }
}

/// Classified snapshot of the store for one reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub rows: Vec<BillStatus>,
}

impl Dashboard {
    pub fn build(bills: &[Bill], today: NaiveDate) -> Self {
        let mut rows: Vec<BillStatus> = bills
            .iter()
            .map(|bill| BillStatus::evaluate(bill, today))
            .collect();
        rows.sort_by_key(|row| row.days_left);
        Self { today, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in the given tier, in dashboard order.
    pub fn in_tier(&self, tier: UrgencyTier) -> impl Iterator<Item = &BillStatus> {
        self.rows.iter().filter(move |row| row.tier == tier)
    }

    pub fn critical(&self) -> Vec<&BillStatus> {
        self.in_tier(UrgencyTier::Critical).collect()
    }

    /// Number of bills that raise the blocking alert.
    pub fn critical_count(&self) -> usize {
        self.in_tier(UrgencyTier::Critical).count()
    }

    /// Action-required banner text, or `None` when nothing is critical.
    pub fn alert_banner(&self) -> Option<String> {
        match self.critical_count() {
            0 => None,
            count => Some(format!(
                "ACTION REQUIRED: You have {count} bill(s) expiring within 72 hours!"
            )),
        }
    }
}
