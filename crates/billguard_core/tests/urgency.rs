mod common;

use billguard_core::{classify, days_left, Bill, Dashboard, UrgencyTier};
use common::date;
use rust_decimal::Decimal;

fn bill(name: &str, due: &str) -> Bill {
    Bill::new(name, Decimal::from(100), date(due)).unwrap()
}

#[test]
fn days_left_is_exact_and_signed() {
    let today = date("2024-06-10");
    assert_eq!(days_left(date("2024-06-12"), today), 2);
    assert_eq!(days_left(date("2024-06-10"), today), 0);
    assert_eq!(days_left(date("2024-06-07"), today), -3);
    // Crosses a month and a leap day.
    assert_eq!(days_left(date("2024-03-01"), date("2024-02-28")), 2);
}

#[test]
fn reference_examples_classify_as_documented() {
    let today = date("2024-06-10");
    assert_eq!(classify(date("2024-06-12"), today), UrgencyTier::Critical);
    assert_eq!(classify(date("2024-06-15"), today), UrgencyTier::Warning);
    assert_eq!(classify(date("2024-06-25"), today), UrgencyTier::Normal);
}

#[test]
fn boundaries_belong_to_the_more_urgent_tier() {
    assert_eq!(UrgencyTier::from_days_left(i64::MIN), UrgencyTier::Critical);
    assert_eq!(UrgencyTier::from_days_left(-1), UrgencyTier::Critical);
    assert_eq!(UrgencyTier::from_days_left(3), UrgencyTier::Critical);
    assert_eq!(UrgencyTier::from_days_left(4), UrgencyTier::Warning);
    assert_eq!(UrgencyTier::from_days_left(7), UrgencyTier::Warning);
    assert_eq!(UrgencyTier::from_days_left(8), UrgencyTier::Normal);
}

#[test]
fn dashboard_sorts_by_days_left_and_keeps_store_order_on_ties() {
    let bills = vec![
        bill("Insurance", "2024-06-25"),
        bill("Phone", "2024-06-12"),
        bill("Gym", "2024-06-15"),
        bill("Water", "2024-06-12"),
        bill("Rent", "2024-06-08"),
    ];

    let dashboard = Dashboard::build(&bills, date("2024-06-10"));
    let order: Vec<(&str, i64, UrgencyTier)> = dashboard
        .rows
        .iter()
        .map(|row| (row.bill.name.as_str(), row.days_left, row.tier))
        .collect();

    assert_eq!(
        order,
        vec![
            ("Rent", -2, UrgencyTier::Critical),
            ("Phone", 2, UrgencyTier::Critical),
            ("Water", 2, UrgencyTier::Critical),
            ("Gym", 5, UrgencyTier::Warning),
            ("Insurance", 15, UrgencyTier::Normal),
        ]
    );
    assert_eq!(dashboard.critical_count(), 3);
    assert_eq!(
        dashboard.alert_banner().as_deref(),
        Some("ACTION REQUIRED: You have 3 bill(s) expiring within 72 hours!")
    );
}

#[test]
fn dashboard_is_idempotent_without_mutation() {
    let bills = vec![bill("Phone", "2024-06-12"), bill("Gym", "2024-06-15")];
    let today = date("2024-06-10");

    let first = Dashboard::build(&bills, today);
    let second = Dashboard::build(&bills, today);
    assert_eq!(first, second);
    assert_eq!(first.critical(), second.critical());
}

#[test]
fn empty_or_calm_dashboard_has_no_banner() {
    let today = date("2024-06-10");
    assert!(Dashboard::build(&[], today).alert_banner().is_none());

    let calm = Dashboard::build(&[bill("Insurance", "2024-07-25")], today);
    assert_eq!(calm.critical_count(), 0);
    assert!(calm.alert_banner().is_none());
}
