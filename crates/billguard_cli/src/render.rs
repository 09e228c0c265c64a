//! Plain terminal rendering of the dashboard and send reports.

use billguard_core::{BillStatus, Dashboard, DispatchReport, UrgencyTier};
use crossterm::style::Stylize;
use crossterm::tty::IsTty;

const NAME_WIDTH: usize = 24;

pub fn print_dashboard(dashboard: &Dashboard) {
    let color = std::io::stdout().is_tty();

    if dashboard.is_empty() {
        println!("No bills recorded yet. Add one with `billguard add`.");
        return;
    }

    if let Some(banner) = dashboard.alert_banner() {
        if color {
            println!("{}", banner.red().bold());
        } else {
            println!("{banner}");
        }
        for status in dashboard.critical() {
            println!("  Pay {} soon!", status.bill.name);
        }
        println!();
    }

    println!("Upcoming bills (today {})", dashboard.today.format("%Y-%m-%d"));
    println!(
        "{:<NAME_WIDTH$} {:>12}  {:<10}  {:<12}  {:>9}",
        "Bill Name", "Amount", "Due Date", "Category", "Days Left"
    );
    for row in &dashboard.rows {
        let line = format_row(row);
        match (color, row.tier) {
            (true, UrgencyTier::Critical) => println!("{}", line.white().on_red()),
            (true, UrgencyTier::Warning) => println!("{}", line.white().on_dark_yellow()),
            _ => println!("{line}"),
        }
    }
}

fn format_row(row: &BillStatus) -> String {
    let category = row
        .bill
        .category
        .map(|category| category.label())
        .unwrap_or("-");
    format!(
        "{:<NAME_WIDTH$} {:>12}  {:<10}  {:<12}  {:>9}",
        truncate(&row.bill.name, NAME_WIDTH),
        row.bill.amount.round_dp(2).to_string(),
        row.bill.due_date.format("%Y-%m-%d").to_string(),
        category,
        row.days_left
    )
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut shortened: String = value.chars().take(width.saturating_sub(1)).collect();
    shortened.push('~');
    shortened
}

pub fn print_dispatch_report(report: &DispatchReport) {
    if report.attempted == 0 {
        println!("No bills are due within 3 days. Nothing sent.");
        return;
    }
    for name in &report.delivered {
        println!("Reminder sent for {name}.");
    }
    for failure in &report.failed {
        println!(
            "Reminder for {} not sent: {}",
            failure.bill_name, failure.error
        );
    }
    println!(
        "{} of {} reminder(s) sent.",
        report.delivered.len(),
        report.attempted
    );
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_names_and_marks_long_ones() {
        assert_eq!(truncate("Rent", 8), "Rent");
        assert_eq!(truncate("Electricity bill", 8), "Electri~");
    }
}
