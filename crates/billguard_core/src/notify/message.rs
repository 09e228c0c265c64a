//! Plain-text notice templates.

use super::OutboundMessage;
use crate::model::bill::Bill;
use crate::urgency::BillStatus;

const APP_NAME: &str = "BillGuard Sentinel";

/// Fixed notice sent to self after login.
pub fn login_notice(address: &str) -> OutboundMessage {
    OutboundMessage {
        address: address.to_string(),
        subject: format!("{APP_NAME}: login successful"),
        body: format!(
            "You are signed in to {APP_NAME} as {address}.\n\
             Reminders for bills due within 3 days will be sent to this address."
        ),
    }
}

/// Notice summarising a newly recorded bill.
pub fn bill_added(address: &str, bill: &Bill) -> OutboundMessage {
    OutboundMessage {
        address: address.to_string(),
        subject: format!("{APP_NAME}: bill added - {}", bill.name),
        body: format!("A new bill was recorded.\n\n{}", bill_details(bill)),
    }
}

/// Reminder for one critical bill.
pub fn due_reminder(address: &str, status: &BillStatus) -> OutboundMessage {
    OutboundMessage {
        address: address.to_string(),
        subject: format!("Reminder: {} {}", status.bill.name, due_phrase(status.days_left)),
        body: format!(
            "Pay {} soon!\n\n{}\nStatus: {}",
            status.bill.name,
            bill_details(&status.bill),
            due_phrase(status.days_left)
        ),
    }
}

fn bill_details(bill: &Bill) -> String {
    let category = bill.category.map(|category| category.label()).unwrap_or("-");
    format!(
        "Bill: {}\nAmount: {}\nDue date: {}\nCategory: {}\n",
        bill.name,
        bill.amount.round_dp(2),
        bill.due_date.format("%Y-%m-%d"),
        category
    )
}

fn due_phrase(days_left: i64) -> String {
    match days_left {
        0 => "is due today".to_string(),
        1 => "is due tomorrow".to_string(),
        n if n < 0 => format!("is overdue by {} day(s)", -n),
        n => format!("is due in {n} days"),
    }
}

#[cfg(test)]
mod tests {
    use super::due_phrase;

    #[test]
    fn due_phrase_covers_overdue_today_and_future() {
        assert_eq!(due_phrase(-2), "is overdue by 2 day(s)");
        assert_eq!(due_phrase(0), "is due today");
        assert_eq!(due_phrase(1), "is due tomorrow");
        assert_eq!(due_phrase(3), "is due in 3 days");
    }
}
