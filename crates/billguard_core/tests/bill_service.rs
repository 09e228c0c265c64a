mod common;

use billguard_core::{
    AppConfig, Bill, BillCategory, BillService, BillStore, Notifier, RelayTrust, ServiceError,
    SessionError, StoreError, TransportError,
};
use common::{date, ScriptedTransport};
use rust_decimal::Decimal;
use std::path::Path;

fn service<'t>(
    path: &Path,
    transport: &'t ScriptedTransport,
) -> BillService<&'t ScriptedTransport> {
    let store = BillStore::load(path).unwrap().into_store();
    BillService::new(store, Notifier::new(transport))
}

fn bill(name: &str, due: &str) -> Bill {
    Bill::new(name, Decimal::from(1200), date(due)).unwrap()
}

#[test]
fn add_without_session_persists_and_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bills_data.csv");
    let transport = ScriptedTransport::new();
    let mut service = service(&path, &transport);

    let electricity = bill("Electricity", "2024-06-12").with_category(BillCategory::Utility);
    let outcome = service.add_bill(None, electricity.clone()).unwrap();

    assert!(outcome.notice.is_none());
    assert!(transport.sent().is_empty());
    let reloaded = BillStore::load(&path).unwrap().into_store();
    assert_eq!(reloaded.bills(), &[electricity]);
}

#[test]
fn add_with_session_sends_bill_added_notice() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new();
    let mut service = service(&dir.path().join("bills_data.csv"), &transport);
    let mut session = service
        .login("me@example.com", "abcdefghijklmnop")
        .unwrap()
        .session;

    let outcome = service
        .add_bill(Some(&mut session), bill("Rent", "2024-07-01"))
        .unwrap();

    assert!(matches!(outcome.notice, Some(Ok(()))));
    let sent = transport.sent();
    assert_eq!(sent.len(), 2, "login notice then bill-added notice");
    assert!(sent[1].subject.contains("bill added - Rent"));
}

#[test]
fn notice_failure_does_not_roll_back_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bills_data.csv");
    let transport = ScriptedTransport::with_replies(vec![Err(TransportError::Connection(
        "network unreachable".to_string(),
    ))]);
    let mut service = service(&path, &transport);
    let mut session = billguard_core::Session::login("me@example.com", "abcdefghijklmnop").unwrap();

    let outcome = service
        .add_bill(Some(&mut session), bill("Rent", "2024-07-01"))
        .unwrap();

    assert!(matches!(outcome.notice, Some(Err(TransportError::Connection(_)))));
    assert_eq!(BillStore::load(&path).unwrap().into_store().len(), 1);
}

#[test]
fn invalid_bill_is_rejected_before_any_notice() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new();
    let mut service = service(&dir.path().join("bills_data.csv"), &transport);
    let mut session = billguard_core::Session::login("me@example.com", "abcdefghijklmnop").unwrap();
    let mut invalid = bill("Rent", "2024-07-01");
    invalid.name = String::new();

    let err = service.add_bill(Some(&mut session), invalid).unwrap_err();

    assert!(matches!(err, ServiceError::Store(StoreError::Validation(_))));
    assert!(transport.sent().is_empty());
    assert!(service.store().is_empty());
}

#[test]
fn login_with_bad_format_never_contacts_relay() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new();
    let service = service(&dir.path().join("bills_data.csv"), &transport);

    let err = service.login("not-an-address", "abcdefghijklmnop").unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Session(SessionError::MalformedAddress(_))
    ));
    assert!(transport.sent().is_empty());
}

#[test]
fn login_is_provisional_until_relay_answers() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::with_replies(vec![Err(TransportError::Auth(
        "535 bad credentials".to_string(),
    ))]);
    let service = service(&dir.path().join("bills_data.csv"), &transport);

    let outcome = service.login("me@example.com", "wrongpassword").unwrap();

    assert!(matches!(outcome.notice, Err(TransportError::Auth(_))));
    assert_eq!(outcome.session.trust(), RelayTrust::Rejected);
}

#[test]
fn failed_relay_login_during_alerts_attempts_all_and_keeps_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bills_data.csv");
    let setup = ScriptedTransport::new();
    {
        let mut service = service(&path, &setup);
        for (name, due) in [
            ("Phone", "2024-06-11"),
            ("Water", "2024-06-13"),
            ("Insurance", "2024-06-30"),
        ] {
            service.add_bill(None, bill(name, due)).unwrap();
        }
    }
    let before = std::fs::read_to_string(&path).unwrap();

    let rejecting = ScriptedTransport::with_replies(vec![
        Err(TransportError::Auth("535 bad credentials".to_string())),
        Err(TransportError::Auth("535 bad credentials".to_string())),
    ]);
    let service = service(&path, &rejecting);
    let mut session = billguard_core::Session::login("me@example.com", "wrongpassword").unwrap();

    let report = service.send_critical_alerts(&mut session, date("2024-06-10"));

    assert_eq!(report.attempted, 2);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(rejecting.sent().len(), 2);
    assert_eq!(service.store().len(), 3);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn pay_bill_removes_all_matches_and_dashboard_reflects_it() {
    let dir = tempfile::tempdir().unwrap();
    let transport = ScriptedTransport::new();
    let mut service = service(&dir.path().join("bills_data.csv"), &transport);
    service.add_bill(None, bill("Rent", "2024-06-11")).unwrap();
    service.add_bill(None, bill("Gym", "2024-06-12")).unwrap();
    service.add_bill(None, bill("Rent", "2024-07-11")).unwrap();

    assert_eq!(service.pay_bill("Rent").unwrap(), 2);

    let dashboard = service.dashboard(date("2024-06-10"));
    assert_eq!(dashboard.rows.len(), 1);
    assert_eq!(dashboard.rows[0].bill.name, "Gym");
}

#[test]
fn open_uses_configured_data_file_and_relay() {
    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("custom.csv");
    let data_file_str = data_file.to_str().unwrap().to_string();
    let config = AppConfig::from_lookup(|key| match key {
        "BILLGUARD_DATA_FILE" => Some(data_file_str.clone()),
        "BILLGUARD_SMTP_HOST" => Some("smtp.example.com".to_string()),
        "BILLGUARD_SMTP_PORT" => Some("2465".to_string()),
        _ => None,
    })
    .unwrap();

    let service = BillService::open(&config).unwrap();

    assert_eq!(service.store().path(), data_file.as_path());
    assert_eq!(service.notifier().transport().host(), "smtp.example.com");
    assert_eq!(service.notifier().transport().port(), 2465);
}
