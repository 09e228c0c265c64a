//! Notice dispatch for the three lifecycle events.
//!
//! # Invariants
//! - One transport call per message; no retry.
//! - A failed send updates session trust and is returned, never raised.
//! - Critical batches attempt every bill even after a failure.

use super::message;
use super::{MailTransport, OutboundMessage, TransportError, TransportResult};
use crate::model::bill::Bill;
use crate::session::Session;
use crate::urgency::Dashboard;
use log::{error, info};
use std::time::Instant;

/// Failed send for one bill in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub bill_name: String,
    pub error: TransportError,
}

/// Outcome of a critical-alert batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub delivered: Vec<String>,
    pub failed: Vec<DispatchFailure>,
}

impl DispatchReport {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sends notices through a [`MailTransport`].
pub struct Notifier<T: MailTransport> {
    transport: T,
}

impl<T: MailTransport> Notifier<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends the fixed login notice to the session address.
    pub fn notify_login(&self, session: &mut Session) -> TransportResult<()> {
        let message = message::login_notice(session.address());
        self.dispatch(session, &message, "login_notice")
    }

    /// Sends a summary of a newly added bill.
    pub fn notify_bill_added(&self, session: &mut Session, bill: &Bill) -> TransportResult<()> {
        let message = message::bill_added(session.address(), bill);
        self.dispatch(session, &message, "bill_added")
    }

    /// Sends one reminder per critical bill in `dashboard`, in dashboard order.
    pub fn send_critical_alerts(
        &self,
        session: &mut Session,
        dashboard: &Dashboard,
    ) -> DispatchReport {
        let mut report = DispatchReport::default();
        for status in dashboard.critical() {
            report.attempted += 1;
            let message = message::due_reminder(session.address(), status);
            match self.dispatch(session, &message, "due_reminder") {
                Ok(()) => report.delivered.push(status.bill.name.clone()),
                Err(error) => report.failed.push(DispatchFailure {
                    bill_name: status.bill.name.clone(),
                    error,
                }),
            }
        }
        info!(
            "event=alert_batch module=notify status={} attempted={} delivered={} failed={}",
            if report.all_delivered() { "ok" } else { "partial" },
            report.attempted,
            report.delivered.len(),
            report.failed.len()
        );
        report
    }

    fn dispatch(
        &self,
        session: &mut Session,
        message: &OutboundMessage,
        kind: &str,
    ) -> TransportResult<()> {
        let started_at = Instant::now();
        match self.transport.send(message, session.credential()) {
            Ok(()) => {
                session.record_delivery();
                info!(
                    "event=mail_send module=notify status=ok kind={} duration_ms={}",
                    kind,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                if matches!(err, TransportError::Auth(_)) {
                    session.record_rejection();
                }
                error!(
                    "event=mail_send module=notify status=error kind={} duration_ms={} error_code={} error={}",
                    kind,
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }
}
