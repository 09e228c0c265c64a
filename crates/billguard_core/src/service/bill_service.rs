//! Bill use-case service.
//!
//! # Responsibility
//! - Expose add / pay / dashboard / login / alert entry points.
//! - Sequence store writes before the notices they trigger.
//!
//! # Invariants
//! - A send failure never rolls back or blocks a store mutation.
//! - Validation failures leave the store untouched.
//! - Session state is passed in explicitly; the service holds none.

use crate::config::AppConfig;
use crate::model::bill::Bill;
use crate::notify::{DispatchReport, MailTransport, Notifier, SmtpRelay, TransportResult};
use crate::session::{Session, SessionError};
use crate::store::{BillStore, StoreError};
use crate::urgency::Dashboard;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Session(SessionError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Session(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<SessionError> for ServiceError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

/// Result of a format-checked login.
#[derive(Debug)]
pub struct LoginOutcome {
    /// Provisional until the relay accepts a message.
    pub session: Session,
    /// Delivery result of the login notice.
    pub notice: TransportResult<()>,
}

/// Result of a successful append.
#[derive(Debug)]
pub struct AddBillOutcome {
    pub bill: Bill,
    /// `None` when no session was active.
    pub notice: Option<TransportResult<()>>,
}

/// Use-case service wrapping the store and notifier.
pub struct BillService<T: MailTransport> {
    store: BillStore,
    notifier: Notifier<T>,
}

impl BillService<SmtpRelay> {
    /// Loads the configured data file and wires the configured relay.
    pub fn open(config: &AppConfig) -> ServiceResult<Self> {
        let store = BillStore::load(config.data_file.clone())?.into_store();
        let relay = SmtpRelay::new(config.smtp_host.clone(), config.smtp_port);
        Ok(Self::new(store, Notifier::new(relay)))
    }
}

impl<T: MailTransport> BillService<T> {
    pub fn new(store: BillStore, notifier: Notifier<T>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &BillStore {
        &self.store
    }

    pub fn notifier(&self) -> &Notifier<T> {
        &self.notifier
    }

    /// Classifies every stored bill against `today`.
    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        Dashboard::build(self.store.bills(), today)
    }

    /// Opens a session and sends the login notice.
    ///
    /// A notice failure does not undo the login; it is reported in the
    /// outcome and leaves the session marked by the relay's verdict.
    pub fn login(&self, address: &str, credential: &str) -> ServiceResult<LoginOutcome> {
        let mut session = Session::login(address, credential)?;
        let notice = self.notifier.notify_login(&mut session);
        Ok(LoginOutcome { session, notice })
    }

    /// Appends a bill, then sends a bill-added notice when logged in.
    pub fn add_bill(
        &mut self,
        session: Option<&mut Session>,
        bill: Bill,
    ) -> ServiceResult<AddBillOutcome> {
        self.store.append(bill.clone())?;
        let notice = session.map(|session| self.notifier.notify_bill_added(session, &bill));
        Ok(AddBillOutcome { bill, notice })
    }

    /// Deletes every bill named `name`. Returns the number removed.
    pub fn pay_bill(&mut self, name: &str) -> ServiceResult<usize> {
        Ok(self.store.delete(name)?)
    }

    /// Sends one reminder per bill that is critical on `today`.
    pub fn send_critical_alerts(&self, session: &mut Session, today: NaiveDate) -> DispatchReport {
        let dashboard = self.dashboard(today);
        self.notifier.send_critical_alerts(session, &dashboard)
    }
}
