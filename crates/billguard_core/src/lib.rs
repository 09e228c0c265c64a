//! Core domain logic for BillGuard.
//! This crate is the single source of truth for bill, urgency and reminder rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod session;
pub mod store;
pub mod urgency;

pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::bill::{Bill, BillCategory, BillValidationError};
pub use notify::{
    DispatchFailure, DispatchReport, MailTransport, Notifier, OutboundMessage, SmtpRelay,
    TransportError, TransportResult,
};
pub use service::bill_service::{
    AddBillOutcome, BillService, LoginOutcome, ServiceError, ServiceResult,
};
pub use session::{RelayCredential, RelayTrust, Session, SessionError};
pub use store::{BillStore, LoadedStore, StoreError, StoreResult};
pub use urgency::{classify, days_left, BillStatus, Dashboard, UrgencyTier};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
