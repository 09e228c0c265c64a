//! Reminder mail composition and dispatch.
//!
//! # Responsibility
//! - Define the outbound transport seam used by the dispatcher.
//! - Compose plain-text notices for login, bill creation and due reminders.
//! - Send one message per call with no retry or queueing.
//!
//! # Invariants
//! - Every message is addressed from and to the session address.
//! - Transport failures are returned to the caller, never panicked on.
//! - Message bodies and credentials are not logged.

use crate::session::RelayCredential;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod dispatcher;
pub mod message;
mod smtp;

pub use dispatcher::{DispatchFailure, DispatchReport, Notifier};
pub use smtp::{SmtpRelay, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};

pub type TransportResult<T> = Result<T, TransportError>;

/// Failure of a single send attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Relay rejected the address/credential pair.
    Auth(String),
    /// TCP/TLS level failure before the relay answered.
    Connection(String),
    /// Relay answered with a non-auth error.
    Relay(String),
    /// Message could not be built (bad address, bad header).
    InvalidMessage(String),
}

impl TransportError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(_) => "relay_auth_rejected",
            Self::Connection(_) => "relay_unreachable",
            Self::Relay(_) => "relay_error",
            Self::InvalidMessage(_) => "invalid_message",
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth(detail) => write!(f, "mail relay rejected the login: {detail}"),
            Self::Connection(detail) => write!(f, "could not reach mail relay: {detail}"),
            Self::Relay(detail) => write!(f, "mail relay error: {detail}"),
            Self::InvalidMessage(detail) => write!(f, "could not build message: {detail}"),
        }
    }
}

impl Error for TransportError {}

/// One plain-text self-addressed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Used as both sender and recipient.
    pub address: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail relay.
pub trait MailTransport {
    /// Sends exactly one message, authenticating with `credential`.
    fn send(&self, message: &OutboundMessage, credential: &RelayCredential)
        -> TransportResult<()>;
}

impl<T: MailTransport + ?Sized> MailTransport for &T {
    fn send(
        &self,
        message: &OutboundMessage,
        credential: &RelayCredential,
    ) -> TransportResult<()> {
        (**self).send(message, credential)
    }
}
