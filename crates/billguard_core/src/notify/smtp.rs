//! SMTP relay transport over implicit TLS.

use super::{MailTransport, OutboundMessage, TransportError, TransportResult};
use crate::session::RelayCredential;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

// 530/534/535 are the relay's "authentication required/failed" replies.
const AUTH_REPLY_CODES: [&str; 3] = ["530", "534", "535"];

/// Fixed-host relay; one TLS connection per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpRelay {
    host: String,
    port: u16,
}

impl SmtpRelay {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn build_email(message: &OutboundMessage) -> TransportResult<Message> {
        let mailbox: Mailbox = message
            .address
            .parse()
            .map_err(|err: AddressError| TransportError::InvalidMessage(err.to_string()))?;

        Message::builder()
            .from(mailbox.clone())
            .to(mailbox)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|err| TransportError::InvalidMessage(err.to_string()))
    }
}

impl Default for SmtpRelay {
    fn default() -> Self {
        Self::new(DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT)
    }
}

impl MailTransport for SmtpRelay {
    fn send(
        &self,
        message: &OutboundMessage,
        credential: &RelayCredential,
    ) -> TransportResult<()> {
        let email = Self::build_email(message)?;

        let mailer = SmtpTransport::relay(&self.host)
            .map_err(|err| TransportError::Connection(err.to_string()))?
            .port(self.port)
            .credentials(Credentials::new(
                message.address.clone(),
                credential.expose().to_string(),
            ))
            .build();

        mailer
            .send(&email)
            .map(|_| ())
            .map_err(classify_smtp_error)
    }
}

fn classify_smtp_error(err: lettre::transport::smtp::Error) -> TransportError {
    let status = err.status().map(|code| code.to_string());
    let negative_reply = err.is_permanent() || err.is_transient();
    classify_failure(status.as_deref(), negative_reply, err.to_string())
}

/// Maps a failed send onto a transport error from the relay reply code, if
/// any, and whether the relay answered with a negative completion.
fn classify_failure(
    status: Option<&str>,
    negative_reply: bool,
    detail: String,
) -> TransportError {
    match status {
        Some(code) if AUTH_REPLY_CODES.contains(&code) => TransportError::Auth(detail),
        Some(_) => TransportError::Relay(detail),
        None if negative_reply => TransportError::Relay(detail),
        None => TransportError::Connection(detail),
    }
}
