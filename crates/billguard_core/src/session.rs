//! Login session context.
//!
//! # Responsibility
//! - Hold the relay address and credential for one login session.
//! - Track whether the relay has actually accepted the credential.
//!
//! # Invariants
//! - Login only checks format; it never contacts the relay.
//! - A new session is `Provisional` until the first relay reply.
//! - The credential is never persisted, logged or printed by `Debug`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Shortest credential accepted at login, ignoring whitespace.
pub const MIN_CREDENTIAL_CHARS: usize = 8;

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid address regex"));

/// Login format failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    MalformedAddress(String),
    CredentialTooShort { min: usize, got: usize },
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedAddress(value) => write!(f, "invalid email address `{value}`"),
            Self::CredentialTooShort { min, got } => write!(
                f,
                "relay credential must have at least {min} characters, got {got}"
            ),
        }
    }
}

impl Error for SessionError {}

/// Application password for the mail relay.
#[derive(Clone, PartialEq, Eq)]
pub struct RelayCredential(String);

impl RelayCredential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for RelayCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("RelayCredential(<redacted>)")
    }
}

/// How far the relay has confirmed the login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayTrust {
    /// Format check passed; relay not contacted yet.
    Provisional,
    /// Relay accepted at least one send.
    Confirmed,
    /// Relay rejected the credential.
    Rejected,
}

/// Explicit per-login context passed to every handler.
#[derive(Debug, Clone)]
pub struct Session {
    address: String,
    credential: RelayCredential,
    trust: RelayTrust,
}

impl Session {
    /// Opens a provisional session after a format-only check.
    ///
    /// # Errors
    /// - `MalformedAddress` when `address` is not `local@domain.tld` shaped.
    /// - `CredentialTooShort` when the credential has fewer than
    ///   [`MIN_CREDENTIAL_CHARS`] non-whitespace characters.
    pub fn login(address: &str, credential: &str) -> Result<Self, SessionError> {
        let address = address.trim();
        if !ADDRESS_RE.is_match(address) {
            return Err(SessionError::MalformedAddress(address.to_string()));
        }

        // App passwords are often displayed in space-separated groups.
        let compact: String = credential.chars().filter(|ch| !ch.is_whitespace()).collect();
        let got = compact.chars().count();
        if got < MIN_CREDENTIAL_CHARS {
            return Err(SessionError::CredentialTooShort {
                min: MIN_CREDENTIAL_CHARS,
                got,
            });
        }

        Ok(Self {
            address: address.to_string(),
            credential: RelayCredential(compact),
            trust: RelayTrust::Provisional,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn credential(&self) -> &RelayCredential {
        &self.credential
    }

    pub fn trust(&self) -> RelayTrust {
        self.trust
    }

    pub(crate) fn record_delivery(&mut self) {
        self.trust = RelayTrust::Confirmed;
    }

    pub(crate) fn record_rejection(&mut self) {
        self.trust = RelayTrust::Rejected;
    }

    /// Ends the session and drops the credential.
    pub fn logout(self) {}
}
