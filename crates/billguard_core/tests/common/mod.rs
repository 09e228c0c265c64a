#![allow(dead_code)]

use billguard_core::{MailTransport, OutboundMessage, RelayCredential, TransportResult};
use chrono::NaiveDate;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Records every message and answers from a script (default `Ok`).
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<TransportResult<()>>>,
    sent: RefCell<Vec<OutboundMessage>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: Vec<TransportResult<()>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.borrow().clone()
    }
}

impl MailTransport for ScriptedTransport {
    fn send(
        &self,
        message: &OutboundMessage,
        _credential: &RelayCredential,
    ) -> TransportResult<()> {
        self.sent.borrow_mut().push(message.clone());
        self.replies.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}
