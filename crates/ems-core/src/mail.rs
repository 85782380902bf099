use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EmsError, Result};
use crate::storage;
use crate::store::{EmailMessage, EmailSender};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

pub fn is_valid_address(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub queued_at: String,
    #[serde(flatten)]
    pub message: EmailMessage,
}

/// Sender that queues each message as a JSON line in an outbox file for a
/// separate mail relay to pick up.
#[derive(Debug, Clone)]
pub struct OutboxSender {
    path: PathBuf,
}

impl OutboxSender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn queued(&self) -> Result<Vec<OutboxEntry>> {
        storage::read_jsonl(&self.path)
    }
}

impl EmailSender for OutboxSender {
    fn send(&self, message: &EmailMessage) -> Result<()> {
        if !is_valid_address(&message.to) {
            return Err(EmsError::Delivery {
                recipient: message.to.clone(),
                reason: "invalid recipient address".to_string(),
            });
        }
        let entry = OutboxEntry {
            queued_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            message: message.clone(),
        };
        storage::append_jsonl(&self.path, &entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> EmailMessage {
        EmailMessage {
            from: "noreply@cubstechnical.com".to_string(),
            to: to.to_string(),
            subject: "Visa expiry".to_string(),
            html_body: "<p>hi</p>".to_string(),
            text_body: "hi".to_string(),
        }
    }

    #[test]
    fn address_validation() {
        assert!(is_valid_address("hr@cubstechnical.com"));
        assert!(!is_valid_address("hr@localhost"));
        assert!(!is_valid_address("not an address"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn queues_messages_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let sender = OutboxSender::new(tmp.path().join("outbox.jsonl"));
        sender.send(&message("a@example.com")).unwrap();
        sender.send(&message("b@example.com")).unwrap();

        let queued = sender.queued().unwrap();
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[0].message.to, "a@example.com");
        assert_eq!(queued[1].message.to, "b@example.com");
    }

    #[test]
    fn rejects_bad_recipient() {
        let tmp = tempfile::tempdir().unwrap();
        let sender = OutboxSender::new(tmp.path().join("outbox.jsonl"));
        let err = sender.send(&message("nobody")).unwrap_err();
        assert!(matches!(err, EmsError::Delivery { .. }));
        assert!(sender.queued().unwrap().is_empty());
    }
}
