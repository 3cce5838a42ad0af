//! Incoming mail.
//!
//! The distribution loop only needs "messages from this sender, with their
//! attachments". [`MaildirMailbox`] answers that from a local Maildir that a
//! mail fetcher (fetchmail, mbsync, ...) keeps in sync with the real inbox.

use mail_parser::mailbox::maildir::MessageIterator;
use mail_parser::{MessageParser, MimeHeaders};
use std::path::PathBuf;

use crate::error::LabelError;

/// A file attached to an incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
}

/// An incoming message, reduced to what order processing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Stable identifier for logging (Maildir file name).
    pub id: String,
    pub sender: String,
    pub attachments: Vec<Attachment>,
}

/// Source of incoming messages.
pub trait Mailbox {
    /// Messages whose From address equals `sender` (case-insensitive),
    /// oldest first.
    fn messages_from(&self, sender: &str) -> Result<Vec<IncomingMessage>, LabelError>;
}

/// A Maildir directory (with `cur/` and `new/`).
#[derive(Debug, Clone)]
pub struct MaildirMailbox {
    path: PathBuf,
}

impl MaildirMailbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Mailbox for MaildirMailbox {
    fn messages_from(&self, sender: &str) -> Result<Vec<IncomingMessage>, LabelError> {
        let iter = MessageIterator::new(&self.path).map_err(|e| {
            LabelError::Mailbox(format!("Cannot open Maildir {}: {}", self.path.display(), e))
        })?;
        let parser = MessageParser::default();
        let mut found = Vec::new();

        for entry in iter {
            let entry = entry.map_err(|e| {
                LabelError::Mailbox(format!("Cannot read {}: {}", self.path.display(), e))
            })?;
            let id = entry
                .path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let Some(message) = parser.parse(entry.contents()) else {
                log::warn!("Skipping unparseable message {}", id);
                continue;
            };
            let from = message
                .from()
                .and_then(|addr| addr.first())
                .and_then(|addr| addr.address())
                .unwrap_or_default();
            if !from.eq_ignore_ascii_case(sender) {
                continue;
            }

            let attachments = message
                .attachments()
                .filter_map(|part| {
                    Some(Attachment {
                        filename: part.attachment_name()?.to_string(),
                        data: part.contents().to_vec(),
                    })
                })
                .collect();

            found.push((
                entry.internal_date(),
                IncomingMessage {
                    id,
                    sender: from.to_string(),
                    attachments,
                },
            ));
        }

        found.sort_by(|(a_date, a), (b_date, b)| a_date.cmp(b_date).then_with(|| a.id.cmp(&b.id)));
        Ok(found.into_iter().map(|(_, message)| message).collect())
    }
}
