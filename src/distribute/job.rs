//! The distribution loop.
//!
//! One poll walks through:
//!
//! ```text
//! Idle ─► scan mailbox ─► first unprocessed PO attachment?
//!                              │ no ─► Idle
//!                              ▼ yes
//!         extract rows ─► render batch ─► zip ─► send ─► record ─► Idle
//! ```
//!
//! At most one order is handled per poll. The order id is recorded only
//! after the mail went out, so a failed delivery is retried on the next
//! poll. Rendered files stay in the work directory either way.

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use super::archive;
use super::config::{DEFAULT_POLL_INTERVAL, DistributionConfig};
use super::ledger::{JsonLedger, Ledger};
use super::mailbox::{Attachment, IncomingMessage, Mailbox, MaildirMailbox};
use super::mailer::{Mailer, OutgoingMail, SmtpMailer};
use crate::batch;
use crate::error::LabelError;
use crate::label::LabelRenderer;
use crate::source::purchase_order;

/// Result of a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing new in the mailbox.
    Idle,
    /// One order was rendered, mailed and recorded.
    Delivered { order_id: String, labels: usize },
}

pub struct DistributionJob<M, S, L> {
    mailbox: M,
    mailer: S,
    ledger: L,
    renderer: LabelRenderer,
    sender: String,
    work_dir: PathBuf,
    poll_interval: Duration,
}

impl DistributionJob<MaildirMailbox, SmtpMailer, JsonLedger> {
    /// The production job: Maildir in, SMTP out, JSON ledger.
    pub fn from_config(
        config: &DistributionConfig,
        renderer: LabelRenderer,
    ) -> Result<Self, LabelError> {
        let mailer = SmtpMailer::new(&config.smtp, &config.recipients)?;
        let ledger = JsonLedger::new(&config.ledger);
        log::info!("Processed orders are recorded in {}", ledger.path().display());
        Ok(Self::new(
            MaildirMailbox::new(&config.maildir),
            mailer,
            ledger,
            renderer,
            &config.sender,
            &config.work_dir,
        )
        .with_poll_interval(config.poll_interval))
    }
}

impl<M: Mailbox, S: Mailer, L: Ledger> DistributionJob<M, S, L> {
    pub fn new(
        mailbox: M,
        mailer: S,
        ledger: L,
        renderer: LabelRenderer,
        sender: impl Into<String>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mailbox,
            mailer,
            ledger,
            renderer,
            sender: sender.into(),
            work_dir: work_dir.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn mailer(&self) -> &S {
        &self.mailer
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Poll forever, sleeping between polls.
    ///
    /// Returns only on a fatal error (see [`LabelError::is_fatal`]); anything
    /// else is logged and retried on the next poll.
    pub fn run(&mut self) -> Result<(), LabelError> {
        log::info!(
            "Watching for orders from {} every {}s",
            self.sender,
            self.poll_interval.as_secs()
        );
        loop {
            match self.poll_once() {
                Ok(_) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => log::warn!("Poll failed, retrying next cycle: {}", e),
            }
            thread::sleep(self.poll_interval);
        }
    }

    /// Handle at most one unprocessed order.
    pub fn poll_once(&mut self) -> Result<PollOutcome, LabelError> {
        log::debug!("Polling mailbox for {}", self.sender);
        let messages = self.mailbox.messages_from(&self.sender)?;

        let Some((order_id, attachment)) = self.next_order(&messages)? else {
            log::info!("No new orders");
            return Ok(PollOutcome::Idle);
        };

        let labels = self.deliver(&order_id, attachment)?;
        self.ledger.record(&order_id)?;
        log::info!("Delivered {} labels for order {}", labels, order_id);

        Ok(PollOutcome::Delivered { order_id, labels })
    }

    /// First purchase-order attachment whose order id is not in the ledger.
    fn next_order<'a>(
        &self,
        messages: &'a [IncomingMessage],
    ) -> Result<Option<(String, &'a Attachment)>, LabelError> {
        for message in messages {
            for attachment in &message.attachments {
                let Some(order_id) = purchase_order::order_id_from_filename(&attachment.filename)
                else {
                    continue;
                };
                if self.ledger.contains(&order_id)? {
                    log::debug!("Order {} already processed, skipping", order_id);
                    continue;
                }
                log::info!("Found order {} in message {}", order_id, message.id);
                return Ok(Some((order_id, attachment)));
            }
        }
        Ok(None)
    }

    /// Render, package and mail one order. Returns the label count.
    fn deliver(&self, order_id: &str, attachment: &Attachment) -> Result<usize, LabelError> {
        let rows = purchase_order::read_rows(&attachment.data)?;
        if rows.is_empty() {
            return Err(LabelError::Document(format!(
                "{} contains no order lines",
                attachment.filename
            )));
        }

        let label_dir = self.work_dir.join(order_id);
        fs::create_dir_all(&label_dir)?;
        let files = batch::run(&rows, &self.renderer, &label_dir)?;

        let name = archive::archive_name(order_id);
        let archive_path = self.work_dir.join(&name);
        archive::zip_files(&files, &archive_path)?;
        let bytes = fs::read(&archive_path)?;

        self.mailer
            .send(&OutgoingMail::for_order(order_id, name, bytes))?;
        Ok(files.len())
    }
}
