//! # Order Distribution
//!
//! The unattended variant: watch a mailbox for purchase orders from a known
//! sender, render the order's labels, and mail them back as a zip archive.
//!
//! Each collaborator sits behind a trait so the loop in [`job`] can be driven
//! by in-memory fakes:
//!
//! | Trait | Production implementation |
//! |-------|---------------------------|
//! | [`Mailbox`] | [`MaildirMailbox`] (local Maildir) |
//! | [`Mailer`] | [`SmtpMailer`] (SMTP via lettre) |
//! | [`Ledger`] | [`JsonLedger`] (JSON array file) |

pub mod archive;
pub mod config;
pub mod job;
pub mod ledger;
pub mod mailbox;
pub mod mailer;

pub use config::{DistributionConfig, SmtpSettings};
pub use job::{DistributionJob, PollOutcome};
pub use ledger::{JsonLedger, Ledger};
pub use mailbox::{Attachment, IncomingMessage, Mailbox, MaildirMailbox};
pub use mailer::{Mailer, OutgoingMail, SmtpMailer};
