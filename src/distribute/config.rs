//! Distribution settings.
//!
//! Everything here comes from the command line or the environment; no
//! address or credential is compiled in.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default time between mailbox polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Outbound SMTP server and credentials.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    /// Overrides the default port (465 implicit TLS, 587 STARTTLS).
    pub port: Option<u16>,
    pub starttls: bool,
    pub username: String,
    pub password: String,
    /// Address the label emails are sent from.
    pub from: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("starttls", &self.starttls)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

/// Settings for the mailbox-polling distribution loop.
#[derive(Debug, Clone)]
pub struct DistributionConfig {
    /// Maildir holding the synced inbox.
    pub maildir: PathBuf,
    /// Only messages from this address are considered.
    pub sender: String,
    /// Who receives the label archives.
    pub recipients: Vec<String>,
    pub smtp: SmtpSettings,
    /// JSON file of processed order ids.
    pub ledger: PathBuf,
    /// Where per-order label directories and archives are written.
    pub work_dir: PathBuf,
    pub poll_interval: Duration,
}
