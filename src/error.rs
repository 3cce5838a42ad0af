//! # Error Types
//!
//! This module defines the error type used throughout the signlabel library.
//!
//! Variants follow the failure classes of the tool: bad input rows, missing
//! resources, external services and the processed-order ledger.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for signlabel operations
#[derive(Debug, Error)]
pub enum LabelError {
    /// A source row is malformed (missing column, empty code)
    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// The barcode payload could not be encoded
    #[error("Barcode error: {0}")]
    Barcode(String),

    /// A font file is missing or unreadable. There is no fallback font.
    #[error("Font configuration error: {} ({reason})", path.display())]
    Font { path: PathBuf, reason: String },

    /// Unknown layout name or malformed layout file
    #[error("Layout error: {0}")]
    Layout(String),

    /// Image composition or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Spreadsheet could not be opened or read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Purchase-order document could not be read
    #[error("Document error: {0}")]
    Document(String),

    /// Zip packaging failed
    #[error("Archive error: {0}")]
    Archive(String),

    /// Mailbox could not be scanned
    #[error("Mailbox error: {0}")]
    Mailbox(String),

    /// Outbound mail could not be built or delivered
    #[error("Mail delivery error: {0}")]
    Mail(String),

    /// Processed-order ledger is unreadable or corrupt
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    /// Whether the error must stop the long-running distribution loop.
    ///
    /// Configuration problems and a corrupt ledger will not fix themselves
    /// between polls; everything else is retried on the next cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Font { .. } | Self::Layout(_) | Self::Ledger(_)
        )
    }
}
