//! Processed-order ledger.
//!
//! The ledger remembers which purchase orders already produced labels so a
//! re-delivered email does not produce them twice. It only grows.
//!
//! [`JsonLedger`] keeps a JSON array of order ids in one file, read fully
//! and rewritten fully on every access. There is no locking: two processes
//! sharing one ledger file can lose each other's entries.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::LabelError;

/// Set of processed order ids.
pub trait Ledger {
    fn contains(&self, order_id: &str) -> Result<bool, LabelError>;

    /// Add an order id and persist the ledger.
    fn record(&mut self, order_id: &str) -> Result<(), LabelError>;
}

/// Ledger stored as a JSON array of strings.
#[derive(Debug, Clone)]
pub struct JsonLedger {
    path: PathBuf,
}

impl JsonLedger {
    /// Ledger at `path`. A missing file is an empty ledger.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All recorded order ids, oldest first.
    ///
    /// The file is trusted: anything but a JSON array of strings is an error.
    pub fn entries(&self) -> Result<Vec<String>, LabelError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(LabelError::Ledger(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        serde_json::from_str(&raw).map_err(|e| {
            LabelError::Ledger(format!("Corrupt ledger {}: {}", self.path.display(), e))
        })
    }

    fn persist(&self, entries: &[String]) -> Result<(), LabelError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| LabelError::Ledger(format!("Failed to serialize ledger: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            LabelError::Ledger(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl Ledger for JsonLedger {
    fn contains(&self, order_id: &str) -> Result<bool, LabelError> {
        Ok(self.entries()?.iter().any(|entry| entry == order_id))
    }

    fn record(&mut self, order_id: &str) -> Result<(), LabelError> {
        let mut entries = self.entries()?;
        if entries.iter().any(|entry| entry == order_id) {
            return Ok(());
        }
        entries.push(order_id.to_string());
        self.persist(&entries)?;
        log::debug!("Recorded {} in {}", order_id, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = JsonLedger::new(dir.path().join("processed.json"));
        assert!(ledger.entries().unwrap().is_empty());
        assert!(!ledger.contains("UPD-PO42").unwrap());
        assert_eq!(ledger.path(), dir.path().join("processed.json"));
    }

    #[test]
    fn test_record_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");
        let mut ledger = JsonLedger::new(&path);
        ledger.record("UPD-PO41").unwrap();
        ledger.record("UPD-PO42").unwrap();
        ledger.record("UPD-PO41").unwrap();

        let reopened = JsonLedger::new(&path);
        assert_eq!(reopened.entries().unwrap(), vec!["UPD-PO41", "UPD-PO42"]);
        assert!(reopened.contains("UPD-PO42").unwrap());

        let on_disk: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 2);
    }

    #[test]
    fn test_reads_existing_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");
        std::fs::write(&path, r#"["A-1", "B-2"]"#).unwrap();
        assert!(JsonLedger::new(&path).contains("B-2").unwrap());
    }

    #[test]
    fn test_corrupt_ledger_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = JsonLedger::new(&path).contains("A-1").unwrap_err();
        assert!(matches!(err, LabelError::Ledger(_)));
        assert!(err.is_fatal());
    }
}
