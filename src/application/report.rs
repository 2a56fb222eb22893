//! Outcome of a site build

use crate::domain::Entry;
use crate::error::JournalError;
use std::path::PathBuf;

/// An entry that was converted, and where its page went
#[derive(Debug)]
pub struct ConvertedEntry {
    pub entry: Entry,
    pub output: PathBuf,
}

/// An entry whose conversion failed; the rest of the build went on
#[derive(Debug)]
pub struct FailedEntry {
    pub entry: Entry,
    pub error: JournalError,
}

/// Per-entry results of a full build plus the index that was written
#[derive(Debug, Default)]
pub struct BuildReport {
    pub converted: Vec<ConvertedEntry>,
    pub failed: Vec<FailedEntry>,
    pub index: Option<PathBuf>,
}

impl BuildReport {
    pub fn record_success(&mut self, entry: Entry, output: PathBuf) {
        self.converted.push(ConvertedEntry { entry, output });
    }

    pub fn record_failure(&mut self, entry: Entry, error: JournalError) {
        self.failed.push(FailedEntry { entry, error });
    }

    /// Entries that made it to HTML, in conversion order
    pub fn converted_entries(&self) -> Vec<Entry> {
        self.converted.iter().map(|c| c.entry.clone()).collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
