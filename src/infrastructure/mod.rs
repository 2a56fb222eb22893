//! Infrastructure layer - Configuration and file system access

pub mod config;
pub mod repository;

pub use config::{BatchConfig, JournalConfig};
pub use repository::{write_output, CreateOutcome, EntryStore, FileSystemEntryStore};
