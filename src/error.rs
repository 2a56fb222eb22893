//! Error types for mdjournal

use std::path::PathBuf;
use thiserror::Error;

/// Main error type shared by the journal manager and the batch converter
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("The file {0} does not exist")]
    EntryNotFound(String),

    #[error("Invalid entry name: {0}")]
    InvalidEntryName(String),

    #[error("Unrecognized language: {0}")]
    UnrecognizedLanguage(String),

    #[error("Failed to {operation} {}: {source}", path.display())]
    Filesystem {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is reserved for the site index", path.display())]
    ReservedOutput { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Highlighting error: {0}")]
    Highlight(String),

    #[error("HTML error: {0}")]
    Html(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl JournalError {
    /// Wrap an I/O error with the operation and path it happened on
    pub fn filesystem(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        JournalError::Filesystem {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            JournalError::EntryNotFound(_) | JournalError::InvalidEntryName(_) => 2,
            JournalError::Config(_) | JournalError::TomlDeserialize(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            JournalError::EntryNotFound(name) => {
                format!(
                    "Error: The file {} does not exist.\n\n\
                    Suggestions:\n\
                    • Use 'mdjournal list' to see available entries\n\
                    • Entry names include the extension (e.g., 2024-07-01.md)",
                    name
                )
            }
            JournalError::InvalidEntryName(name) => {
                format!(
                    "Invalid entry name: '{}'\n\n\
                    Entry names are plain filenames inside the entries directory.\n\
                    Example: mdjournal convert 2024-07-01.md",
                    name
                )
            }
            JournalError::Config(msg) => {
                if msg.contains("theme") {
                    format!("{}\n\nValid themes: light, dark", msg)
                } else if msg.contains("layout") {
                    format!("{}\n\nValid layouts: flat, folders", msg)
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using JournalError
pub type Result<T> = std::result::Result<T, JournalError>;
