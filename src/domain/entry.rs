//! Journal and batch entries

use crate::error::{JournalError, Result};
use chrono::NaiveDate;

/// Extension of Markdown source files
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Extension of rendered pages
pub const HTML_EXTENSION: &str = ".html";

/// One Markdown source document, identified by its filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub filename: String,
    pub title: String,
}

impl Entry {
    /// Entry for a source filename; the title is the name minus its `.md` extension
    pub fn from_filename(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let title = filename
            .strip_suffix(MARKDOWN_EXTENSION)
            .unwrap_or(&filename)
            .to_string();
        Entry { filename, title }
    }

    /// Canonical journal entry for a calendar day (`YYYY-MM-DD.md`)
    ///
    /// # Examples
    ///
    /// ```
    /// use mdjournal::domain::Entry;
    /// use chrono::NaiveDate;
    ///
    /// let entry = Entry::for_date(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    /// assert_eq!(entry.filename, "2024-07-01.md");
    /// assert_eq!(entry.title, "2024-07-01");
    /// ```
    pub fn for_date(date: NaiveDate) -> Self {
        Self::from_filename(format!("{}{}", date.format("%Y-%m-%d"), MARKDOWN_EXTENSION))
    }

    /// Filename of the rendered page (`<stem>.html`)
    pub fn html_filename(&self) -> String {
        format!("{}{}", self.title, HTML_EXTENSION)
    }

    /// Whether the source file carries the Markdown extension
    pub fn is_markdown(&self) -> bool {
        self.filename.ends_with(MARKDOWN_EXTENSION)
    }

    /// Reject names that would escape the entries directory
    pub fn validate_name(name: &str) -> Result<()> {
        let trimmed = name.trim();
        if trimmed.is_empty()
            || trimmed.contains('/')
            || trimmed.contains('\\')
            || trimmed == "."
            || trimmed == ".."
        {
            return Err(JournalError::InvalidEntryName(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_strips_markdown_extension() {
        let entry = Entry::from_filename("2024-07-01.md");
        assert_eq!(entry.title, "2024-07-01");
        assert_eq!(entry.html_filename(), "2024-07-01.html");
        assert!(entry.is_markdown());
    }

    #[test]
    fn test_title_without_extension_is_whole_name() {
        let entry = Entry::from_filename("notes.txt");
        assert_eq!(entry.title, "notes.txt");
        assert_eq!(entry.html_filename(), "notes.txt.html");
        assert!(!entry.is_markdown());
    }

    #[test]
    fn test_for_date_zero_pads() {
        let entry = Entry::for_date(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
        assert_eq!(entry.filename, "2025-01-05.md");
    }

    #[test]
    fn test_validate_name() {
        assert!(Entry::validate_name("2024-07-01.md").is_ok());
        assert!(Entry::validate_name("../secret.md").is_err());
        assert!(Entry::validate_name("sub/2024-07-01.md").is_err());
        assert!(Entry::validate_name("..").is_err());
        assert!(Entry::validate_name("   ").is_err());
    }
}
