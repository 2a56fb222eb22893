//! File system entry store

use crate::domain::template::ENTRY_TEMPLATE_NAME;
use crate::domain::{load_template, Entry};
use crate::error::{JournalError, Result};
use chrono::NaiveDate;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of asking for today's entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Entry),
    AlreadyExists(Entry),
}

/// Abstract store of dated Markdown entries
pub trait EntryStore {
    /// Directory holding the entries
    fn root(&self) -> &Path;

    /// Create the entry for `today` unless it already exists.
    ///
    /// An existing entry is never overwritten; calling this twice on the same
    /// day leaves the first file untouched.
    fn create_entry(&self, today: NaiveDate) -> Result<CreateOutcome>;

    /// All entry files, sorted by filename (chronological for dated names)
    fn list_entries(&self) -> Result<Vec<Entry>>;

    /// Read the Markdown source of one entry
    fn read_entry(&self, filename: &str) -> Result<String>;
}

/// File system implementation of EntryStore
#[derive(Debug, Clone)]
pub struct FileSystemEntryStore {
    entries_dir: PathBuf,
    templates_dir: PathBuf,
}

impl FileSystemEntryStore {
    /// Create a store over `entries_dir`; new entries use the heading template
    /// found in `templates_dir` (or the built-in one)
    pub fn new(entries_dir: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Self {
        FileSystemEntryStore {
            entries_dir: entries_dir.into(),
            templates_dir: templates_dir.into(),
        }
    }
}

impl EntryStore for FileSystemEntryStore {
    fn root(&self) -> &Path {
        &self.entries_dir
    }

    fn create_entry(&self, today: NaiveDate) -> Result<CreateOutcome> {
        let entry = Entry::for_date(today);
        let template = load_template(&self.templates_dir, ENTRY_TEMPLATE_NAME)?;
        let path = self.entries_dir.join(&entry.filename);

        // create_new never clobbers an existing entry
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(entry = %entry.filename, "entry already exists, leaving it untouched");
                return Ok(CreateOutcome::AlreadyExists(entry));
            }
            Err(e) => return Err(JournalError::filesystem("create entry", &path, e)),
        };

        file.write_all(template.render(today).as_bytes())
            .map_err(|e| JournalError::filesystem("write", &path, e))?;

        debug!(entry = %entry.filename, "created entry");
        Ok(CreateOutcome::Created(entry))
    }

    fn list_entries(&self) -> Result<Vec<Entry>> {
        let dir = fs::read_dir(&self.entries_dir)
            .map_err(|e| JournalError::filesystem("list", &self.entries_dir, e))?;

        let mut entries = Vec::new();
        for item in dir {
            let Ok(item) = item else {
                continue;
            };
            if !item.path().is_file() {
                continue;
            }
            let Some(name) = item.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            entries.push(Entry::from_filename(name));
        }

        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(entries)
    }

    fn read_entry(&self, filename: &str) -> Result<String> {
        Entry::validate_name(filename)?;
        let path = self.entries_dir.join(filename);

        fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                JournalError::EntryNotFound(filename.to_string())
            } else {
                JournalError::filesystem("read", &path, e)
            }
        })
    }
}

/// Write a generated file, creating parent directories as needed
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| JournalError::filesystem("create directory", parent, e))?;
        }
    }

    fs::write(path, content).map_err(|e| JournalError::filesystem("write", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(temp: &TempDir) -> FileSystemEntryStore {
        let entries = temp.path().join("entries");
        fs::create_dir_all(&entries).unwrap();
        FileSystemEntryStore::new(entries, temp.path().join("templates"))
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_entry_writes_heading() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        let outcome = store.create_entry(day(2024, 7, 1)).unwrap();

        assert_eq!(
            outcome,
            CreateOutcome::Created(Entry::from_filename("2024-07-01.md"))
        );
        let content = fs::read_to_string(store.root().join("2024-07-01.md")).unwrap();
        assert_eq!(content, "# Journal Entry for 2024-07-01\n\n");
    }

    #[test]
    fn test_create_entry_twice_keeps_content() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        let today = day(2024, 7, 1);

        store.create_entry(today).unwrap();
        let path = store.root().join("2024-07-01.md");
        fs::write(&path, "# Journal Entry for 2024-07-01\n\nWrote things.\n").unwrap();

        let outcome = store.create_entry(today).unwrap();

        assert!(matches!(outcome, CreateOutcome::AlreadyExists(_)));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "# Journal Entry for 2024-07-01\n\nWrote things.\n"
        );
        assert_eq!(store.list_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_create_entry_uses_custom_template() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        fs::create_dir_all(temp.path().join("templates")).unwrap();
        fs::write(
            temp.path().join("templates").join(ENTRY_TEMPLATE_NAME),
            "# {DAY_NAME}, {DATE}\n",
        )
        .unwrap();

        store.create_entry(day(2025, 1, 17)).unwrap();

        let content = fs::read_to_string(store.root().join("2025-01-17.md")).unwrap();
        assert_eq!(content, "# Friday, January 17, 2025\n");
    }

    #[test]
    fn test_list_entries_sorted_ascending() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        for name in ["2024-07-03.md", "2023-12-31.md", "2024-07-01.md"] {
            fs::write(store.root().join(name), "x").unwrap();
        }

        let names: Vec<String> = store
            .list_entries()
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();

        assert_eq!(names, vec!["2023-12-31.md", "2024-07-01.md", "2024-07-03.md"]);
    }

    #[test]
    fn test_list_entries_skips_directories_and_hidden_files() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);
        fs::write(store.root().join("2024-07-01.md"), "x").unwrap();
        fs::write(store.root().join(".DS_Store"), "x").unwrap();
        fs::create_dir(store.root().join("drafts")).unwrap();

        let entries = store.list_entries().unwrap();

        assert_eq!(entries, vec![Entry::from_filename("2024-07-01.md")]);
    }

    #[test]
    fn test_list_empty_directory() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        assert!(store.list_entries().unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_entry_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        match store.read_entry("1999-01-01.md").unwrap_err() {
            JournalError::EntryNotFound(name) => assert_eq!(name, "1999-01-01.md"),
            other => panic!("Expected EntryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_read_entry_rejects_paths() {
        let temp = TempDir::new().unwrap();
        let store = store(&temp);

        assert!(matches!(
            store.read_entry("../mdjournal.toml"),
            Err(JournalError::InvalidEntryName(_))
        ));
    }

    #[test]
    fn test_write_output_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("site").join("a").join("index.html");

        write_output(&path, "<p>a</p>").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "<p>a</p>");
    }
}
