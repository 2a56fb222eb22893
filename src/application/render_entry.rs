//! Render one journal entry to a standalone page

use crate::domain::template::JOURNAL_TEMPLATE_NAME;
use crate::domain::{load_template, Entry};
use crate::error::Result;
use crate::infrastructure::{write_output, EntryStore, FileSystemEntryStore, JournalConfig};
use crate::render::markdown_to_html;
use std::path::{Path, PathBuf};
use tracing::info;

/// Converts entries to HTML pages through the journal page template
pub struct HtmlRenderer<S> {
    store: S,
    html_dir: PathBuf,
    templates_dir: PathBuf,
}

impl HtmlRenderer<FileSystemEntryStore> {
    /// Renderer over the directories named by a journal configuration
    pub fn from_config(config: &JournalConfig) -> Self {
        HtmlRenderer::new(
            FileSystemEntryStore::new(&config.entries_dir, &config.templates_dir),
            &config.html_dir,
            &config.templates_dir,
        )
    }
}

impl<S: EntryStore> HtmlRenderer<S> {
    pub fn new(store: S, html_dir: impl Into<PathBuf>, templates_dir: impl Into<PathBuf>) -> Self {
        HtmlRenderer {
            store,
            html_dir: html_dir.into(),
            templates_dir: templates_dir.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn html_dir(&self) -> &Path {
        &self.html_dir
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Render `filename` to `<stem>.html` in the output directory.
    ///
    /// Returns the path of the written page.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if the entry does not exist; nothing is written
    /// - `Template` if a custom page template cannot be read
    /// - `Filesystem` if the page cannot be written
    pub fn render(&self, filename: &str) -> Result<PathBuf> {
        let markdown = self.store.read_entry(filename)?;
        let entry = Entry::from_filename(filename);

        let content = markdown_to_html(&markdown);
        let template = load_template(&self.templates_dir, JOURNAL_TEMPLATE_NAME)?;
        let page = template.render_page(&entry.title, &content);

        let output = self.html_dir.join(entry.html_filename());
        write_output(&output, &page)?;

        info!(entry = %entry.filename, output = %output.display(), "rendered entry");
        Ok(output)
    }
}
