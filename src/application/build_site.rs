//! Regenerate the whole journal site

use crate::application::{BuildReport, HtmlRenderer};
use crate::domain::template::INDEX_TEMPLATE_NAME;
use crate::domain::{load_template, Entry, SiteIndex};
use crate::error::Result;
use crate::infrastructure::{write_output, EntryStore};
use std::path::PathBuf;
use tracing::{info, warn};

/// Renders every entry and the index page linking them
pub struct SiteBuilder<S> {
    renderer: HtmlRenderer<S>,
}

impl<S: EntryStore> SiteBuilder<S> {
    pub fn new(renderer: HtmlRenderer<S>) -> Self {
        SiteBuilder { renderer }
    }

    pub fn renderer(&self) -> &HtmlRenderer<S> {
        &self.renderer
    }

    /// Render all entries, then the index.
    ///
    /// A failing entry is recorded in the report and the build moves on. The
    /// index lists only the entries that were actually rendered, so it never
    /// links to a page that was not written.
    pub fn generate_site(&self) -> Result<BuildReport> {
        let entries = self.renderer.store().list_entries()?;
        let mut report = BuildReport::default();

        for entry in entries {
            match self.renderer.render(&entry.filename) {
                Ok(output) => report.record_success(entry, output),
                Err(error) => {
                    warn!(entry = %entry.filename, %error, "failed to render entry");
                    report.record_failure(entry, error);
                }
            }
        }

        let index = self.generate_index(&report.converted_entries())?;
        report.index = Some(index);
        Ok(report)
    }

    /// Write `index.html` linking each entry's page, in filename order
    pub fn generate_index(&self, entries: &[Entry]) -> Result<PathBuf> {
        let index = SiteIndex::for_journal(entries);
        let template = load_template(self.renderer.templates_dir(), INDEX_TEMPLATE_NAME)?;
        let html = template.render_index(&index)?;

        let output = self.renderer.html_dir().join("index.html");
        write_output(&output, &html)?;

        info!(entries = index.links().len(), "generated index");
        Ok(output)
    }
}
