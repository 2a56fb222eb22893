//! Convert a whole folder of Markdown files into a styled site

use crate::application::BuildReport;
use crate::domain::{html_escape, Entry, SiteIndex};
use crate::error::{JournalError, Result};
use crate::infrastructure::{write_output, BatchConfig};
use crate::render::{MarkdownToHtmlTranspiler, PageDecorator};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Page written by the site index; no source page may be written there
const INDEX_FILENAME: &str = "index.html";
use walkdir::WalkDir;

/// Orchestrates transpiling, decorating and writing every source file
pub struct BatchSiteBuilder {
    config: BatchConfig,
    transpiler: MarkdownToHtmlTranspiler,
}

impl BatchSiteBuilder {
    pub fn new(config: BatchConfig) -> Self {
        Self::with_transpiler(config, MarkdownToHtmlTranspiler::new())
    }

    pub fn with_transpiler(config: BatchConfig, transpiler: MarkdownToHtmlTranspiler) -> Self {
        BatchSiteBuilder { config, transpiler }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Convert every Markdown file, then write the site index.
    ///
    /// Files are processed in filename order. A file that fails is recorded
    /// in the report and left out of the index; the others still convert.
    ///
    /// # Errors
    ///
    /// Fails only when the output folder cannot be created, the input folder
    /// cannot be read, or the index cannot be written.
    pub fn run(&self) -> Result<BuildReport> {
        fs::create_dir_all(&self.config.output_folder).map_err(|e| {
            JournalError::filesystem("create output folder", &self.config.output_folder, e)
        })?;

        let css = self.load_css();
        let sources = self.discover_sources()?;
        let mut report = BuildReport::default();

        for entry in sources {
            match self.convert(&entry, &css) {
                Ok(output) => {
                    info!(entry = %entry.filename, output = %output.display(), "converted");
                    report.record_success(entry, output);
                }
                Err(error) => {
                    warn!(entry = %entry.filename, %error, "failed to convert");
                    report.record_failure(entry, error);
                }
            }
        }

        let index_path = self.config.output_folder.join(INDEX_FILENAME);
        let index = self.index_html(&report.converted_entries(), &css);
        write_output(&index_path, &index)?;
        report.index = Some(index_path);

        Ok(report)
    }

    /// Theme stylesheet, or an empty string when the file is absent
    pub fn load_css(&self) -> String {
        let path = self.config.css_path();
        match fs::read_to_string(&path) {
            Ok(css) => css,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no theme stylesheet, using empty CSS");
                String::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable theme stylesheet, using empty CSS");
                String::new()
            }
        }
    }

    /// Markdown files directly inside the input folder, sorted by filename
    pub fn discover_sources(&self) -> Result<Vec<Entry>> {
        let folder = &self.config.entries_folder;
        if !folder.is_dir() {
            return Err(JournalError::filesystem(
                "read input folder",
                folder,
                std::io::Error::new(ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut sources = Vec::new();
        for item in WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let Ok(item) = item else {
                continue;
            };
            if !item.file_type().is_file() {
                continue;
            }
            let Some(name) = item.file_name().to_str() else {
                continue;
            };
            let entry = Entry::from_filename(name);
            if entry.is_markdown() {
                sources.push(entry);
            }
        }

        Ok(sources)
    }

    fn convert(&self, entry: &Entry, css: &str) -> Result<PathBuf> {
        let site = &self.config.site;
        let page_path = site.layout.page_path(&entry.title);
        let output = self.config.output_folder.join(&page_path);
        if page_path == Path::new(INDEX_FILENAME) {
            return Err(JournalError::ReservedOutput { path: output });
        }

        let source = self.config.entries_folder.join(&entry.filename);
        let markdown = fs::read_to_string(&source)
            .map_err(|e| JournalError::filesystem("read", &source, e))?;

        let body = self.transpiler.transpile(&markdown, site.theme)?;
        let title = format!("{} | {}", entry.title, site.site_name);
        let page = PageDecorator::document(&title, &PageDecorator::decorate(&body, css));

        write_output(&output, &page)?;
        Ok(output)
    }

    /// Index page linking each entry with the layout's link style
    pub fn index_html(&self, entries: &[Entry], css: &str) -> String {
        let site = &self.config.site;
        let index = SiteIndex::from_entries(entries, |e| site.layout.index_link(&e.title));

        let mut body = format!("<h1>{}</h1>\n<ul class=\"site-index\">\n", html_escape(&site.site_name));
        for link in index.links() {
            body.push_str(&format!(
                "  <li><a href=\"{}\">{}</a></li>\n",
                html_escape(&link.link),
                html_escape(&link.title)
            ));
        }
        body.push_str("</ul>\n");

        PageDecorator::document(&site.site_name, &PageDecorator::decorate(&body, css))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OutputLayout, SiteOptions, Theme};
    use tempfile::TempDir;

    fn config(temp: &TempDir, layout: OutputLayout) -> BatchConfig {
        let input = temp.path().join("entries");
        fs::create_dir_all(&input).unwrap();
        BatchConfig {
            entries_folder: input,
            output_folder: temp.path().join("site"),
            assets_dir: temp.path().to_path_buf(),
            site: SiteOptions::new("My Site", Theme::Light, layout),
        }
    }

    fn write_source(temp: &TempDir, name: &str, content: &str) {
        fs::write(temp.path().join("entries").join(name), content).unwrap();
    }

    #[test]
    fn test_discover_sources_only_markdown_sorted() {
        let temp = TempDir::new().unwrap();
        let builder = BatchSiteBuilder::new(config(&temp, OutputLayout::Flat));
        write_source(&temp, "b.md", "b");
        write_source(&temp, "a.md", "a");
        write_source(&temp, "notes.txt", "skip");
        fs::create_dir(temp.path().join("entries/sub.md")).unwrap();

        let names: Vec<String> = builder
            .discover_sources()
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();

        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_missing_input_folder_is_filesystem_error() {
        let temp = TempDir::new().unwrap();
        let mut config = config(&temp, OutputLayout::Flat);
        config.entries_folder = temp.path().join("nope");
        let builder = BatchSiteBuilder::new(config);

        assert!(matches!(
            builder.run(),
            Err(JournalError::Filesystem { .. })
        ));
    }

    #[test]
    fn test_flat_layout_output() {
        let temp = TempDir::new().unwrap();
        let builder = BatchSiteBuilder::new(config(&temp, OutputLayout::Flat));
        write_source(&temp, "a.md", "# A\n");
        write_source(&temp, "b.md", "# B\n");

        let report = builder.run().unwrap();

        let site = temp.path().join("site");
        assert_eq!(report.converted.len(), 2);
        assert!(site.join("a.html").is_file());
        assert!(site.join("b.html").is_file());
        let index = fs::read_to_string(site.join("index.html")).unwrap();
        assert!(index.contains("<a href=\"a.html\">a</a>"));
        assert!(index.contains("<a href=\"b.html\">b</a>"));
        assert!(index.contains("<h1>My Site</h1>"));
    }

    #[test]
    fn test_folder_layout_output() {
        let temp = TempDir::new().unwrap();
        let builder = BatchSiteBuilder::new(config(&temp, OutputLayout::Folders));
        write_source(&temp, "a.md", "# A\n");
        write_source(&temp, "b.md", "# B\n");

        builder.run().unwrap();

        let site = temp.path().join("site");
        assert!(site.join("a").join("index.html").is_file());
        assert!(site.join("b").join("index.html").is_file());
        assert!(!site.join("a.html").exists());
        let index = fs::read_to_string(site.join("index.html")).unwrap();
        assert!(index.contains("<a href=\"a/\">a</a>"));
        assert!(index.contains("<a href=\"b/\">b</a>"));
    }

    #[test]
    fn test_missing_css_gives_empty_style_block() {
        let temp = TempDir::new().unwrap();
        let builder = BatchSiteBuilder::new(config(&temp, OutputLayout::Flat));
        write_source(&temp, "a.md", "text\n");

        builder.run().unwrap();

        let page = fs::read_to_string(temp.path().join("site/a.html")).unwrap();
        assert!(page.contains("<style></style>"));
        let index = fs::read_to_string(temp.path().join("site/index.html")).unwrap();
        assert!(index.contains("<style></style>"));
    }

    #[test]
    fn test_theme_css_is_inlined() {
        let temp = TempDir::new().unwrap();
        let mut config = config(&temp, OutputLayout::Flat);
        config.site.theme = Theme::Dark;
        fs::write(temp.path().join("style_dark.css"), "body{background:#000}").unwrap();
        fs::write(temp.path().join("style_light.css"), "body{background:#fff}").unwrap();
        let builder = BatchSiteBuilder::new(config);
        write_source(&temp, "a.md", "text\n");

        builder.run().unwrap();

        let page = fs::read_to_string(temp.path().join("site/a.html")).unwrap();
        assert!(page.contains("<style>body{background:#000}</style>"));
        assert!(!page.contains("#fff"));
    }

    #[test]
    fn test_page_has_title_and_decorations() {
        let temp = TempDir::new().unwrap();
        let builder = BatchSiteBuilder::new(config(&temp, OutputLayout::Flat));
        write_source(&temp, "guide.md", "```python\nprint(1)\n```\n");

        builder.run().unwrap();

        let page = fs::read_to_string(temp.path().join("site/guide.html")).unwrap();
        assert!(page.contains("<title>guide | My Site</title>"));
        assert!(page.contains("class=\"copy-button\""));
        let pre = page.find("<pre").unwrap();
        let footer = page.find("<footer").unwrap();
        let script = page.find("function copyCode").unwrap();
        assert!(pre < footer && footer < script);
    }

    #[test]
    fn test_failed_file_is_isolated_and_left_out_of_index() {
        let temp = TempDir::new().unwrap();
        let builder = BatchSiteBuilder::new(config(&temp, OutputLayout::Flat));
        write_source(&temp, "a.md", "# A\n");
        fs::write(temp.path().join("entries/b.md"), [0xff, 0xfe]).unwrap();
        write_source(&temp, "c.md", "# C\n");

        let report = builder.run().unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].entry.filename, "b.md");
        let site = temp.path().join("site");
        assert!(site.join("c.html").is_file());
        let index = fs::read_to_string(site.join("index.html")).unwrap();
        assert!(!index.contains("b.html"));
        assert!(index.contains("c.html"));
    }

    #[test]
    fn test_flat_index_source_does_not_clobber_site_index() {
        let temp = TempDir::new().unwrap();
        let builder = BatchSiteBuilder::new(config(&temp, OutputLayout::Flat));
        write_source(&temp, "index.md", "# Front page\n");
        write_source(&temp, "notes.md", "# Notes\n");

        let report = builder.run().unwrap();

        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].entry.filename, "index.md");
        assert!(matches!(
            report.failed[0].error,
            JournalError::ReservedOutput { .. }
        ));
        let index = fs::read_to_string(temp.path().join("site/index.html")).unwrap();
        assert!(index.contains("<ul class=\"site-index\">"));
        assert!(index.contains("href=\"notes.html\""));
        assert!(!index.contains("href=\"index.html\""));
    }

    #[test]
    fn test_folder_index_source_gets_its_own_folder() {
        let temp = TempDir::new().unwrap();
        let builder = BatchSiteBuilder::new(config(&temp, OutputLayout::Folders));
        write_source(&temp, "index.md", "# Front page\n");

        let report = builder.run().unwrap();

        assert_eq!(report.converted.len(), 1);
        assert!(temp.path().join("site/index/index.html").is_file());
        let index = fs::read_to_string(temp.path().join("site/index.html")).unwrap();
        assert!(index.contains("href=\"index/\""));
    }

    #[test]
    fn test_output_folder_is_created() {
        let temp = TempDir::new().unwrap();
        let mut config = config(&temp, OutputLayout::Flat);
        config.output_folder = temp.path().join("deep").join("site");
        let builder = BatchSiteBuilder::new(config);

        builder.run().unwrap();

        assert!(Path::new(&temp.path().join("deep/site/index.html")).is_file());
    }
}
