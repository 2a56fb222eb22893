//! Template system for entries and rendered pages

use crate::domain::{html_escape, SiteIndex};
use crate::error::{JournalError, Result};
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Heading written into a freshly created entry
pub const ENTRY_TEMPLATE_NAME: &str = "entry_template.md";
/// Page wrapping one rendered entry
pub const JOURNAL_TEMPLATE_NAME: &str = "journal_template.html";
/// Page listing all rendered entries
pub const INDEX_TEMPLATE_NAME: &str = "index_template.html";

// Built-in template constants
const ENTRY_TEMPLATE: &str = "# Journal Entry for {ISO_DATE}\n\n";
const JOURNAL_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{TITLE}</title>
</head>
<body>
  <article>
{CONTENT}
  </article>
  <nav><a href="index.html">Back to index</a></nav>
</body>
</html>
"#;
const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Journal</title>
</head>
<body>
  <h1>Journal</h1>
  <ul>
{#ENTRIES}    <li><a href="{LINK}">{TITLE}</a></li>
{/ENTRIES}  </ul>
</body>
</html>
"#;

fn page_placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{(TITLE|CONTENT)\}").unwrap())
}

fn link_placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{(TITLE|LINK)\}").unwrap())
}

fn entries_block_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)\{#ENTRIES\}(.*?)\{/ENTRIES\}").unwrap())
}

/// A named text template with `{PLACEHOLDER}` substitution
#[derive(Debug)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create template from built-in template name
    pub fn from_builtin(template_name: &str) -> Result<Self> {
        let content = match template_name {
            ENTRY_TEMPLATE_NAME => ENTRY_TEMPLATE,
            JOURNAL_TEMPLATE_NAME => JOURNAL_TEMPLATE,
            INDEX_TEMPLATE_NAME => INDEX_TEMPLATE,
            _ => {
                return Err(JournalError::Template(format!(
                    "Unknown template: {}",
                    template_name
                )))
            }
        };

        Ok(Template {
            name: template_name.to_string(),
            content: content.to_string(),
        })
    }

    /// Create template from custom template file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| JournalError::Template(format!("Failed to read template file: {}", e)))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Template { name, content })
    }

    /// Render an entry heading with date variable substitution
    pub fn render(&self, date: NaiveDate) -> String {
        self.content
            .replace("{DATE}", &date.format("%B %d, %Y").to_string())
            .replace("{ISO_DATE}", &date.format("%Y-%m-%d").to_string())
            .replace("{YEAR}", &date.format("%Y").to_string())
            .replace("{MONTH}", &date.format("%B").to_string())
            .replace("{DAY_NAME}", &date.format("%A").to_string())
    }

    /// Render a page: `{TITLE}` is escaped, `{CONTENT}` is inserted as HTML.
    ///
    /// Substitution is a single pass, so placeholders inside the content are
    /// left alone.
    pub fn render_page(&self, title: &str, content: &str) -> String {
        page_placeholder_regex()
            .replace_all(&self.content, |caps: &Captures<'_>| match &caps[1] {
                "TITLE" => html_escape(title),
                _ => content.to_string(),
            })
            .into_owned()
    }

    /// Render an index page, repeating the `{#ENTRIES}...{/ENTRIES}` block
    /// once per link with `{TITLE}` and `{LINK}` filled in.
    pub fn render_index(&self, index: &SiteIndex) -> Result<String> {
        let caps = entries_block_regex().captures(&self.content).ok_or_else(|| {
            JournalError::Template(format!(
                "{} has no {{#ENTRIES}}...{{/ENTRIES}} block",
                self.name
            ))
        })?;

        let block = caps.get(0).map(|m| m.range()).unwrap_or_default();
        let row = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

        let mut rows = String::new();
        for link in index.links() {
            let rendered = link_placeholder_regex().replace_all(row, |c: &Captures<'_>| {
                match &c[1] {
                    "TITLE" => html_escape(&link.title),
                    _ => html_escape(&link.link),
                }
            });
            rows.push_str(&rendered);
        }

        let mut output = String::with_capacity(self.content.len() + rows.len());
        output.push_str(&self.content[..block.start]);
        output.push_str(&rows);
        output.push_str(&self.content[block.end..]);
        Ok(output)
    }
}

/// Load template from the templates directory or fall back to built-in
pub fn load_template(templates_dir: &Path, template_name: &str) -> Result<Template> {
    let custom_path = templates_dir.join(template_name);

    if custom_path.exists() {
        Template::from_file(&custom_path)
    } else {
        Template::from_builtin(template_name)
    }
}
