//! Syntax highlighting for fenced code blocks

use crate::domain::Theme;
use crate::error::{JournalError, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as Palette, ThemeSet};
use syntect::html::{append_highlighted_html_for_styled_line, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::warn;

/// Language tag used when a block has none
pub const PLAIN_TEXT: &str = "text";

/// Highlighted body of one code block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    /// Language the code was actually highlighted as
    pub language: String,
    /// Inline-styled `<span>` markup, without the surrounding `<pre>`/`<code>`
    pub html: String,
    /// CSS background color of the palette, e.g. `#2b303b`
    pub background: Option<String>,
}

pub struct SyntaxHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Highlight `code` as `language`.
    ///
    /// # Errors
    /// Returns `UnrecognizedLanguage` when no syntax matches the tag, or a
    /// `Highlight` error if syntect fails.
    pub fn highlight(&self, code: &str, language: &str, theme: Theme) -> Result<HighlightedCode> {
        let syntax = self.find_syntax(language)?;
        self.highlight_with(code, syntax, language, theme)
    }

    /// Highlight `code`, falling back to plain text for unknown languages
    pub fn highlight_or_plain(
        &self,
        code: &str,
        language: &str,
        theme: Theme,
    ) -> Result<HighlightedCode> {
        match self.highlight(code, language, theme) {
            Err(JournalError::UnrecognizedLanguage(lang)) => {
                warn!(language = %lang, "unrecognized language, highlighting as plain text");
                let plain = self.syntaxes.find_syntax_plain_text();
                self.highlight_with(code, plain, PLAIN_TEXT, theme)
            }
            other => other,
        }
    }

    fn find_syntax(&self, language: &str) -> Result<&SyntaxReference> {
        let language = language.trim();
        if language.is_empty() || language.eq_ignore_ascii_case(PLAIN_TEXT) {
            return Ok(self.syntaxes.find_syntax_plain_text());
        }

        self.syntaxes
            .find_syntax_by_token(language)
            .ok_or_else(|| JournalError::UnrecognizedLanguage(language.to_string()))
    }

    fn palette(&self, theme: Theme) -> Result<&Palette> {
        let name = theme.highlight_palette();
        self.themes.themes.get(name).ok_or_else(|| {
            JournalError::Highlight(format!("highlighting palette \"{}\" is not bundled", name))
        })
    }

    fn highlight_with(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        language: &str,
        theme: Theme,
    ) -> Result<HighlightedCode> {
        let palette = self.palette(theme)?;
        let mut highlighter = HighlightLines::new(syntax, palette);
        let mut html = String::new();

        for line in LinesWithEndings::from(code) {
            let regions = highlighter
                .highlight_line(line, &self.syntaxes)
                .map_err(|e| JournalError::Highlight(e.to_string()))?;
            append_highlighted_html_for_styled_line(&regions[..], IncludeBackground::No, &mut html)
                .map_err(|e| JournalError::Highlight(e.to_string()))?;
        }

        let background = palette
            .settings
            .background
            .map(|c| format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b));

        Ok(HighlightedCode {
            language: language.to_string(),
            html,
            background,
        })
    }
}
