//! Markdown rendering, syntax highlighting and page decoration

pub mod decorator;
pub mod highlight;
pub mod toc;
pub mod transpiler;

pub use decorator::PageDecorator;
pub use highlight::{HighlightedCode, SyntaxHighlighter};
pub use transpiler::MarkdownToHtmlTranspiler;

use pulldown_cmark::{html, Options, Parser};

/// Plain CommonMark to HTML, no extensions (journal entries)
pub fn markdown_to_html(source: &str) -> String {
    let mut output = String::new();
    html::push_html(&mut output, Parser::new(source));
    output
}

/// Extensions used by the batch converter: tables, footnotes and
/// `{#id .class}` heading attributes. Fenced code and raw HTML are always on.
///
/// Attribute lists apply to headings only; elsewhere they stay literal text.
pub fn extended_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_STRIKETHROUGH
}
