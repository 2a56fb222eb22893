//! Markdown to HTML with highlighted, copyable code blocks
//!
//! Pipeline: Markdown → HTML fragment (pulldown-cmark) → RcDom (html5ever)
//! → code block rewrite → HTML string.
//!
//! The tree is rewritten in two passes. The first pass only reads: it
//! collects every `<code>` whose parent is a `<pre>`. The second pass splices
//! the highlighted markup and the copy header in, so no child list is mutated
//! while it is being walked. Inline `<code>` spans are never collected.

use crate::domain::Theme;
use crate::error::{JournalError, Result};
use crate::render::highlight::{HighlightedCode, SyntaxHighlighter, PLAIN_TEXT};
use crate::render::{extended_options, toc};
use html5ever::tendril::TendrilSink;
use html5ever::{
    local_name, ns, parse_fragment, serialize, serialize::SerializeOpts,
    serialize::TraversalScope, Attribute, LocalName, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::debug;

/// Label of the copy button; the page script swaps it for a checkmark
pub const COPY_ICON: &str = "\u{1F4CB}";

/// A fenced code block found in the document tree
struct CodeBlock {
    /// Element holding the `<pre>`, where the header is inserted
    container: Handle,
    pre: Handle,
    code: Handle,
}

/// Converts Markdown documents to HTML with highlighted code blocks
pub struct MarkdownToHtmlTranspiler {
    highlighter: SyntaxHighlighter,
}

impl Default for MarkdownToHtmlTranspiler {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownToHtmlTranspiler {
    pub fn new() -> Self {
        Self::with_highlighter(SyntaxHighlighter::new())
    }

    pub fn with_highlighter(highlighter: SyntaxHighlighter) -> Self {
        MarkdownToHtmlTranspiler { highlighter }
    }

    /// Transpile one Markdown document into an HTML body fragment.
    ///
    /// Unknown code languages are highlighted as plain text rather than
    /// failing the document. Raw HTML passes through in place. The output is
    /// serialized as parsed, not re-indented.
    pub fn transpile(&self, markdown: &str, theme: Theme) -> Result<String> {
        let fragment = toc::render_with_toc(markdown, extended_options());
        let dom = parse_html(&fragment);
        let root = fragment_root(&dom)?;

        let blocks = collect_code_blocks(&root);
        debug!(count = blocks.len(), "found fenced code blocks");

        for block in blocks {
            self.rewrite_code_block(block, theme)?;
        }

        serialize_children(&root)
    }

    fn rewrite_code_block(&self, block: CodeBlock, theme: Theme) -> Result<()> {
        let language = code_language(&block.code).unwrap_or_else(|| PLAIN_TEXT.to_string());
        let text = text_content(&block.code);

        let highlighted = self.highlighter.highlight_or_plain(&text, &language, theme)?;
        let replacement = highlighted_code_element(&block.code, &highlighted)?;
        replace_child(&block.pre, &block.code, replacement);

        if let Some(background) = &highlighted.background {
            set_attr(&block.pre, "style", &format!("background-color:{};", background));
        }
        add_class(&block.pre, "highlight");

        insert_before(&block.container, &block.pre, code_header(&language));
        Ok(())
    }
}

/// Language tag of a code element: its first CSS class without the
/// `language-` prefix, or `None` when there is no usable class
pub fn language_from_class(class: &str) -> Option<String> {
    let first = class.split_whitespace().next()?;
    let language = first.strip_prefix("language-").unwrap_or(first);
    if language.is_empty() {
        None
    } else {
        Some(language.to_string())
    }
}

fn code_language(code: &Handle) -> Option<String> {
    get_attr(code, "class").and_then(|class| language_from_class(&class))
}

/// Parse `html` as the content of a `<body>`, so leading `<style>`,
/// `<script>` or comments stay where they are instead of moving to `<head>`
fn parse_html(html: &str) -> RcDom {
    let context = QualName::new(None, ns!(html), local_name!("body"));
    parse_fragment(RcDom::default(), Default::default(), context, Vec::new(), false).one(html)
}

/// The `<html>` element the fragment parser puts the parsed nodes under
fn fragment_root(dom: &RcDom) -> Result<Handle> {
    find_element(&dom.document, "html")
        .ok_or_else(|| JournalError::Html("parsed fragment has no root element".to_string()))
}

fn collect_code_blocks(root: &Handle) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    visit(root, &mut blocks);
    blocks
}

fn visit(parent: &Handle, blocks: &mut Vec<CodeBlock>) {
    for child in parent.children.borrow().iter() {
        if is_element(child, "pre") {
            for grandchild in child.children.borrow().iter() {
                if is_element(grandchild, "code") {
                    blocks.push(CodeBlock {
                        container: parent.clone(),
                        pre: child.clone(),
                        code: grandchild.clone(),
                    });
                }
            }
        }
        visit(child, blocks);
    }
}

fn is_element(node: &Handle, tag: &str) -> bool {
    matches!(&node.data, NodeData::Element { name, .. } if &*name.local == tag)
}

fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if is_element(node, tag) {
        return Some(node.clone());
    }
    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

fn get_attr(node: &Handle, attr_name: &str) -> Option<String> {
    let NodeData::Element { attrs, .. } = &node.data else {
        return None;
    };
    attrs
        .borrow()
        .iter()
        .find(|attr| &*attr.name.local == attr_name)
        .map(|attr| attr.value.to_string())
}

fn set_attr(node: &Handle, attr_name: &str, value: &str) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();
    match attrs.iter_mut().find(|attr| &*attr.name.local == attr_name) {
        Some(attr) => attr.value = value.to_string().into(),
        None => attrs.push(Attribute {
            name: QualName::new(None, ns!(), LocalName::from(attr_name)),
            value: value.to_string().into(),
        }),
    }
}

fn add_class(node: &Handle, class: &str) {
    let value = match get_attr(node, "class") {
        Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
        _ => class.to_string(),
    };
    set_attr(node, "class", &value);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<Attribute>) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: QualName::new(None, ns!(html), LocalName::from(tag)),
            attrs: RefCell::new(attrs),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, ns!(), LocalName::from(name)),
        value: value.to_string().into(),
    }
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

fn append(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

fn replace_child(parent: &Handle, old: &Handle, new: Handle) {
    let mut children = parent.children.borrow_mut();
    if let Some(pos) = children.iter().position(|c| Rc::ptr_eq(c, old)) {
        new.parent.set(Some(Rc::downgrade(parent)));
        old.parent.set(None);
        children[pos] = new;
    }
}

fn insert_before(parent: &Handle, reference: &Handle, node: Handle) {
    let mut children = parent.children.borrow_mut();
    if let Some(pos) = children.iter().position(|c| Rc::ptr_eq(c, reference)) {
        node.parent.set(Some(Rc::downgrade(parent)));
        children.insert(pos, node);
    }
}

/// New `<code>` element carrying the original attributes and the highlighted spans
fn highlighted_code_element(original: &Handle, highlighted: &HighlightedCode) -> Result<Handle> {
    let attrs = match &original.data {
        NodeData::Element { attrs, .. } => attrs.borrow().clone(),
        _ => Vec::new(),
    };
    let code = create_element("code", attrs);

    // Parse inside a <code> wrapper so leading whitespace is kept as text
    let parsed = parse_html(&format!("<code>{}</code>", highlighted.html));
    let wrapper = find_element(&fragment_root(&parsed)?, "code").ok_or_else(|| {
        JournalError::Html("highlighted markup did not parse into a <code> element".to_string())
    })?;

    let spans = wrapper.children.take();
    for span in spans {
        append(&code, span);
    }

    Ok(code)
}

/// `<div class="code-header">` with the language label and the copy button
fn code_header(language: &str) -> Handle {
    let header = create_element("div", vec![attribute("class", "code-header")]);

    let label = create_element("span", vec![attribute("class", "code-language")]);
    append(&label, create_text(language));

    let button = create_element(
        "button",
        vec![
            attribute("class", "copy-button"),
            attribute("type", "button"),
            attribute("aria-label", "Copy code"),
            attribute("onclick", "copyCode(this)"),
        ],
    );
    append(&button, create_text(COPY_ICON));

    append(&header, label);
    append(&header, button);
    header
}

fn serialize_children(node: &Handle) -> Result<String> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };

    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| JournalError::Html(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| JournalError::Html(format!("UTF-8 conversion failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transpile(markdown: &str) -> String {
        MarkdownToHtmlTranspiler::new()
            .transpile(markdown, Theme::Light)
            .unwrap()
    }

    #[test]
    fn test_language_from_class() {
        assert_eq!(language_from_class("language-python"), Some("python".to_string()));
        assert_eq!(language_from_class("rust extra"), Some("rust".to_string()));
        assert_eq!(language_from_class("language-"), None);
        assert_eq!(language_from_class(""), None);
    }

    #[test]
    fn test_python_block_gets_one_header_and_inline_code_is_untouched() {
        let md = "Use `print` here.\n\n```python\nprint(\"hi\")\n```\n\nAnd `len` too.\n";
        let html = transpile(md);

        assert_eq!(html.matches("class=\"code-header\"").count(), 1);
        assert_eq!(html.matches("class=\"copy-button\"").count(), 1);
        assert_eq!(html.matches("class=\"highlight\"").count(), 1);
        assert!(html.contains("<span class=\"code-language\">python</span>"));
        assert!(html.contains("<code>print</code>"));
        assert!(html.contains("<code>len</code>"));
        assert!(html.contains("<span style="));
    }

    #[test]
    fn test_header_sits_right_before_pre() {
        let html = transpile("```rust\nfn main() {}\n```\n");

        let header = html.find("class=\"code-header\"").unwrap();
        let pre = html.find("<pre").unwrap();
        assert!(header < pre);
        assert!(html.contains("</div><pre"));
    }

    #[test]
    fn test_block_without_language_is_text() {
        let html = transpile("```\nplain words\n```\n");

        assert!(html.contains("<span class=\"code-language\">text</span>"));
        assert!(html.contains("plain words"));
    }

    #[test]
    fn test_unknown_language_still_renders() {
        let html = transpile("# Title\n\n```klingon\nQapla'\n```\n\nafter\n");

        assert!(html.contains("<span class=\"code-language\">klingon</span>"));
        assert!(html.contains("Qapla"));
        assert!(html.contains("<p>after</p>"));
    }

    #[test]
    fn test_code_text_stays_escaped() {
        let html = transpile("```html\n<script>alert(1)</script>\n```\n");

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;"));
    }

    #[test]
    fn test_each_block_gets_its_own_header() {
        let html = transpile("```python\na = 1\n```\n\n- item\n\n  ```rust\n  let b = 2;\n  ```\n");

        assert_eq!(html.matches("class=\"copy-button\"").count(), 2);
        assert!(html.contains(">python</span>"));
        assert!(html.contains(">rust</span>"));
    }

    #[test]
    fn test_extensions_are_enabled() {
        let md = "[TOC]\n\n# Heading\n\n| a | b |\n|---|---|\n| 1 | 2 |\n\nNote[^1].\n\n[^1]: The footnote.\n";
        let html = transpile(md);

        assert!(html.contains("<table>"));
        assert!(html.contains("class=\"toc\""));
        assert!(html.contains("id=\"heading\""));
        assert!(html.contains("footnote"));
    }

    #[test]
    fn test_leading_style_and_comment_pass_through() {
        let html = transpile("<style>.note{color:red}</style>\n\n<!-- keep me -->\n\n# Title\n\ntext\n");

        assert!(html.starts_with("<style>.note{color:red}</style>"));
        assert!(html.contains("<!-- keep me -->"));
        assert!(html.contains("<h1 id=\"title\">Title</h1>"));
        assert!(html.contains("<p>text</p>"));
    }

    #[test]
    fn test_leading_script_passes_through() {
        let html = transpile("<script>var x = 1;</script>\n\nBody\n");

        assert!(html.starts_with("<script>var x = 1;</script>"));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn test_raw_html_block_keeps_its_position() {
        let html = transpile("before\n\n<div class=\"box\">inside</div>\n\nafter\n");

        let before = html.find("<p>before</p>").unwrap();
        let raw = html.find("<div class=\"box\">inside</div>").unwrap();
        let after = html.find("<p>after</p>").unwrap();
        assert!(before < raw && raw < after);
    }

    #[test]
    fn test_output_is_not_reindented() {
        assert_eq!(transpile("- a\n- b\n"), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
    }

    #[test]
    fn test_document_without_code_is_unchanged_in_shape() {
        let html = transpile("Just a paragraph.\n");
        assert_eq!(html.trim(), "<p>Just a paragraph.</p>");
    }
}
