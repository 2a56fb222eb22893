//! Heading anchors and `[TOC]` expansion

use crate::domain::html_escape;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Paragraph text replaced by the table of contents
const TOC_MARKER: &str = "[TOC]";

fn strip_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^\w\s-]").unwrap())
}

fn separator_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[-\s]+").unwrap())
}

/// One heading listed in the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    pub level: usize,
    pub id: String,
    pub title: String,
}

/// Turn heading text into an anchor id: lowercase, punctuation dropped,
/// runs of whitespace and dashes collapsed to a single `-`.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = strip_regex().replace_all(&lowered, "");
    separator_regex()
        .replace_all(stripped.trim(), "-")
        .trim_matches('-')
        .to_string()
}

fn unique_id(base: String, used: &mut HashSet<String>) -> String {
    let base = if base.is_empty() {
        "section".to_string()
    } else {
        base
    };

    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{}_{}", base, n);
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Give every heading an id and collect them in document order.
///
/// Explicit `{#id}` attributes are kept as they are.
pub fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<TocItem> {
    let mut used: HashSet<String> = HashSet::new();
    let mut items = Vec::new();

    for idx in 0..events.len() {
        let Event::Start(Tag::Heading { level, id, .. }) = &events[idx] else {
            continue;
        };
        let level = *level as usize;
        let explicit = id.as_ref().map(|id| id.to_string());

        let mut title = String::new();
        for event in &events[idx + 1..] {
            match event {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(text) | Event::Code(text) => title.push_str(text),
                _ => {}
            }
        }

        let id = match explicit {
            Some(id) => {
                used.insert(id.clone());
                id
            }
            None => {
                let id = unique_id(slugify(&title), &mut used);
                if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[idx] {
                    *slot = Some(CowStr::from(id.clone()));
                }
                id
            }
        };

        items.push(TocItem { level, id, title });
    }

    items
}

/// Nested `<ul>` of links to the given headings
pub fn toc_html(items: &[TocItem]) -> String {
    let mut html = String::from("<div class=\"toc\">\n");
    let mut stack: Vec<usize> = Vec::new();

    for item in items {
        match stack.last() {
            None => {
                html.push_str("<ul>\n");
                stack.push(item.level);
            }
            Some(&top) if item.level > top => {
                html.push_str("\n<ul>\n");
                stack.push(item.level);
            }
            Some(_) => {
                while stack.len() > 1 && stack.last().is_some_and(|&top| top > item.level) {
                    html.push_str("</li>\n</ul>\n");
                    stack.pop();
                }
                html.push_str("</li>\n");
            }
        }
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a>",
            html_escape(&item.id),
            html_escape(&item.title)
        ));
    }

    while stack.pop().is_some() {
        html.push_str("</li>\n</ul>\n");
    }
    html.push_str("</div>\n");
    html
}

fn is_toc_paragraph(events: &[Event<'_>], idx: usize) -> bool {
    matches!(
        events.get(idx..idx + 3),
        Some([
            Event::Start(Tag::Paragraph),
            Event::Text(text),
            Event::End(TagEnd::Paragraph),
        ]) if text.trim() == TOC_MARKER
    )
}

/// Render Markdown with heading anchors, expanding `[TOC]` paragraphs
pub fn render_with_toc(source: &str, options: Options) -> String {
    let mut events: Vec<Event<'_>> = TextMergeStream::new(Parser::new_ext(source, options)).collect();
    let items = assign_heading_ids(&mut events);

    let mut output_events = Vec::with_capacity(events.len());
    let mut idx = 0;
    while idx < events.len() {
        if is_toc_paragraph(&events, idx) {
            output_events.push(Event::Html(CowStr::from(toc_html(&items))));
            idx += 3;
            continue;
        }
        output_events.push(events[idx].clone());
        idx += 1;
    }

    let mut output = String::new();
    html::push_html(&mut output, output_events.into_iter());
    output
}
