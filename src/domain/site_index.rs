//! Ordered list of links rendered on a site's index page

use crate::domain::Entry;

/// One row of the index: a page title and the link to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLink {
    pub title: String,
    pub link: String,
}

impl IndexLink {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        IndexLink {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// Site index, always ordered by source filename
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteIndex {
    links: Vec<IndexLink>,
}

impl SiteIndex {
    /// Build an index from entries; the link for each entry is produced by `link_for`.
    ///
    /// Entries are sorted by filename so the result does not depend on the
    /// order they were converted in.
    pub fn from_entries<F>(entries: &[Entry], link_for: F) -> Self
    where
        F: Fn(&Entry) -> String,
    {
        let mut sorted: Vec<&Entry> = entries.iter().collect();
        sorted.sort_by(|a, b| a.filename.cmp(&b.filename));

        let links = sorted
            .into_iter()
            .map(|entry| IndexLink::new(entry.title.clone(), link_for(entry)))
            .collect();

        SiteIndex { links }
    }

    /// Journal index: `<stem>.html` links
    pub fn for_journal(entries: &[Entry]) -> Self {
        Self::from_entries(entries, Entry::html_filename)
    }

    pub fn links(&self) -> &[IndexLink] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
