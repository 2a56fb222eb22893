//! Domain layer - Entries, templates and site options

pub mod entry;
pub mod site;
pub mod site_index;
pub mod template;

pub use entry::Entry;
pub use site::{OutputLayout, SiteOptions, Theme};
pub use site_index::{IndexLink, SiteIndex};
pub use template::{load_template, Template};

/// Escape text for inclusion in HTML element content or attribute values
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
