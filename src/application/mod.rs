//! Application layer - Use cases and orchestration

pub mod batch_build;
pub mod build_site;
pub mod render_entry;
pub mod report;

pub use batch_build::BatchSiteBuilder;
pub use build_site::SiteBuilder;
pub use render_entry::HtmlRenderer;
pub use report::{BuildReport, ConvertedEntry, FailedEntry};
