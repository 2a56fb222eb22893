//! mdjournal - Markdown journal and static site tools
//!
//! Two command-line tools share this library: `mdjournal` keeps dated Markdown
//! entries and renders them through HTML templates, and `mdbatch` converts a
//! folder of Markdown files into a themed site with highlighted code blocks.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod render;

pub use error::JournalError;
