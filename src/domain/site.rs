//! Rendering configuration for the batch converter

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Visual theme: selects the CSS file and the highlighting palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stylesheet loaded from the assets directory
    pub fn css_filename(&self) -> &'static str {
        match self {
            Theme::Light => "style_light.css",
            Theme::Dark => "style_dark.css",
        }
    }

    /// Name of the bundled syntect theme used for code blocks
    pub fn highlight_palette(&self) -> &'static str {
        match self {
            Theme::Light => "InspiredGitHub",
            Theme::Dark => "base16-ocean.dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!(
                "Invalid theme: '{}'. Valid themes are: light, dark",
                s
            )),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// Where each converted page is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// `<stem>.html`
    #[default]
    Flat,
    /// `<stem>/index.html`, giving extensionless URLs
    Folders,
}

impl OutputLayout {
    /// Output path of a page, relative to the output folder
    pub fn page_path(&self, stem: &str) -> PathBuf {
        match self {
            OutputLayout::Flat => PathBuf::from(format!("{}.html", stem)),
            OutputLayout::Folders => PathBuf::from(stem).join("index.html"),
        }
    }

    /// Link to a page from the site index
    pub fn index_link(&self, stem: &str) -> String {
        match self {
            OutputLayout::Flat => format!("{}.html", stem),
            OutputLayout::Folders => format!("{}/", stem),
        }
    }
}

impl FromStr for OutputLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(OutputLayout::Flat),
            "folders" | "folder" => Ok(OutputLayout::Folders),
            _ => Err(format!(
                "Invalid layout: '{}'. Valid layouts are: flat, folders",
                s
            )),
        }
    }
}

/// Site name, theme and layout, fixed for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOptions {
    pub site_name: String,
    pub theme: Theme,
    pub layout: OutputLayout,
}

impl SiteOptions {
    pub fn new(site_name: impl Into<String>, theme: Theme, layout: OutputLayout) -> Self {
        SiteOptions {
            site_name: site_name.into(),
            theme,
            layout,
        }
    }
}
