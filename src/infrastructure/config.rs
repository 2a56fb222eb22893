//! Configuration management

use crate::domain::SiteOptions;
use crate::error::{JournalError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional configuration file at the journal root
pub const CONFIG_FILENAME: &str = "mdjournal.toml";

/// Environment variable naming the journal root
pub const ROOT_ENV_VAR: &str = "MDJOURNAL_ROOT";

/// Directory layout of a journal
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    pub entries_dir: PathBuf,
    pub html_dir: PathBuf,
    pub templates_dir: PathBuf,
}

impl Default for JournalConfig {
    fn default() -> Self {
        JournalConfig {
            entries_dir: PathBuf::from("entries"),
            html_dir: PathBuf::from("html"),
            templates_dir: PathBuf::from("templates"),
        }
    }
}

impl JournalConfig {
    /// Resolve the journal root: explicit flag, then `MDJOURNAL_ROOT`, then the
    /// current directory
    pub fn resolve_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(root) = explicit {
            return Ok(root);
        }
        if let Ok(root) = std::env::var(ROOT_ENV_VAR) {
            if !root.trim().is_empty() {
                return Ok(PathBuf::from(root));
            }
        }
        Ok(std::env::current_dir()?)
    }

    /// Load `mdjournal.toml` from the journal root, falling back to defaults.
    ///
    /// Relative directories are resolved against `root`.
    pub fn load_from_dir(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILENAME);

        let config = match fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| {
                JournalError::Config(format!("Failed to parse {}: {}", CONFIG_FILENAME, e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => JournalConfig::default(),
            Err(e) => return Err(JournalError::filesystem("read", config_path, e)),
        };

        Ok(config.rooted_at(root))
    }

    fn rooted_at(self, root: &Path) -> Self {
        JournalConfig {
            entries_dir: root.join(self.entries_dir),
            html_dir: root.join(self.html_dir),
            templates_dir: root.join(self.templates_dir),
        }
    }

    /// Create the entries and output directories if they are missing
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.entries_dir, &self.html_dir] {
            fs::create_dir_all(dir)
                .map_err(|e| JournalError::filesystem("create directory", dir, e))?;
        }
        Ok(())
    }
}

/// Inputs of one batch conversion run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub entries_folder: PathBuf,
    pub output_folder: PathBuf,
    /// Directory holding `style_light.css` / `style_dark.css`
    pub assets_dir: PathBuf,
    pub site: SiteOptions,
}

impl BatchConfig {
    /// Path of the stylesheet for the configured theme
    pub fn css_path(&self) -> PathBuf {
        self.assets_dir.join(self.site.theme.css_filename())
    }
}
