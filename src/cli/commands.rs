//! CLI command definitions

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdjournal")]
#[command(about = "Personal Markdown journal with HTML site generation", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Journal root directory (default: $MDJOURNAL_ROOT, then the current directory)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub root: Option<PathBuf>,

    /// Without a subcommand the interactive menu is started
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create today's entry (does nothing if it already exists)
    New,

    /// List entry files in filename order
    List,

    /// Convert one entry to HTML
    Convert {
        /// Entry filename including its extension (e.g., 2024-07-01.md)
        entry: String,
    },

    /// Convert every entry and regenerate index.html
    Build,
}

#[derive(Parser, Debug)]
#[command(name = "mdbatch")]
#[command(about = "Convert a folder of Markdown files into a highlighted HTML site", long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("layout").args(["folders", "flat"])))]
pub struct BatchCli {
    /// Folder containing the Markdown sources
    #[arg(short, long, value_name = "DIR", default_value = "entries")]
    pub input: PathBuf,

    /// Folder receiving the generated site
    #[arg(short, long, value_name = "DIR", default_value = "site")]
    pub output: PathBuf,

    /// Folder holding style_light.css and style_dark.css
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub assets: PathBuf,

    /// Theme (light, dark); prompted for when omitted
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Site name shown in titles and the index; prompted for when omitted
    #[arg(short = 'n', long)]
    pub site_name: Option<String>,

    /// Write each page as <stem>/index.html
    #[arg(long)]
    pub folders: bool,

    /// Write each page as <stem>.html
    #[arg(long)]
    pub flat: bool,
}

impl BatchCli {
    /// Layout chosen on the command line, if any
    pub fn use_folders(&self) -> Option<bool> {
        match (self.folders, self.flat) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["mdjournal"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.root.is_none());
    }

    #[test]
    fn test_convert_takes_entry() {
        let cli = Cli::try_parse_from(["mdjournal", "--root", "/j", "convert", "2024-07-01.md"])
            .unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/j")));
        match cli.command {
            Some(Commands::Convert { entry }) => assert_eq!(entry, "2024-07-01.md"),
            other => panic!("Expected Convert, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_defaults() {
        let cli = BatchCli::try_parse_from(["mdbatch"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("entries"));
        assert_eq!(cli.output, PathBuf::from("site"));
        assert_eq!(cli.use_folders(), None);
        assert!(cli.theme.is_none());
    }

    #[test]
    fn test_batch_layout_flags_conflict() {
        assert!(BatchCli::try_parse_from(["mdbatch", "--folders", "--flat"]).is_err());
        let cli = BatchCli::try_parse_from(["mdbatch", "--flat"]).unwrap();
        assert_eq!(cli.use_folders(), Some(false));
    }
}
