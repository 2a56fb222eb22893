//! Interactive journal menu

use crate::application::{HtmlRenderer, SiteBuilder};
use crate::cli::output::{
    format_build_report, format_converted, format_create_outcome, format_entry_list,
};
use crate::domain::Entry;
use crate::error::{JournalError, Result};
use crate::infrastructure::EntryStore;
use chrono::{Local, NaiveDate};
use std::io::{BufRead, Write};

const SEPARATOR: &str = "--------------------------------------------------";
const CHOICE_PROMPT: &str = "Enter your choice: ";
const ENTRY_PROMPT: &str = "Enter the entry filename (e.g., 2024-07-01.md): ";

/// One numbered option of the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    CreateEntry,
    ListEntries,
    ConvertEntry,
    GenerateSite,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 5] = [
        MenuCommand::CreateEntry,
        MenuCommand::ListEntries,
        MenuCommand::ConvertEntry,
        MenuCommand::GenerateSite,
        MenuCommand::Exit,
    ];

    /// Parse the number typed at the prompt
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(MenuCommand::CreateEntry),
            "2" => Some(MenuCommand::ListEntries),
            "3" => Some(MenuCommand::ConvertEntry),
            "4" => Some(MenuCommand::GenerateSite),
            "5" => Some(MenuCommand::Exit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuCommand::CreateEntry => "Create a new journal entry",
            MenuCommand::ListEntries => "List journal entries",
            MenuCommand::ConvertEntry => "Convert an entry to HTML",
            MenuCommand::GenerateSite => "Generate the entire site",
            MenuCommand::Exit => "Exit",
        }
    }
}

/// Menu text printed before every prompt
pub fn menu_text() -> String {
    let mut text = format!("{}\nChoose an option:\n", SEPARATOR);
    for (number, command) in MenuCommand::ALL.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", number + 1, command.label()));
    }
    text.push_str(SEPARATOR);
    text.push('\n');
    text
}

/// Journal operations shared by the subcommands and the menu.
///
/// Each method returns the message to show the user.
pub struct JournalSession<S> {
    builder: SiteBuilder<S>,
}

impl<S: EntryStore> JournalSession<S> {
    pub fn new(renderer: HtmlRenderer<S>) -> Self {
        JournalSession {
            builder: SiteBuilder::new(renderer),
        }
    }

    pub fn create_entry(&self, today: NaiveDate) -> Result<String> {
        let outcome = self.builder.renderer().store().create_entry(today)?;
        Ok(format_create_outcome(&outcome))
    }

    pub fn list_entries(&self) -> Result<String> {
        let entries = self.builder.renderer().store().list_entries()?;
        Ok(format_entry_list(&entries))
    }

    pub fn convert_entry(&self, filename: &str) -> Result<String> {
        let output = self.builder.renderer().render(filename)?;
        Ok(format_converted(&Entry::from_filename(filename), &output))
    }

    pub fn generate_site(&self) -> Result<String> {
        let report = self.builder.generate_site()?;
        Ok(format_build_report(&report))
    }
}

/// Run one non-exit command, reading any extra argument from `input`
fn dispatch<S, R, W>(
    session: &JournalSession<S>,
    command: MenuCommand,
    input: &mut R,
    out: &mut W,
) -> Result<String>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    match command {
        MenuCommand::CreateEntry => session.create_entry(Local::now().date_naive()),
        MenuCommand::ListEntries => session.list_entries(),
        MenuCommand::ConvertEntry => {
            write!(out, "{}", ENTRY_PROMPT)?;
            out.flush()?;
            let filename = read_line(input)?.unwrap_or_default();
            session.convert_entry(filename.trim())
        }
        MenuCommand::GenerateSite => session.generate_site(),
        MenuCommand::Exit => Ok(String::new()),
    }
}

/// Read one line without its terminator; `None` at end of input
pub fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Render an action failure the way the menu reports it
fn error_message(error: &JournalError) -> String {
    format!("Error: {}.", error)
}

/// Show the menu until the user exits or input ends.
///
/// Failures of individual actions are printed and the loop continues; only
/// errors writing to `out` or reading `input` end it.
pub fn run_menu<S, R, W>(session: &JournalSession<S>, input: &mut R, out: &mut W) -> Result<()>
where
    S: EntryStore,
    R: BufRead,
    W: Write,
{
    loop {
        write!(out, "{}{}", menu_text(), CHOICE_PROMPT)?;
        out.flush()?;

        let Some(choice) = read_line(input)? else {
            writeln!(out)?;
            return Ok(());
        };

        match MenuCommand::from_choice(&choice) {
            Some(MenuCommand::Exit) => return Ok(()),
            Some(command) => {
                let message = dispatch(session, command, input, out)
                    .unwrap_or_else(|e| error_message(&e));
                writeln!(out, "{}", message)?;
            }
            None => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
}
