//! Interactive prompts for batch options missing from the command line

use crate::cli::menu::read_line;
use crate::domain::{OutputLayout, Theme};
use crate::error::{JournalError, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

pub const DEFAULT_SITE_NAME: &str = "My Site";

/// Ask until a valid theme is given; empty input picks the light theme
pub fn prompt_theme<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Theme> {
    loop {
        let answer = ask(input, out, "Choose a theme (light/dark) [light]: ")?;
        if answer.is_empty() {
            return Ok(Theme::default());
        }
        match Theme::from_str(&answer) {
            Ok(theme) => return Ok(theme),
            Err(msg) => writeln!(out, "{}", msg)?,
        }
    }
}

/// Ask for the site name; empty input keeps the default
pub fn prompt_site_name<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    let prompt = format!("Enter the site name [{}]: ", DEFAULT_SITE_NAME);
    let answer = ask(input, out, &prompt)?;
    if answer.is_empty() {
        Ok(DEFAULT_SITE_NAME.to_string())
    } else {
        Ok(answer)
    }
}

/// Ask whether each page gets its own folder
pub fn prompt_layout<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<OutputLayout> {
    loop {
        let answer = ask(input, out, "Create a folder per entry? (y/n) [n]: ")?;
        match answer.to_lowercase().as_str() {
            "" | "n" | "no" => return Ok(OutputLayout::Flat),
            "y" | "yes" => return Ok(OutputLayout::Folders),
            _ => writeln!(out, "Please answer y or n.")?,
        }
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;
    match read_line(input)? {
        Some(line) => Ok(line.trim().to_string()),
        None => Err(JournalError::Config(format!(
            "No answer given to '{}'",
            prompt.trim_end()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn input(text: &str) -> Cursor<Vec<u8>> {
        Cursor::new(text.as_bytes().to_vec())
    }

    #[test]
    fn test_prompt_theme_retries_until_valid() {
        let mut out = Vec::new();
        let theme = prompt_theme(&mut input("sepia\nDark\n"), &mut out).unwrap();

        assert_eq!(theme, Theme::Dark);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("Invalid theme"));
    }

    #[test]
    fn test_prompt_defaults_on_empty_answer() {
        let mut out = Vec::new();
        let mut answers = input("\n\n\n");

        assert_eq!(prompt_theme(&mut answers, &mut out).unwrap(), Theme::Light);
        assert_eq!(prompt_site_name(&mut answers, &mut out).unwrap(), DEFAULT_SITE_NAME);
        assert_eq!(prompt_layout(&mut answers, &mut out).unwrap(), OutputLayout::Flat);
    }

    #[test]
    fn test_prompt_layout_yes() {
        let mut out = Vec::new();
        let layout = prompt_layout(&mut input("maybe\nyes\n"), &mut out).unwrap();
        assert_eq!(layout, OutputLayout::Folders);
    }

    #[test]
    fn test_end_of_input_is_config_error() {
        let mut out = Vec::new();
        let err = prompt_site_name(&mut input(""), &mut out).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
